//! Generalized suffix tree
//!
//! A [`SuffixTree`] indexes one or more sequences. Each sequence is followed
//! by its own sentinel in a concatenated word, the tree is built once over
//! that word with McCreight's algorithm, and is read-only afterwards.
//!
//! ## Architecture
//!
//! - `types`: symbols, word tokens and the sentinel pool
//! - `node`: the arena node type
//! - `builder`: McCreight construction and the post-order labeling pass
//! - `query`: `find`, `find_all`, `lcs`, `lrs`
//!
//! ## Example
//!
//! ```
//! use rept::tree::SuffixTree;
//!
//! let docs = ["xxxabcxxx", "adsaabc", "ytysabcrew", "qqqabcqw", "aaabc"];
//! let tree = SuffixTree::build(docs.map(str::as_bytes)).unwrap();
//! assert_eq!(tree.lcs(None), b"abc");
//!
//! let tree = SuffixTree::from_sequence(b"banana").unwrap();
//! assert_eq!(tree.lrs(2), b"ana");
//! ```

pub mod builder;
pub mod node;
pub mod query;
pub mod types;

pub use node::Node;
pub use types::{DEFAULT_SENTINEL_CAPACITY, NodeId, ROOT, SentinelPool, Symbol, Token};

use crate::error::{Error, Result};
use builder::{McCreight, label_nodes};

/// Default occurrence threshold for [`SuffixTree::lrs`]
pub const DEFAULT_MIN_OCCURRENCES: usize = 2;

/// Suffix tree over one sequence, or a generalized tree over several.
///
/// The tree borrows its inputs; substrings returned by queries are slices of
/// those inputs.
#[derive(Debug)]
pub struct SuffixTree<'a, T: Symbol> {
    /// The indexed inputs, in build order
    sequences: Vec<&'a [T]>,
    /// Inputs concatenated, each followed by its sentinel
    word: Vec<Token<T>>,
    /// Offset of each sequence in `word`
    starts: Vec<usize>,
    /// Offset of each sentinel in `word` (ascending)
    sentinels: Vec<usize>,
    /// Node arena, root at index 0
    nodes: Vec<Node<T>>,
}

impl<'a, T: Symbol> SuffixTree<'a, T> {
    /// Build a tree over `sequences`.
    ///
    /// A single sequence gives a plain suffix tree; several give a
    /// generalized one. Fails with [`Error::InvalidInputKind`] when no
    /// sequence is given.
    pub fn build<I>(sequences: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a [T]>,
    {
        Self::build_with_sentinels(sequences, SentinelPool::new())
    }

    /// Build a plain suffix tree over one sequence
    pub fn from_sequence(sequence: &'a [T]) -> Result<Self> {
        Self::build(std::iter::once(sequence))
    }

    /// Build drawing terminators from an explicit pool.
    ///
    /// Fails with [`Error::TooManySequences`] when the pool runs dry.
    pub fn build_with_sentinels<I>(sequences: I, mut pool: SentinelPool) -> Result<Self>
    where
        I: IntoIterator<Item = &'a [T]>,
    {
        let sequences: Vec<&'a [T]> = sequences.into_iter().collect();
        if sequences.is_empty() {
            return Err(Error::InvalidInputKind(
                "at least one sequence is required to build a suffix tree".to_string(),
            ));
        }

        let total: usize = sequences.iter().map(|s| s.len() + 1).sum();
        let mut word = Vec::with_capacity(total);
        let mut starts = Vec::with_capacity(sequences.len());
        let mut sentinels = Vec::with_capacity(sequences.len());

        for sequence in &sequences {
            let sentinel = pool.next_sentinel()?;
            starts.push(word.len());
            word.extend(sequence.iter().copied().map(Token::Sym));
            sentinels.push(word.len());
            word.push(Token::Sentinel(sentinel));
        }

        let mut nodes = McCreight::new(&word).run()?;
        label_nodes(&mut nodes, &starts, sequences.len() > 1);

        log::trace!(
            "suffix tree built: {} sequences, {} tokens, {} nodes",
            sequences.len(),
            word.len(),
            nodes.len()
        );

        Ok(Self {
            sequences,
            word,
            starts,
            sentinels,
            nodes,
        })
    }

    /// Number of indexed sequences
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// True when built over more than one sequence
    pub fn is_generalized(&self) -> bool {
        self.sequences.len() > 1
    }

    pub fn sequences(&self) -> &[&'a [T]] {
        &self.sequences
    }

    /// Length of the concatenated word, sentinels included
    pub fn word_len(&self) -> usize {
        self.word.len()
    }

    pub fn word(&self) -> &[Token<T>] {
        &self.word
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> &Node<T> {
        &self.nodes[ROOT]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_single() {
        let tree = SuffixTree::from_sequence(b"banana").unwrap();

        assert_eq!(tree.sequence_count(), 1);
        assert!(!tree.is_generalized());
        assert_eq!(tree.word_len(), 7); // "banana" + sentinel
        assert_eq!(tree.root().leaf_count(), 7);
        assert!(tree.word()[6].is_sentinel());
    }

    #[test]
    fn test_build_generalized_layout() {
        let tree = SuffixTree::build(["hello", "world", "foo"].map(str::as_bytes)).unwrap();

        assert!(tree.is_generalized());
        // 5 + 1 + 5 + 1 + 3 + 1 = 16
        assert_eq!(tree.word_len(), 16);
        assert_eq!(tree.starts, vec![0, 6, 12]);
        assert_eq!(tree.sentinels, vec![5, 11, 15]);

        let ids: Vec<u32> = tree.root().generalized_ids().iter().collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_build_empty_set() {
        let none: Vec<&[u8]> = Vec::new();
        let err = SuffixTree::build(none).unwrap_err();
        assert!(matches!(err, Error::InvalidInputKind(_)));
    }

    #[test]
    fn test_build_too_many_sequences() {
        let docs = ["a", "b", "c"].map(str::as_bytes);
        let err = SuffixTree::build_with_sentinels(docs, SentinelPool::with_capacity(2)).unwrap_err();
        assert_eq!(err, Error::TooManySequences { capacity: 2 });

        assert!(SuffixTree::build_with_sentinels(docs, SentinelPool::with_capacity(3)).is_ok());
    }

    #[test]
    fn test_sentinels_are_distinct() {
        let tree = SuffixTree::build(["ab", "ab", "ab"].map(str::as_bytes)).unwrap();
        let sentinels: Vec<Token<u8>> = tree.sentinels.iter().map(|&p| tree.word[p]).collect();
        assert_eq!(
            sentinels,
            vec![Token::Sentinel(0), Token::Sentinel(1), Token::Sentinel(2)]
        );
    }

    #[test]
    fn test_empty_sequence_is_indexed() {
        let tree = SuffixTree::build(["", "abc"].map(str::as_bytes)).unwrap();
        assert_eq!(tree.word_len(), 5);
        assert_eq!(tree.root().leaf_count(), 5);
    }

    #[test]
    fn test_char_sequences() {
        let text: Vec<char> = "naïve naïve".chars().collect();
        let tree = SuffixTree::from_sequence(&text).unwrap();
        let expected: Vec<char> = "naïve".chars().collect();
        assert_eq!(tree.lrs(2), &expected[..]);
    }
}

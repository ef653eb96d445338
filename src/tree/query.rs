//! Substring queries over a built tree
//!
//! `find` / `find_all` walk edge labels from the root. `lcs` and `lrs` pick
//! the deepest node satisfying a predicate whose label does not overlap a
//! sentinel. Among equally deep candidates the one whose first occurrence
//! comes earliest in the concatenated word wins.

use super::builder::sequence_of;
use super::types::{NodeId, ROOT, Symbol, Token};
use super::{Node, SuffixTree};
use roaring::RoaringBitmap;
use std::collections::BTreeSet;

impl<'a, T: Symbol> SuffixTree<'a, T> {
    /// Offset of the first occurrence of `pattern` in the concatenated word.
    ///
    /// For a single-sequence tree this is an offset into that sequence; use
    /// [`SuffixTree::locate`] to resolve offsets of a generalized tree.
    pub fn find(&self, pattern: &[T]) -> Option<usize> {
        self.descend(pattern).map(|id| self.nodes[id].first)
    }

    /// Offsets of every occurrence of `pattern`
    pub fn find_all(&self, pattern: &[T]) -> BTreeSet<usize> {
        let Some(id) = self.descend(pattern) else {
            return BTreeSet::new();
        };

        let mut offsets = BTreeSet::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.is_leaf() {
                offsets.insert(node.start);
            } else {
                stack.extend(node.children());
            }
        }
        offsets
    }

    /// Longest substring common to every sequence in `sequence_ids`
    /// (all sequences when `None`).
    ///
    /// Returns the empty slice when nothing is shared or an id is unknown.
    pub fn lcs(&self, sequence_ids: Option<&[usize]>) -> &'a [T] {
        let target: RoaringBitmap = match sequence_ids {
            None => (0..self.sequences.len() as u32).collect(),
            Some(ids) => {
                if ids.iter().any(|&id| id >= self.sequences.len()) {
                    return &[];
                }
                ids.iter().map(|&id| id as u32).collect()
            }
        };

        // Nodes covering the target form a subtree hanging from the root:
        // a parent's id set always contains its children's.
        let mut best = None;
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if !self.covers(node, &target) {
                continue;
            }
            if !self.overlaps_sentinel(node) && self.prefer(best, id) {
                best = Some(id);
            }
            stack.extend(node.children());
        }

        match best {
            Some(id) => self.label(id),
            None => &[],
        }
    }

    /// Longest substring occurring at least `min_occurrences` times.
    ///
    /// Occurrences may overlap. Returns the empty slice when nothing
    /// qualifies.
    pub fn lrs(&self, min_occurrences: usize) -> &'a [T] {
        let min_occurrences = min_occurrences.max(1);
        let mut best = None;
        for (id, node) in self.nodes.iter().enumerate() {
            if node.leaf_count >= min_occurrences
                && !self.overlaps_sentinel(node)
                && self.prefer(best, id)
            {
                best = Some(id);
            }
        }
        match best {
            Some(id) => self.label(id),
            None => &[],
        }
    }

    /// Resolve a word offset to `(sequence index, offset in that sequence)`.
    ///
    /// Sentinel positions and offsets past the word resolve to `None`.
    pub fn locate(&self, offset: usize) -> Option<(usize, usize)> {
        if offset >= self.word.len() || self.sentinels.binary_search(&offset).is_ok() {
            return None;
        }
        let seq = sequence_of(&self.starts, offset);
        Some((seq, offset - self.starts[seq]))
    }

    /// Node whose path label starts with `pattern`
    fn descend(&self, pattern: &[T]) -> Option<NodeId> {
        let mut node = ROOT;
        let mut matched = 0;
        while matched < pattern.len() {
            let child = self.nodes[node].child(&Token::Sym(pattern[matched]))?;
            let edge = self.edge_label(node, child);
            let rest = &pattern[matched..];
            let len = edge.len().min(rest.len());
            if !edge[..len]
                .iter()
                .zip(&rest[..len])
                .all(|(token, sym)| *token == Token::Sym(*sym))
            {
                return None;
            }
            matched += len;
            node = child;
        }
        Some(node)
    }

    fn edge_label(&self, parent: NodeId, child: NodeId) -> &[Token<T>] {
        let child = &self.nodes[child];
        &self.word[child.start + self.nodes[parent].depth..child.start + child.depth]
    }

    fn covers(&self, node: &Node<T>, target: &RoaringBitmap) -> bool {
        // Single-sequence trees skip labeling; every node holds sequence 0.
        !self.is_generalized() || node.generalized_ids.is_superset(target)
    }

    /// Whether `word[start..start + depth]` contains a sentinel
    fn overlaps_sentinel(&self, node: &Node<T>) -> bool {
        if node.depth == 0 {
            return false;
        }
        let i = self.sentinels.partition_point(|&p| p < node.start);
        i < self.sentinels.len() && self.sentinels[i] < node.start + node.depth
    }

    /// Deeper wins, then earlier first occurrence
    fn prefer(&self, current: Option<NodeId>, candidate: NodeId) -> bool {
        let Some(current) = current else {
            return true;
        };
        let (a, b) = (&self.nodes[candidate], &self.nodes[current]);
        (a.depth, std::cmp::Reverse(a.first)) > (b.depth, std::cmp::Reverse(b.first))
    }

    /// Path label of a sentinel-free node as a slice of the original input
    fn label(&self, id: NodeId) -> &'a [T] {
        let node = &self.nodes[id];
        if node.depth == 0 {
            return &[];
        }
        match self.locate(node.first) {
            Some((seq, offset)) => &self.sequences[seq][offset..offset + node.depth],
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_find_all(text: &[u8], pattern: &[u8]) -> BTreeSet<usize> {
        (0..=text.len())
            .filter(|&i| text[i..].starts_with(pattern))
            .collect()
    }

    #[test]
    fn test_find() {
        let tree = SuffixTree::from_sequence(b"abc\x00defghab").unwrap();

        assert_eq!(tree.find(b"def"), Some(4));
        assert_eq!(tree.find(b"ab"), Some(0));
        assert_eq!(tree.find(b"hab"), Some(8));
        assert_eq!(tree.find(b"abc\x00defghab"), Some(0));
        assert_eq!(tree.find(b"xyz"), None);
        assert_eq!(tree.find(b"abd"), None);
        assert_eq!(tree.find(b"abc\x00defghabc"), None);
        assert_eq!(tree.find(b""), Some(0));
    }

    #[test]
    fn test_find_all() {
        let text = b"abc\x00defghab";
        let tree = SuffixTree::from_sequence(text).unwrap();

        assert_eq!(tree.find_all(b"ab"), BTreeSet::from([0, 9]));
        assert_eq!(tree.find_all(b"gh"), BTreeSet::from([7]));
        assert!(tree.find_all(b"ba").is_empty());
        assert_eq!(tree.find_all(b""), brute_find_all(text, b""));
    }

    #[test]
    fn test_find_all_overlapping() {
        let text = b"aaaaa";
        let tree = SuffixTree::from_sequence(text).unwrap();
        assert_eq!(tree.find_all(b"aa"), BTreeSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn test_find_in_generalized_tree() {
        let docs = ["xxab", "abyy"].map(str::as_bytes);
        let tree = SuffixTree::build(docs).unwrap();

        let offsets = tree.find_all(b"ab");
        let located: Vec<_> = offsets.iter().filter_map(|&o| tree.locate(o)).collect();
        assert_eq!(located, vec![(0, 2), (1, 0)]);
        // Patterns never match across a sentinel
        assert_eq!(tree.find(b"abab"), None);
    }

    #[test]
    fn test_lcs() {
        let docs = ["xxxabcxxx", "adsaabc", "ytysabcrew", "qqqabcqw", "aaabc"];
        let tree = SuffixTree::build(docs.map(str::as_bytes)).unwrap();
        assert_eq!(tree.lcs(None), b"abc");

        let docs = ["xxxa", "adsaabc", "ytysabcrew", "aqqqqqqw", "aaabc"];
        let tree = SuffixTree::build(docs.map(str::as_bytes)).unwrap();
        assert_eq!(tree.lcs(None), b"a");
    }

    #[test]
    fn test_lcs_subset() {
        let docs = ["xxxabcxxx", "adsaabc", "ytysabcrew", "qqqabcqw", "aaabc"];
        let tree = SuffixTree::build(docs.map(str::as_bytes)).unwrap();

        assert_eq!(tree.lcs(Some(&[0, 3])), b"abc");
        assert_eq!(tree.lcs(Some(&[1, 4])), b"aabc");
        assert_eq!(tree.lcs(Some(&[0, 9])), b"");
    }

    #[test]
    fn test_lcs_nothing_shared() {
        let tree = SuffixTree::build(["abc", "xyz"].map(str::as_bytes)).unwrap();
        assert_eq!(tree.lcs(None), b"");
    }

    #[test]
    fn test_lcs_single_sequence() {
        // Leaves end in the sentinel, so only repeated labels qualify
        let tree = SuffixTree::from_sequence(b"abcab").unwrap();
        assert_eq!(tree.lcs(None), b"ab");
    }

    #[test]
    fn test_lrs() {
        let tree = SuffixTree::from_sequence(b"banana").unwrap();
        assert_eq!(tree.lrs(2), b"ana");
        assert_eq!(tree.lrs(3), b"a");
        assert_eq!(tree.lrs(4), b"");
    }

    #[test]
    fn test_lrs_nothing_repeats() {
        let tree = SuffixTree::from_sequence(b"abcdef").unwrap();
        assert_eq!(tree.lrs(2), b"");
    }

    #[test]
    fn test_lrs_tie_break_prefers_first_occurrence() {
        // "ab" and "cd" both repeat twice; "ab" occurs first
        let tree = SuffixTree::from_sequence(b"abxcdyabzcd").unwrap();
        assert_eq!(tree.lrs(2), b"ab");

        let tree = SuffixTree::from_sequence(b"cdxabycdzab").unwrap();
        assert_eq!(tree.lrs(2), b"cd");
    }

    #[test]
    fn test_lrs_across_sequences() {
        let tree = SuffixTree::build(["hello", "jello"].map(str::as_bytes)).unwrap();
        assert_eq!(tree.lrs(2), b"ello");
    }

    #[test]
    fn test_result_borrows_input() {
        let text = b"xyzxyz".to_vec();
        let tree = SuffixTree::from_sequence(&text).unwrap();
        let lrs = tree.lrs(2);
        assert_eq!(lrs, b"xyz");
        assert_eq!(lrs.as_ptr(), text.as_ptr());
    }

    #[test]
    fn test_locate() {
        let tree = SuffixTree::build(["ab", "cde"].map(str::as_bytes)).unwrap();
        assert_eq!(tree.locate(0), Some((0, 0)));
        assert_eq!(tree.locate(1), Some((0, 1)));
        assert_eq!(tree.locate(2), None); // sentinel
        assert_eq!(tree.locate(3), Some((1, 0)));
        assert_eq!(tree.locate(5), Some((1, 2)));
        assert_eq!(tree.locate(6), None);
        assert_eq!(tree.locate(100), None);
    }
}

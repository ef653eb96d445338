//! Runtime-tagged inputs
//!
//! [`SuffixTree`] is generic over its symbol type. A [`Corpus`] picks the
//! symbol type at runtime instead: raw bytes, or the Unicode scalar values of
//! UTF-8 text. All inputs of one corpus share the same kind.

use crate::error::{Error, Result};
use crate::pipeline::{ExtractOptions, StopReason, align_to_lines, extract_from_fragments};
use crate::tree::{SuffixTree, Symbol};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Element kind of an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Bytes,
    Text,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Bytes => write!(f, "bytes"),
            SymbolKind::Text => write!(f, "text"),
        }
    }
}

/// One borrowed input sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
}

impl Input<'_> {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Input::Bytes(_) => SymbolKind::Bytes,
            Input::Text(_) => SymbolKind::Text,
        }
    }
}

/// A substring returned by a corpus query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'c> {
    Bytes(&'c [u8]),
    Text(&'c [char]),
}

impl<'c> Fragment<'c> {
    /// Length in symbols (bytes or chars)
    pub fn len(&self) -> usize {
        match self {
            Fragment::Bytes(b) => b.len(),
            Fragment::Text(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Fragment::Bytes(_) => SymbolKind::Bytes,
            Fragment::Text(_) => SymbolKind::Text,
        }
    }

    /// Text form; invalid UTF-8 in byte fragments is replaced
    pub fn to_text(&self) -> Cow<'c, str> {
        match self {
            Fragment::Bytes(b) => String::from_utf8_lossy(b),
            Fragment::Text(t) => Cow::Owned(t.iter().collect()),
        }
    }
}

/// Substrings extracted from a corpus, with the reason the loop ended
#[derive(Debug, Clone)]
pub struct Extracted<'c> {
    pub substrings: Vec<Fragment<'c>>,
    pub stop: StopReason,
}

/// Inputs of a single kind
///
/// Text is decoded to `char`s once, so offsets and lengths of text queries
/// count scalar values rather than bytes.
#[derive(Debug, Clone)]
pub enum Corpus<'a> {
    Bytes(Vec<&'a [u8]>),
    Text(Vec<Vec<char>>),
}

impl<'a> Corpus<'a> {
    /// Collect inputs, rejecting an empty set or mixed kinds
    pub fn from_inputs<I: IntoIterator<Item = Input<'a>>>(inputs: I) -> Result<Self> {
        let mut inputs = inputs.into_iter();
        let mut corpus = match inputs.next() {
            Some(Input::Bytes(b)) => Corpus::Bytes(vec![b]),
            Some(Input::Text(t)) => Corpus::Text(vec![t.chars().collect()]),
            None => return Err(Error::InvalidInputKind("no sequences given".to_string())),
        };

        for (i, input) in inputs.enumerate() {
            match (&mut corpus, input) {
                (Corpus::Bytes(seqs), Input::Bytes(b)) => seqs.push(b),
                (Corpus::Text(seqs), Input::Text(t)) => seqs.push(t.chars().collect()),
                (held, input) => {
                    return Err(Error::InvalidInputKind(format!(
                        "input {} is {} but earlier inputs are {}",
                        i + 1,
                        input.kind(),
                        held.kind()
                    )));
                }
            }
        }
        Ok(corpus)
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Corpus::Bytes(_) => SymbolKind::Bytes,
            Corpus::Text(_) => SymbolKind::Text,
        }
    }

    /// Number of inputs
    pub fn len(&self) -> usize {
        match self {
            Corpus::Bytes(seqs) => seqs.len(),
            Corpus::Text(seqs) => seqs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Longest substring shared by every input
    pub fn lcs(&self) -> Result<Fragment<'_>> {
        match self {
            Corpus::Bytes(seqs) => {
                let tree = SuffixTree::build(seqs.iter().copied())?;
                Ok(Fragment::Bytes(tree.lcs(None)))
            }
            Corpus::Text(seqs) => {
                let tree = SuffixTree::build(seqs.iter().map(Vec::as_slice))?;
                Ok(Fragment::Text(tree.lcs(None)))
            }
        }
    }

    /// First occurrence of `pattern` as `(input index, offset)`
    pub fn find(&self, pattern: Input<'_>) -> Result<Option<(usize, usize)>> {
        Ok(self.find_all(pattern)?.into_iter().next())
    }

    /// Every occurrence of `pattern` as `(input index, offset)`, in input order
    pub fn find_all(&self, pattern: Input<'_>) -> Result<Vec<(usize, usize)>> {
        match (self, pattern) {
            (Corpus::Bytes(seqs), Input::Bytes(p)) => {
                let tree = SuffixTree::build(seqs.iter().copied())?;
                Ok(locate_all(&tree, p))
            }
            (Corpus::Text(seqs), Input::Text(p)) => {
                let tree = SuffixTree::build(seqs.iter().map(Vec::as_slice))?;
                let p: Vec<char> = p.chars().collect();
                Ok(locate_all(&tree, &p))
            }
            (corpus, pattern) => Err(Error::InvalidInputKind(format!(
                "pattern is {} but the corpus holds {}",
                pattern.kind(),
                corpus.kind()
            ))),
        }
    }

    /// Run the extraction loop over all inputs as the starting fragments.
    ///
    /// With `align_lines`, results are trimmed to whole lines afterwards.
    pub fn extract(&self, options: &ExtractOptions, align_lines: bool) -> Result<Extracted<'_>> {
        match self {
            Corpus::Bytes(seqs) => {
                let newline = align_lines.then_some(b'\n');
                let (found, stop) = extract_symbols(seqs, options, newline)?;
                Ok(Extracted {
                    substrings: found.into_iter().map(Fragment::Bytes).collect(),
                    stop,
                })
            }
            Corpus::Text(seqs) => {
                let docs: Vec<&[char]> = seqs.iter().map(Vec::as_slice).collect();
                let newline = align_lines.then_some('\n');
                let (found, stop) = extract_symbols(&docs, options, newline)?;
                Ok(Extracted {
                    substrings: found.into_iter().map(Fragment::Text).collect(),
                    stop,
                })
            }
        }
    }
}

fn locate_all<T: Symbol>(tree: &SuffixTree<'_, T>, pattern: &[T]) -> Vec<(usize, usize)> {
    // Word offsets ascend with input index, so the order is preserved
    tree.find_all(pattern)
        .into_iter()
        .filter_map(|offset| tree.locate(offset))
        .collect()
}

fn extract_symbols<'s, T: Symbol>(
    documents: &[&'s [T]],
    options: &ExtractOptions,
    newline: Option<T>,
) -> Result<(Vec<&'s [T]>, StopReason)> {
    let fragments: Vec<&'s [T]> = documents.iter().copied().filter(|d| !d.is_empty()).collect();
    let extraction = extract_from_fragments(fragments, options)?;
    let substrings = match newline {
        Some(newline) => align_to_lines(documents, &extraction.substrings, newline)?,
        None => extraction.substrings,
    };
    Ok((substrings, extraction.stop))
}

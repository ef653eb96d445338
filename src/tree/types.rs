//! Core types for suffix tree construction
//!
//! Symbols are the element type of the indexed sequences (raw bytes,
//! code points, ...). The tree itself works on [`Token`]s: every input symbol
//! wrapped as `Token::Sym`, plus one `Token::Sentinel` after each sequence.

use crate::error::{Error, Result};
use std::fmt;
use std::hash::Hash;

/// Arena index of a node
pub type NodeId = usize;

/// The root node always sits at index 0 of the arena
pub const ROOT: NodeId = 0;

/// Number of sentinels a default pool can hand out.
///
/// Matches the size of the three Unicode private-use ranges
/// (U+E000..=U+F8FF, U+F0000..=U+FFFFD, U+100000..=U+10FFFD).
pub const DEFAULT_SENTINEL_CAPACITY: usize = 6400 + 65534 + 65534;

/// An element type that can be indexed by a suffix tree.
///
/// `find_subslice` is used when fragments are split on an extracted
/// substring; the byte implementation goes through `memchr::memmem`.
pub trait Symbol: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Offset of the first occurrence of `needle` in `haystack`
    fn find_subslice(haystack: &[Self], needle: &[Self]) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        haystack.windows(needle.len()).position(|w| w == needle)
    }
}

impl Symbol for u8 {
    #[inline]
    fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        memchr::memmem::find(haystack, needle)
    }
}

impl Symbol for char {}
impl Symbol for u16 {}
impl Symbol for u32 {}
impl Symbol for u64 {}

/// One position of the concatenated word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token<T> {
    /// A symbol copied from an input sequence
    Sym(T),
    /// Terminator of one input sequence, unique within a build
    Sentinel(u32),
}

impl<T> Token<T> {
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Token::Sentinel(_))
    }
}

/// Hands out fresh sentinels for exactly one build.
///
/// The pool is a finite reserved range; asking for more sentinels than it
/// holds fails with [`Error::TooManySequences`].
#[derive(Debug, Clone)]
pub struct SentinelPool {
    next: u32,
    capacity: u32,
}

impl SentinelPool {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SENTINEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            next: 0,
            capacity: u32::try_from(capacity).unwrap_or(u32::MAX),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    /// Sentinels not handed out yet
    pub fn remaining(&self) -> usize {
        (self.capacity - self.next) as usize
    }

    /// Take the next unused sentinel
    pub fn next_sentinel(&mut self) -> Result<u32> {
        self.next().ok_or(Error::TooManySequences {
            capacity: self.capacity(),
        })
    }
}

impl Default for SentinelPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SentinelPool {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next >= self.capacity {
            return None;
        }
        let id = self.next;
        self.next += 1;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_exhaustion() {
        let mut pool = SentinelPool::with_capacity(2);
        assert_eq!(pool.next_sentinel(), Ok(0));
        assert_eq!(pool.next_sentinel(), Ok(1));
        assert_eq!(pool.remaining(), 0);
        assert_eq!(
            pool.next_sentinel(),
            Err(Error::TooManySequences { capacity: 2 })
        );
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(SentinelPool::new().capacity(), 137_468);
    }

    #[test]
    fn test_find_subslice() {
        assert_eq!(u8::find_subslice(b"xxabxab", b"ab"), Some(2));
        assert_eq!(u8::find_subslice(b"xxabxab", b"ba"), None);

        let hay: Vec<char> = "héllo wörld".chars().collect();
        let needle: Vec<char> = "wö".chars().collect();
        assert_eq!(char::find_subslice(&hay, &needle), Some(6));
        assert_eq!(char::find_subslice(&hay, &[]), Some(0));
        assert_eq!(u32::find_subslice(&[1, 2], &[1, 2, 3]), None);
    }

    #[test]
    fn test_sentinel_tokens_never_equal_symbols() {
        let sym: Token<u32> = Token::Sym(0);
        let sentinel: Token<u32> = Token::Sentinel(0);
        assert_ne!(sym, sentinel);
        assert!(sentinel.is_sentinel());
        assert!(!sym.is_sentinel());
    }
}

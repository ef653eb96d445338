//! Types for repeated-substring extraction

use serde::{Deserialize, Serialize};

/// Thresholds of the extraction loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Stop once the longest repeat is shorter than this (default: 2)
    pub min_substring_len: usize,
    /// Stop once the fragments hold fewer symbols than this (default: 10)
    pub min_remaining_len: usize,
    /// Stop once more than this many substrings were extracted (default: 10)
    pub max_results: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_substring_len: 2,
            min_remaining_len: 10,
            max_results: 10,
        }
    }
}

/// Why the extraction loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Fewer than `min_remaining_len` symbols left
    Exhausted,
    /// The longest repeat was empty or below `min_substring_len`
    Converged,
    /// More than `max_results` substrings collected
    ResultLimit,
}

/// Outcome of one extraction run
#[derive(Debug, Clone)]
pub struct Extraction<'a, T> {
    /// Extracted substrings in discovery order
    pub substrings: Vec<&'a [T]>,
    /// Fragments left after the last split
    pub remaining: Vec<&'a [T]>,
    pub stop: StopReason,
}

impl<T> Extraction<'_, T> {
    /// Number of extracted substrings
    pub fn count(&self) -> usize {
        self.substrings.len()
    }

    pub fn remaining_len(&self) -> usize {
        self.remaining.iter().map(|f| f.len()).sum()
    }
}

//! Line alignment of extracted substrings
//!
//! A repeat found in line-oriented text usually starts and ends mid-line.
//! Aligning trims it to the whole lines it spans, which is what line-based
//! consumers (deduplicating log viewers, text reducers) work with.

use crate::error::{Error, Result};
use crate::tree::Symbol;

/// Trim each substring to the whole lines it covers.
///
/// The first occurrence across `documents` (searched in order) is used. The
/// aligned slice starts after the first `newline` inside that occurrence and
/// ends after the last `newline` at or before its end (the symbol right after
/// the occurrence counts). Substrings without a newline, or without a
/// non-empty run of whole lines, are dropped. A substring present in no
/// document is an invariant violation.
pub fn align_to_lines<'a, T: Symbol>(
    documents: &[&'a [T]],
    substrings: &[&[T]],
    newline: T,
) -> Result<Vec<&'a [T]>> {
    let mut aligned = Vec::with_capacity(substrings.len());

    for &substring in substrings {
        if !substring.contains(&newline) {
            continue;
        }

        let (content, start) = documents
            .iter()
            .find_map(|doc| T::find_subslice(doc, substring).map(|pos| (*doc, pos)))
            .ok_or_else(|| {
                Error::invariant(format!(
                    "substring of length {} not present in the source documents",
                    substring.len()
                ))
            })?;
        let end = start + substring.len();

        let Some(first_newline) = content[start..end].iter().position(|s| *s == newline) else {
            continue;
        };
        let clean_start = start + first_newline + 1;

        let upper = end.min(content.len() - 1);
        let Some(last_newline) = content[start + 1..=upper]
            .iter()
            .rposition(|s| *s == newline)
        else {
            continue;
        };
        let clean_end = start + 1 + last_newline + 1;

        if clean_end <= clean_start {
            continue;
        }
        aligned.push(&content[clean_start..clean_end]);
    }

    Ok(aligned)
}

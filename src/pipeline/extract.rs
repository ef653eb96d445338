//! Iterative longest-repeated-substring extraction
//!
//! Each pass builds a fresh suffix tree over the current fragments, takes the
//! single longest repeat, and splits the fragments on it. Passes continue
//! until the fragments are too small, the repeat too short, or enough
//! substrings were collected. Substrings come out in discovery order, not
//! globally re-ranked.

use super::split::split_fragments;
use super::types::{ExtractOptions, Extraction, StopReason};
use crate::error::Result;
use crate::tree::{DEFAULT_MIN_OCCURRENCES, SuffixTree, Symbol};

/// Extract repeated substrings from `content`
pub fn extract_repeated_substrings<'a, T: Symbol>(
    content: &'a [T],
    options: &ExtractOptions,
) -> Result<Vec<&'a [T]>> {
    Ok(extract(content, options)?.substrings)
}

/// Extract repeated substrings, keeping the leftover fragments
pub fn extract<'a, T: Symbol>(content: &'a [T], options: &ExtractOptions) -> Result<Extraction<'a, T>> {
    extract_from_fragments(vec![content], options)
}

/// Run the extraction loop starting from an arbitrary fragment set
pub fn extract_from_fragments<'a, T: Symbol>(
    fragments: Vec<&'a [T]>,
    options: &ExtractOptions,
) -> Result<Extraction<'a, T>> {
    let mut fragments = fragments;
    let mut substrings: Vec<&'a [T]> = Vec::new();

    let stop = loop {
        let total: usize = fragments.iter().map(|f| f.len()).sum();
        if fragments.is_empty() || total < options.min_remaining_len {
            break StopReason::Exhausted;
        }

        let best = longest_repeat(&fragments)?;
        if best.is_empty() || best.len() < options.min_substring_len {
            break StopReason::Converged;
        }

        log::debug!(
            "pass {}: {} fragments, {} symbols, extracted repeat of length {}",
            substrings.len() + 1,
            fragments.len(),
            total,
            best.len()
        );

        substrings.push(best);
        fragments = split_fragments(&fragments, best)?;

        if substrings.len() > options.max_results {
            break StopReason::ResultLimit;
        }
    };

    log::debug!("extraction stopped ({stop:?}) after {} substrings", substrings.len());

    Ok(Extraction {
        substrings,
        remaining: fragments,
        stop,
    })
}

/// Longest substring that repeats within, or is shared between, fragments.
///
/// With one fragment this is the tree's LRS. With several, each fragment's
/// own LRS is tried in order, then the LCS of every fragment pair; the
/// longest wins and ties go to the first one found.
pub fn longest_repeat<'a, T: Symbol>(fragments: &[&'a [T]]) -> Result<&'a [T]> {
    let tree = SuffixTree::build(fragments.iter().copied())?;
    if fragments.len() == 1 {
        return Ok(tree.lrs(DEFAULT_MIN_OCCURRENCES));
    }

    // Every candidate below occurs at least twice in the generalized tree,
    // so its LRS length bounds them all.
    let bound = tree.lrs(DEFAULT_MIN_OCCURRENCES).len();
    let mut best: &'a [T] = &[];

    for &fragment in fragments {
        if best.len() >= bound {
            return Ok(best);
        }
        // A repeat inside a fragment is at most one symbol shorter than it
        if fragment.len() <= best.len() + 1 {
            continue;
        }
        let own = SuffixTree::from_sequence(fragment)?.lrs(DEFAULT_MIN_OCCURRENCES);
        if own.len() > best.len() {
            best = own;
        }
    }

    for i in 0..fragments.len() {
        for j in i + 1..fragments.len() {
            if best.len() >= bound {
                return Ok(best);
            }
            if fragments[i].len().min(fragments[j].len()) <= best.len() {
                continue;
            }
            let pair = [i, j];
            let shared = tree.lcs(Some(&pair[..]));
            if shared.len() > best.len() {
                best = shared;
            }
        }
    }

    Ok(best)
}

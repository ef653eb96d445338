use crate::error::{Error, Result};
use crate::tree::Symbol;

/// Split every fragment on every occurrence of `needle`.
///
/// Occurrences are taken left to right without overlap and removed; empty
/// pieces are dropped. A needle found in no fragment means the search that
/// produced it was wrong, so it is reported as an invariant violation.
pub fn split_fragments<'a, T: Symbol>(fragments: &[&'a [T]], needle: &[T]) -> Result<Vec<&'a [T]>> {
    if needle.is_empty() {
        return Err(Error::invariant("cannot split fragments on an empty substring"));
    }

    let mut pieces = Vec::with_capacity(fragments.len() + 1);
    let mut found = false;

    for &fragment in fragments {
        let mut rest = fragment;
        while let Some(pos) = T::find_subslice(rest, needle) {
            found = true;
            if pos > 0 {
                pieces.push(&rest[..pos]);
            }
            rest = &rest[pos + needle.len()..];
        }
        if !rest.is_empty() {
            pieces.push(rest);
        }
    }

    if !found {
        return Err(Error::invariant(format!(
            "extracted substring of length {} not found in any of {} fragments",
            needle.len(),
            fragments.len()
        )));
    }
    Ok(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_single() {
        let pieces = split_fragments(&[&b"fooXXbarXXbaz"[..]], b"XX").unwrap();
        assert_eq!(pieces, vec![&b"foo"[..], b"bar", b"baz"]);
    }

    #[test]
    fn test_split_drops_empty_pieces() {
        let pieces = split_fragments(&[&b"XXfooXXXXbarXX"[..]], b"XX").unwrap();
        assert_eq!(pieces, vec![&b"foo"[..], b"bar"]);

        let pieces = split_fragments(&[&b"XXXX"[..], b"keep"], b"XX").unwrap();
        assert_eq!(pieces, vec![&b"keep"[..]]);
    }

    #[test]
    fn test_split_non_overlapping() {
        // "aaa" holds one non-overlapping "aa", leaving "a"
        let pieces = split_fragments(&[&b"aaa"[..]], b"aa").unwrap();
        assert_eq!(pieces, vec![&b"a"[..]]);
    }

    #[test]
    fn test_split_keeps_fragments_without_needle() {
        let pieces = split_fragments(&[&b"abc"[..], b"xyz", b"zabcz"], b"abc").unwrap();
        assert_eq!(pieces, vec![&b"xyz"[..], b"z", b"z"]);
    }

    #[test]
    fn test_split_needle_missing() {
        let err = split_fragments(&[&b"abc"[..]], b"zz").unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));

        let err = split_fragments(&[&b"abc"[..]], b"").unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
    }

    #[test]
    fn test_split_chars() {
        let text: Vec<char> = "α-β-γ".chars().collect();
        let pieces = split_fragments(&[&text[..]], &['-']).unwrap();
        assert_eq!(pieces, vec![&['α'][..], &['β'], &['γ']]);
    }
}

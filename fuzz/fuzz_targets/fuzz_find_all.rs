#![no_main]

use libfuzzer_sys::fuzz_target;
use rept::tree::SuffixTree;
use std::collections::BTreeSet;

fuzz_target!(|input: (Vec<u8>, Vec<u8>)| {
    let (text, pattern) = input;
    let Ok(tree) = SuffixTree::from_sequence(&text) else {
        return;
    };

    let expected: BTreeSet<usize> = (0..=text.len())
        .filter(|&i| text[i..].starts_with(&pattern))
        .collect();
    assert_eq!(tree.find_all(&pattern), expected);

    let lrs = tree.lrs(2);
    if !lrs.is_empty() {
        assert!(text.windows(lrs.len()).filter(|w| *w == lrs).count() >= 2);
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;
use rept::tree::SuffixTree;

fuzz_target!(|sequences: Vec<Vec<u8>>| {
    if sequences.is_empty() || sequences.len() > 16 {
        return;
    }
    let Ok(tree) = SuffixTree::build(sequences.iter().map(Vec::as_slice)) else {
        return;
    };

    // The answer must be shared by every sequence
    let lcs = tree.lcs(None);
    if !lcs.is_empty() {
        for seq in &sequences {
            assert!(seq.windows(lcs.len()).any(|w| w == lcs));
        }
    }
});

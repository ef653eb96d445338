//! Longest-repeated-substring extraction
//!
//! Repeatedly takes the longest repeat out of a document until what is left
//! is too small or repeats nothing worth keeping.
//!
//! ```
//! use rept::pipeline::{ExtractOptions, extract_repeated_substrings};
//!
//! let log = b"GET /index.html 200\nGET /index.html 200\nPOST /login 302\nPOST /login 302\n";
//! let found = extract_repeated_substrings(log, &ExtractOptions::default()).unwrap();
//! assert_eq!(found[0], b"GET /index.html 200\n");
//! ```

pub mod extract;
pub mod lines;
pub mod split;
pub mod types;

pub use extract::{extract, extract_from_fragments, extract_repeated_substrings, longest_repeat};
pub use lines::align_to_lines;
pub use split::split_fragments;
pub use types::*;

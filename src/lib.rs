//! # rept - Longest repeated and common substrings
//!
//! rept builds suffix trees over one or more sequences and answers substring
//! queries on them: occurrence search, longest common substring across
//! sequences and longest repeated substring within them. On top of the tree
//! sits an extraction loop that repeatedly removes the longest repeat from a
//! document.
//!
//! ## Architecture
//!
//! - [`tree`] - Generalized suffix tree (McCreight construction, queries)
//! - [`pipeline`] - Iterative repeated-substring extraction
//! - [`corpus`] - Byte or text inputs chosen at runtime
//! - [`output`] - Result formatting (plain, colored, JSON)
//! - [`utils`] - Configuration, file discovery, progress bars
//!
//! ## Quick Start
//!
//! ```
//! use rept::pipeline::{ExtractOptions, extract_repeated_substrings};
//! use rept::tree::SuffixTree;
//!
//! let tree = SuffixTree::build(["hello", "jello"].map(str::as_bytes)).unwrap();
//! assert_eq!(tree.lcs(None), b"ello");
//!
//! let found = extract_repeated_substrings(b"abcabcabc-xyz-xyz", &ExtractOptions::default()).unwrap();
//! assert_eq!(found[0], b"abcabc");
//! ```
//!
//! Query results are slices of the caller's input; nothing is copied out of
//! the tree.

pub mod corpus;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod tree;
pub mod utils;

pub use corpus::{Corpus, Fragment, Input, SymbolKind};
pub use error::{Error, Result};
pub use pipeline::{ExtractOptions, extract_repeated_substrings};
pub use tree::SuffixTree;

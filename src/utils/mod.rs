//! Utilities shared by the `rept` binary.
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration file (platform config directory)
//! - [`files`] - Input discovery, memory mapping and decoding
//! - [`progress`] - Progress bars, no-op without the `progress` feature

pub mod app_data;
pub mod files;
pub mod progress;

pub use app_data::*;
pub use files::*;

//! Shared utilities.
//!
//! - [`encoding`] - keystroke packing and fixed-width integer reads
//! - [`mmap`] - read-only memory-mapped views of input files
//! - [`progress`] - progress bar shim (no-op without the `progress` feature)

pub mod encoding;
pub mod mmap;
pub mod progress;

pub use encoding::*;
pub use mmap::*;

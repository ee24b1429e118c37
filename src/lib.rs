//! # kidx - Keystroke-Index Compiler
//!
//! kidx is an offline compiler that turns a character dictionary, a
//! keyboard-mapping definition, and a phrase dictionary into compact,
//! random-access index structures consumed by an input-method lookup
//! engine.
//!
//! ## Architecture
//!
//! The pipeline runs as three stages, handing off through files:
//!
//! - [`charmap`] - chardef parsing, forward + reverse character indexes
//! - [`phrase`] - phrase dictionary expansion into sorted keyin indexes
//! - [`tree`] - prefix-tree compilation to a breadth-first record array
//! - [`format`] - binary/text encodings, shared file formats, metadata
//! - [`utils`] - keystroke packing, mmapped views, progress reporting
//!
//! ## Quick Start
//!
//! ```ignore
//! use kidx::config::Limits;
//! use kidx::format::OutputFormat;
//! use std::path::Path;
//!
//! let dir = Path::new(".");
//! let limits = Limits::default();
//!
//! kidx::charmap::build(dir, Path::new("layout.cin"), OutputFormat::Binary, &limits)?;
//! kidx::phrase::run(dir, OutputFormat::Binary, &limits)?;
//! kidx::tree::compile(dir, OutputFormat::Binary, &limits)?;
//! ```
//!
//! ## Guarantees
//!
//! The compiled tree stores each node's children as a contiguous
//! level-order range, so the lookup engine resolves any keystroke prefix
//! with O(1) child-range arithmetic per step. All stages are
//! deterministic: rerunning on unchanged inputs reproduces every output
//! byte for byte.

pub mod charmap;
pub mod config;
pub mod error;
pub mod format;
pub mod phrase;
pub mod stats;
pub mod tree;
pub mod utils;

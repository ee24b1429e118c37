//! Stage 1: keyboard-mapping compilation.
//!
//! Parses the `%chardef` block of a *.cin keyboard-mapping file and builds
//! the forward index (keystroke -> character-dictionary offset) and the
//! reverse index (character -> keystroke set) the later stages and the
//! lookup engine depend on.

pub mod builder;
pub mod parser;

pub use builder::{build, CharmapSummary};
pub use parser::WordEntry;

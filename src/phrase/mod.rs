//! Stage 2: phrase keyin expansion.
//!
//! Reads the phrase dictionary and the reverse index, merges duplicate
//! phrase texts, expands every supported phrase into all keystroke
//! sequences its characters admit, and emits the sorted sequence index,
//! the phrase list, and the raw sequence stream for the tree compiler.

pub mod dict;
pub mod expand;

pub use dict::{MergedPhrase, PhraseRecord};
pub use expand::{run, ExpandSummary};

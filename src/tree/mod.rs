//! Stage 3: phrase-tree compilation.
//!
//! Reads the raw keystroke-sequence stream, builds a prefix tree with
//! children kept in key order, numbers the nodes breadth-first, and
//! serializes fixed-size records whose child pointers are contiguous
//! node-number ranges, which lets the lookup engine walk the tree with
//! nothing but array indexing.

pub mod builder;
pub mod writer;

pub use builder::{construct_from_stream, KeyTrie};
pub use writer::{write_tree, TreeStats};

use crate::config::{Limits, KEYSEQ_FILE};
use crate::error::Result;
use crate::format::meta::{CompileMeta, TreeMeta};
use crate::format::OutputFormat;
use std::path::Path;

/// What the stage produced, also recorded in `meta.json`.
#[derive(Debug, Clone, Copy)]
pub struct TreeSummary {
    pub sequences: u32,
    pub nodes: u32,
}

/// Compile the raw sequence stream under `dir` into the phrase tree.
pub fn compile(dir: &Path, format: OutputFormat, limits: &Limits) -> Result<TreeSummary> {
    let trie = construct_from_stream(&dir.join(KEYSEQ_FILE), limits)?;
    let sequences = trie.sequences();
    let stats = write_tree(dir, &trie, format, limits)?;

    let summary = TreeSummary {
        sequences,
        nodes: stats.nodes,
    };
    let mut meta = CompileMeta::load(dir).unwrap_or_default();
    meta.tree = Some(TreeMeta {
        format,
        sequences,
        nodes: stats.nodes,
    });
    meta.store(dir)?;
    Ok(summary)
}

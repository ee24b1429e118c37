//! Compile metadata sidecar (`meta.json`).
//!
//! Each stage records what it produced; `kidx stats` reads it back. The
//! content carries no timestamps, so rerunning a stage on unchanged input
//! rewrites the file byte-identically.

use crate::config::META_FILE;
use crate::error::{CompileError, Result};
use crate::format::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub const META_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileMeta {
    pub version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charmap: Option<CharmapMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrases: Option<PhraseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<TreeMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharmapMeta {
    pub format: OutputFormat,
    /// Chardef entries parsed from the mapping file.
    pub entries: u32,
    /// Distinct characters in the reverse index.
    pub distinct_words: u32,
    /// Entries whose character is not in the dictionary (forward index only).
    pub skipped_words: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseMeta {
    pub format: OutputFormat,
    /// Records read from the phrase dictionary.
    pub records: u32,
    /// Distinct phrase texts after duplicate merging.
    pub merged: u32,
    /// Phrases dropped because a character has no keystroke.
    pub unsupported: u32,
    /// Keystroke-sequence variants emitted to the phrase list.
    pub variants: u64,
    /// Distinct keystroke sequences in the sorted index.
    pub distinct_sequences: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeMeta {
    pub format: OutputFormat,
    /// Terminated sequences read from the raw stream.
    pub sequences: u32,
    /// Serialized tree records.
    pub nodes: u32,
}

impl Default for CompileMeta {
    fn default() -> Self {
        Self {
            version: META_VERSION,
            charmap: None,
            phrases: None,
            tree: None,
        }
    }
}

impl CompileMeta {
    /// Load the sidecar, or an empty one if it does not exist yet.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(META_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let file = File::open(&path).map_err(|e| CompileError::io(&path, e))?;
        serde_json::from_reader(file).map_err(|e| CompileError::format(&path, e.to_string()))
    }

    pub fn store(&self, dir: &Path) -> Result<()> {
        let path = dir.join(META_FILE);
        let file = File::create(&path).map_err(|e| CompileError::io(&path, e))?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| CompileError::io(&path, e.into()))
    }
}

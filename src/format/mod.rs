//! Output encodings and index-file plumbing.
//!
//! Every index file exists in two encodings selected at run time: a
//! fixed-width binary form consumed by the lookup engine and a
//! line-oriented text form for debugging. Both carry identical record
//! semantics; a writer is handed its [`OutputFormat`] at construction and
//! never branches on anything else.

pub mod meta;
pub mod revindex;

use crate::error::{CompileError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Encoding of an index file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width little-endian records.
    #[default]
    Binary,
    /// One record per line, for inspection and diffing.
    Text,
}

/// An index output file: buffered writes with the file path attached to
/// every error.
pub struct OutputFile {
    path: PathBuf,
    out: BufWriter<File>,
}

impl OutputFile {
    pub fn create(path: PathBuf) -> Result<Self> {
        let file = File::create(&path).map_err(|e| CompileError::io(&path, e))?;
        Ok(Self {
            out: BufWriter::new(file),
            path,
        })
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.out
            .write_all(bytes)
            .map_err(|e| CompileError::io(&self.path, e))
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    pub fn finish(mut self) -> Result<()> {
        self.out
            .flush()
            .map_err(|e| CompileError::io(&self.path, e))
    }
}

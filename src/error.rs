//! Error types shared by every compile stage.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal conditions that abort a compile stage.
///
/// Unsupported entities (a character missing from the dictionary, a phrase
/// containing an unmapped character) are not errors: they are skipped with
/// a warning on stderr and the stage keeps going.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A required file is missing, unreadable, or unwritable.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A malformed record or block delimiter in an input file.
    #[error("{}: {detail}", file.display())]
    Format { file: PathBuf, detail: String },

    /// A fixed-capacity table or queue is full.
    #[error("{what} capacity exceeded (limit {limit})")]
    Capacity { what: &'static str, limit: usize },
}

impl CompileError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn format(file: &Path, detail: impl Into<String>) -> Self {
        Self::Format {
            file: file.to_path_buf(),
            detail: detail.into(),
        }
    }

    pub fn capacity(what: &'static str, limit: usize) -> Self {
        Self::Capacity { what, limit }
    }
}

/// Result type for compile operations.
pub type Result<T> = std::result::Result<T, CompileError>;

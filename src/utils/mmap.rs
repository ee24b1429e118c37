use crate::error::{CompileError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Acquire a read-only byte view of a file.
///
/// Dictionaries run to several hundred thousand entries, so stages read
/// them through the page cache instead of buffered I/O. No writer in this
/// crate ever touches a mapped file while it is mapped.
pub fn map_readonly(path: &Path) -> Result<Mmap> {
    let file = File::open(path).map_err(|e| CompileError::io(path, e))?;
    let map = unsafe { Mmap::map(&file) }.map_err(|e| CompileError::io(path, e))?;
    Ok(map)
}

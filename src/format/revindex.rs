//! The reverse index: character -> set of keystrokes that produce it.
//!
//! Written by the charmap stage, consumed by the phrase stage. Binary
//! records are `u8` length, word bytes, `u32` keystroke count, then that
//! many keystroke encodings; text records are one
//! `word TAB count(hex) TAB key(hex)...` line per word. Records are grouped
//! by word: each word appears exactly once.

use crate::error::{CompileError, Result};
use crate::format::{OutputFile, OutputFormat};
use crate::utils::encoding::{read_u8, read_u32_le, KeyCode};
use crate::utils::mmap::map_readonly;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One reverse-index record: a character and every keystroke producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevIndexEntry {
    pub word: String,
    pub keys: Vec<KeyCode>,
}

/// Append one record in the given encoding.
pub fn write_entry(out: &mut OutputFile, entry: &RevIndexEntry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Binary => {
            let bytes = entry.word.as_bytes();
            out.write_all(&[bytes.len() as u8])?;
            out.write_all(bytes)?;
            out.write_u32(entry.keys.len() as u32)?;
            for &key in &entry.keys {
                out.write_u32(key)?;
            }
        }
        OutputFormat::Text => {
            let mut line = format!("{}\t{:x}", entry.word, entry.keys.len());
            for &key in &entry.keys {
                line.push_str(&format!("\t{key:x}"));
            }
            line.push('\n');
            out.write_all(line.as_bytes())?;
        }
    }
    Ok(())
}

/// Load the whole reverse index into a lookup map.
pub fn read(path: &Path, format: OutputFormat) -> Result<HashMap<String, Vec<KeyCode>>> {
    let map = map_readonly(path)?;
    let mut index = HashMap::new();
    match format {
        OutputFormat::Binary => read_binary(path, &map, &mut index)?,
        OutputFormat::Text => read_text(path, &map, &mut index)?,
    }
    Ok(index)
}

fn read_binary(
    path: &Path,
    data: &[u8],
    index: &mut HashMap<String, Vec<KeyCode>>,
) -> Result<()> {
    let truncated = || CompileError::format(path, "truncated record");
    let mut rdr = data;
    while !rdr.is_empty() {
        let len = read_u8(&mut rdr).map_err(|_| truncated())? as usize;
        let mut word = vec![0u8; len];
        rdr.read_exact(&mut word).map_err(|_| truncated())?;
        let word = String::from_utf8(word)
            .map_err(|_| CompileError::format(path, "record word is not valid UTF-8"))?;
        let count = read_u32_le(&mut rdr).map_err(|_| truncated())? as usize;
        let mut keys = Vec::with_capacity(count);
        for _ in 0..count {
            keys.push(read_u32_le(&mut rdr).map_err(|_| truncated())?);
        }
        index.insert(word, keys);
    }
    Ok(())
}

fn read_text(path: &Path, data: &[u8], index: &mut HashMap<String, Vec<KeyCode>>) -> Result<()> {
    let text = std::str::from_utf8(data)
        .map_err(|_| CompileError::format(path, "index is not valid UTF-8"))?;
    for line in text.lines() {
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        let word = fields
            .next()
            .filter(|w| !w.is_empty())
            .ok_or_else(|| CompileError::format(path, format!("malformed record `{line}`")))?;
        let count = fields
            .next()
            .and_then(|c| u32::from_str_radix(c, 16).ok())
            .ok_or_else(|| CompileError::format(path, format!("malformed record `{line}`")))?;
        let keys = fields
            .map(|k| u32::from_str_radix(k, 16))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| CompileError::format(path, format!("malformed record `{line}`")))?;
        if keys.len() != count as usize {
            return Err(CompileError::format(
                path,
                format!("record `{word}' declares {count} keystrokes, has {}", keys.len()),
            ));
        }
        index.insert(word.to_string(), keys);
    }
    Ok(())
}

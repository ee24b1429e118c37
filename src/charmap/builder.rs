//! Forward- and reverse-index construction from chardef entries.
//!
//! Two sort passes over the same entry table: keystroke order gives the
//! forward index, character order gives the grouped reverse index.

use crate::charmap::parser::{self, WordEntry};
use crate::config::{Limits, CHAR_DICT_FILE, FWD_INDEX_FILE, REV_INDEX_FILE};
use crate::error::Result;
use crate::format::meta::{CharmapMeta, CompileMeta};
use crate::format::revindex::{self, RevIndexEntry};
use crate::format::{OutputFile, OutputFormat};
use crate::utils::mmap::map_readonly;
use memchr::memmem;
use std::path::Path;

/// What the stage produced, also recorded in `meta.json`.
#[derive(Debug, Clone, Copy)]
pub struct CharmapSummary {
    pub entries: u32,
    pub distinct_words: u32,
    pub skipped_words: u32,
}

/// Compile the keyboard mapping at `mapping` into the forward and reverse
/// indexes under `dir`.
pub fn build(
    dir: &Path,
    mapping: &Path,
    format: OutputFormat,
    limits: &Limits,
) -> Result<CharmapSummary> {
    let mut entries = parser::parse_mapping(mapping, limits)?;

    // Forward pass: keystroke order, ties by input position.
    entries.sort_by(|a, b| a.key.cmp(&b.key).then(a.order.cmp(&b.order)));
    let skipped_words = write_forward_index(dir, &entries, format)?;

    // Reverse pass: group every keystroke under its character.
    entries.sort_by(|a, b| {
        a.word
            .cmp(&b.word)
            .then(a.key.cmp(&b.key))
            .then(a.order.cmp(&b.order))
    });
    let distinct_words = write_reverse_index(dir, &entries, format)?;

    let summary = CharmapSummary {
        entries: entries.len() as u32,
        distinct_words,
        skipped_words,
    };
    let mut meta = CompileMeta::load(dir).unwrap_or_default();
    meta.charmap = Some(CharmapMeta {
        format,
        entries: summary.entries,
        distinct_words,
        skipped_words,
    });
    meta.store(dir)?;
    Ok(summary)
}

/// Emit one `(key, dictionary offset)` record per entry whose character is
/// present in the dictionary. Absent characters are skipped with a warning;
/// they still take part in the reverse index.
fn write_forward_index(dir: &Path, entries: &[WordEntry], format: OutputFormat) -> Result<u32> {
    let dict = map_readonly(&dir.join(CHAR_DICT_FILE))?;
    let mut out = OutputFile::create(dir.join(FWD_INDEX_FILE))?;
    let mut skipped = 0u32;
    for entry in entries {
        let Some(pos) = memmem::find(&dict, entry.word.as_bytes()) else {
            eprintln!(
                "Warning: character `{}' is not in the dictionary, ignored.",
                entry.word
            );
            skipped += 1;
            continue;
        };
        match format {
            OutputFormat::Binary => {
                out.write_u32(entry.key)?;
                out.write_i64(pos as i64)?;
            }
            OutputFormat::Text => {
                out.write_all(format!("{:x} {}\n", entry.key, pos).as_bytes())?;
            }
        }
    }
    out.finish()?;
    Ok(skipped)
}

/// Emit one grouped record per distinct character. Expects `entries` sorted
/// by word.
fn write_reverse_index(dir: &Path, entries: &[WordEntry], format: OutputFormat) -> Result<u32> {
    let mut out = OutputFile::create(dir.join(REV_INDEX_FILE))?;
    let mut distinct = 0u32;
    let mut start = 0;
    while start < entries.len() {
        let word = &entries[start].word;
        let mut end = start + 1;
        while end < entries.len() && entries[end].word == *word {
            end += 1;
        }
        let record = RevIndexEntry {
            word: word.clone(),
            keys: entries[start..end].iter().map(|e| e.key).collect(),
        };
        revindex::write_entry(&mut out, &record, format)?;
        distinct += 1;
        start = end;
    }
    out.finish()?;
    Ok(distinct)
}

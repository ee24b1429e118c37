//! `%chardef` block parsing for *.cin keyboard-mapping files.

use crate::config::Limits;
use crate::error::{CompileError, Result};
use crate::utils::encoding::{pack_keystroke, KeyCode};
use std::path::Path;

const CHARDEF: &str = "%chardef";
const BEGIN: &str = "begin";
const END: &str = "end";

/// A keystroke is at most 4 input bytes; `pack_keystroke` cannot hold more.
const MAX_KEYSTROKE_BYTES: usize = 4;
/// A chardef character is a short byte span, typically one codepoint.
const MAX_WORD_BYTES: usize = 8;

/// One `(keystroke, character)` pair from the chardef block.
#[derive(Debug, Clone)]
pub struct WordEntry {
    pub key: KeyCode,
    /// Position in the input, used to break sort ties.
    pub order: u32,
    pub word: String,
}

/// A *.cin directive line may carry a comment after a TAB.
fn clear_comment(line: &str) -> &str {
    match line.find('\t') {
        Some(at) => &line[..at],
        None => line,
    }
}

fn is_marker(line: &str, keyword: &str) -> bool {
    let mut tokens = clear_comment(line).split_whitespace();
    tokens.next() == Some(CHARDEF) && tokens.next() == Some(keyword)
}

/// Parse the chardef entries of the mapping file at `path`.
pub fn parse_mapping(path: &Path, limits: &Limits) -> Result<Vec<WordEntry>> {
    let raw = std::fs::read(path).map_err(|e| CompileError::io(path, e))?;
    let text = std::str::from_utf8(&raw)
        .map_err(|_| CompileError::format(path, "mapping file is not valid UTF-8"))?;
    parse_mapping_str(text, path, limits)
}

/// Parse chardef entries from mapping-file text. `origin` names the source
/// in diagnostics.
pub fn parse_mapping_str(text: &str, origin: &Path, limits: &Limits) -> Result<Vec<WordEntry>> {
    let mut lines = text.lines();

    // Header lines up to the opening marker carry layout metadata this
    // stage does not interpret.
    loop {
        match lines.next() {
            Some(line) if is_marker(line, BEGIN) => break,
            Some(_) => continue,
            None => {
                return Err(CompileError::format(
                    origin,
                    format!("no `{CHARDEF} {BEGIN}` line"),
                ));
            }
        }
    }

    let mut entries: Vec<WordEntry> = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.starts_with('%') {
            if !is_marker(line, END) {
                return Err(CompileError::format(
                    origin,
                    format!("`{CHARDEF}` block ends with `{}`, expected `{CHARDEF} {END}`", line.trim_end()),
                ));
            }
            closed = true;
            break;
        }
        let mut tokens = line.split_whitespace();
        let Some(keystroke) = tokens.next() else {
            continue; // empty lines are ignored
        };
        let Some(word) = tokens.next() else {
            return Err(CompileError::format(
                origin,
                format!("missing character after keystroke `{keystroke}`"),
            ));
        };
        if keystroke.len() > MAX_KEYSTROKE_BYTES {
            return Err(CompileError::format(
                origin,
                format!("keystroke too long: `{keystroke}`"),
            ));
        }
        if word.len() > MAX_WORD_BYTES {
            return Err(CompileError::format(
                origin,
                format!("character too long: `{word}`"),
            ));
        }
        if entries.len() == limits.max_words {
            return Err(CompileError::capacity("chardef table", limits.max_words));
        }
        let key = pack_keystroke(keystroke.as_bytes());
        if key == 0 {
            // 0 is the sequence terminator; no real key may encode to it.
            return Err(CompileError::format(
                origin,
                format!("keystroke `{}` packs to the reserved value 0", keystroke.escape_default()),
            ));
        }
        entries.push(WordEntry {
            key,
            order: entries.len() as u32,
            word: word.to_string(),
        });
    }

    if !closed {
        return Err(CompileError::format(
            origin,
            format!("`{CHARDEF}` block is not closed by `{CHARDEF} {END}`"),
        ));
    }
    if entries.is_empty() {
        return Err(CompileError::format(origin, format!("empty `{CHARDEF}` block")));
    }
    Ok(entries)
}

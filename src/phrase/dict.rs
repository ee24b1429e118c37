//! Phrase dictionary decoding and duplicate-run merging.

use crate::config::{Limits, MAX_SEQ_KEYS, PHRASE_DICT_FILE};
use crate::error::{CompileError, Result};
use crate::format::OutputFormat;
use crate::utils::encoding::{read_i32_le, KeyCode};
use crate::utils::mmap::map_readonly;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// One record of the phrase dictionary.
#[derive(Debug, Clone)]
pub struct PhraseRecord {
    pub text: String,
    pub freq: i32,
    /// Byte offset of the record in the dictionary file. The phrase list
    /// refers back to the dictionary through these offsets.
    pub pos: i64,
    /// Length in codepoints.
    pub chars: usize,
}

/// One distinct phrase text after duplicate merging, with the keystroke
/// options of each of its characters.
#[derive(Debug, Clone)]
pub struct MergedPhrase {
    pub freq: i32,
    pub pos: i64,
    /// Keystroke alternatives per character position.
    pub options: Vec<Vec<KeyCode>>,
    /// Product of the option-list sizes.
    pub variants: usize,
}

pub struct MergeOutcome {
    pub merged: Vec<MergedPhrase>,
    pub unsupported: u32,
    pub total_variants: usize,
}

/// Decode the phrase dictionary under `dir`.
pub fn read_records(dir: &Path, format: OutputFormat, limits: &Limits) -> Result<Vec<PhraseRecord>> {
    let path = dir.join(PHRASE_DICT_FILE);
    let map = map_readonly(&path)?;
    match format {
        OutputFormat::Binary => read_binary(&path, &map, limits),
        OutputFormat::Text => read_text(&path, &map, limits),
    }
}

fn validated(path: &Path, text: String, freq: i32, pos: i64) -> Result<PhraseRecord> {
    let chars = text.chars().count();
    if chars > MAX_SEQ_KEYS {
        return Err(CompileError::format(
            path,
            format!("phrase `{text}' is longer than {MAX_SEQ_KEYS} characters"),
        ));
    }
    Ok(PhraseRecord {
        text,
        freq,
        pos,
        chars,
    })
}

fn read_binary(path: &Path, data: &[u8], limits: &Limits) -> Result<Vec<PhraseRecord>> {
    let truncated = || CompileError::format(path, "truncated record");
    let mut records = Vec::new();
    let mut rdr = data;
    while !rdr.is_empty() {
        let pos = (data.len() - rdr.len()) as i64;
        let len = rdr[0] as usize;
        rdr = &rdr[1..];
        let mut text = vec![0u8; len];
        rdr.read_exact(&mut text).map_err(|_| truncated())?;
        let text = String::from_utf8(text)
            .map_err(|_| CompileError::format(path, "phrase text is not valid UTF-8"))?;
        let freq = read_i32_le(&mut rdr).map_err(|_| truncated())?;
        if records.len() == limits.max_phrases {
            return Err(CompileError::capacity("phrase table", limits.max_phrases));
        }
        records.push(validated(path, text, freq, pos)?);
    }
    Ok(records)
}

fn read_text(path: &Path, data: &[u8], limits: &Limits) -> Result<Vec<PhraseRecord>> {
    let text = std::str::from_utf8(data)
        .map_err(|_| CompileError::format(path, "dictionary is not valid UTF-8"))?;
    let mut records = Vec::new();
    let mut offset = 0usize;
    for line in text.split_inclusive('\n') {
        let pos = offset as i64;
        offset += line.len();
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(phrase), Some(freq)) = (tokens.next(), tokens.next()) else {
            return Err(CompileError::format(
                path,
                format!("malformed record `{line}`"),
            ));
        };
        let freq: i32 = freq
            .parse()
            .map_err(|_| CompileError::format(path, format!("bad frequency in `{line}`")))?;
        if records.len() == limits.max_phrases {
            return Err(CompileError::capacity("phrase table", limits.max_phrases));
        }
        records.push(validated(path, phrase.to_string(), freq, pos)?);
    }
    Ok(records)
}

/// Merge maximal runs of identical phrase text and resolve each character
/// against the reverse index. Expects `records` sorted by `(text, freq)`.
///
/// The merged frequency of a run is the sum of its frequencies; for
/// phrases spanning more than one character the sum is replaced by the
/// rounded arithmetic mean over the run length, so a phrase's weight does
/// not scale with how many input records happened to define it.
/// Single-character phrases keep the plain sum.
pub fn merge_records(
    records: &[PhraseRecord],
    rev_index: &HashMap<String, Vec<KeyCode>>,
) -> MergeOutcome {
    let mut merged = Vec::new();
    let mut unsupported = 0u32;
    let mut total_variants = 0usize;

    let mut start = 0;
    while start < records.len() {
        let head = &records[start];
        let mut end = start + 1;
        while end < records.len() && records[end].text == head.text {
            end += 1;
        }
        let run = end - start;
        let sum: i64 = records[start..end].iter().map(|r| i64::from(r.freq)).sum();
        let freq = if head.chars > 1 {
            (sum as f64 / run as f64).round() as i32
        } else {
            sum as i32
        };

        let mut options = Vec::with_capacity(head.chars);
        let mut buf = [0u8; 4];
        let mut supported = true;
        for ch in head.text.chars() {
            let word: &str = ch.encode_utf8(&mut buf);
            match rev_index.get(word) {
                Some(keys) => options.push(keys.clone()),
                None => {
                    supported = false;
                    break;
                }
            }
        }

        if supported {
            let variants = options.iter().map(|keys| keys.len()).product();
            total_variants += variants;
            merged.push(MergedPhrase {
                freq,
                pos: head.pos,
                options,
                variants,
            });
        } else {
            eprintln!(
                "Warning: phrase `{}' contains an unmapped character, skipped.",
                head.text
            );
            unsupported += 1;
        }
        start = end;
    }

    MergeOutcome {
        merged,
        unsupported,
        total_variants,
    }
}

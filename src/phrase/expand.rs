//! Cartesian expansion of phrases into keystroke sequences, and the sorted
//! emit of the sequence index, phrase list, and raw sequence stream.

use crate::config::{Limits, KEYSEQ_FILE, MAX_SEQ_KEYS, PHRASE_LIST_FILE, REV_INDEX_FILE, SEQ_INDEX_FILE};
use crate::error::Result;
use crate::format::meta::{CompileMeta, PhraseMeta};
use crate::format::{revindex, OutputFile, OutputFormat};
use crate::phrase::dict::{self, MergedPhrase};
use crate::utils::encoding::KeyCode;
use crate::utils::progress::{ProgressBar, ProgressStyle};
use std::path::Path;

/// One concrete keystroke sequence for one merged phrase. `keys` is
/// zero-padded, so tuple comparison orders sequences with a shorter prefix
/// first.
#[derive(Debug, Clone, Copy)]
struct PhraseVariant {
    keys: [KeyCode; MAX_SEQ_KEYS],
    phrase: u32,
}

/// What the stage produced, also recorded in `meta.json`.
#[derive(Debug, Clone, Copy)]
pub struct ExpandSummary {
    pub records: u32,
    pub merged: u32,
    pub unsupported: u32,
    pub variants: u64,
    pub distinct_sequences: u32,
}

/// Expand the phrase dictionary under `dir` against its reverse index.
pub fn run(dir: &Path, format: OutputFormat, limits: &Limits) -> Result<ExpandSummary> {
    let mut records = dict::read_records(dir, format, limits)?;
    let record_count = records.len() as u32;

    // Duplicate texts become contiguous runs.
    records.sort_unstable_by(|a, b| a.text.cmp(&b.text).then(a.freq.cmp(&b.freq)));

    let rev_index = revindex::read(&dir.join(REV_INDEX_FILE), format)?;
    let outcome = dict::merge_records(&records, &rev_index);
    drop(records);

    let mut variants = expand_variants(&outcome.merged, outcome.total_variants);
    variants.sort_unstable_by(|a, b| {
        a.keys.cmp(&b.keys).then_with(|| {
            outcome.merged[a.phrase as usize]
                .freq
                .cmp(&outcome.merged[b.phrase as usize].freq)
        })
    });

    let distinct_sequences = write_outputs(dir, format, &outcome.merged, &variants)?;

    let summary = ExpandSummary {
        records: record_count,
        merged: outcome.merged.len() as u32,
        unsupported: outcome.unsupported,
        variants: variants.len() as u64,
        distinct_sequences,
    };
    let mut meta = CompileMeta::load(dir).unwrap_or_default();
    meta.phrases = Some(PhraseMeta {
        format,
        records: summary.records,
        merged: summary.merged,
        unsupported: summary.unsupported,
        variants: summary.variants,
        distinct_sequences: summary.distinct_sequences,
    });
    meta.store(dir)?;
    Ok(summary)
}

/// Enumerate the full Cartesian product of per-character keystroke options
/// for every merged phrase.
///
/// Enumeration drives an odometer of per-position cursors rather than
/// recursing: position `w` holds one chosen keystroke; advancing rolls the
/// rightmost cursor and carries left. Stack use stays flat no matter how
/// long the phrase is.
fn expand_variants(merged: &[MergedPhrase], total: usize) -> Vec<PhraseVariant> {
    let mut variants = Vec::with_capacity(total);

    let progress = ProgressBar::new(merged.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
            .unwrap(),
    );
    progress.set_message("expanding keyins");

    for (index, phrase) in merged.iter().enumerate() {
        let positions = phrase.options.len();
        let mut cursors = [0usize; MAX_SEQ_KEYS];
        let mut keys: [KeyCode; MAX_SEQ_KEYS] = [0; MAX_SEQ_KEYS];
        for (w, opts) in phrase.options.iter().enumerate() {
            keys[w] = opts[0];
        }

        'emit: loop {
            variants.push(PhraseVariant {
                keys,
                phrase: index as u32,
            });
            let mut w = positions;
            loop {
                if w == 0 {
                    break 'emit;
                }
                w -= 1;
                cursors[w] += 1;
                if cursors[w] < phrase.options[w].len() {
                    keys[w] = phrase.options[w][cursors[w]];
                    continue 'emit;
                }
                cursors[w] = 0;
                keys[w] = phrase.options[w][0];
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    debug_assert_eq!(variants.len(), total);
    variants
}

/// Sequential scan over the sorted variants. Each new distinct sequence
/// opens a sorted-index entry (the current phrase-list offset) and a raw
/// stream line; every variant appends its `(dictionary offset, frequency)`
/// pair to the phrase list. A final sentinel offset closes the index so
/// consumers can range-scan `[index[k], index[k+1])`.
fn write_outputs(
    dir: &Path,
    format: OutputFormat,
    merged: &[MergedPhrase],
    variants: &[PhraseVariant],
) -> Result<u32> {
    let mut seq_index = OutputFile::create(dir.join(SEQ_INDEX_FILE))?;
    let mut phrase_list = OutputFile::create(dir.join(PHRASE_LIST_FILE))?;
    let mut raw_stream = OutputFile::create(dir.join(KEYSEQ_FILE))?;

    let mut list_offset: i64 = 0;
    let mut distinct = 0u32;
    for (i, variant) in variants.iter().enumerate() {
        if i == 0 || variant.keys != variants[i - 1].keys {
            write_seq_offset(&mut seq_index, format, list_offset)?;

            let mut line = String::new();
            for &key in variant.keys.iter().take_while(|&&key| key != 0) {
                line.push_str(&format!("{key} "));
            }
            line.push_str("0\n");
            raw_stream.write_all(line.as_bytes())?;
            distinct += 1;
        }

        let phrase = &merged[variant.phrase as usize];
        match format {
            OutputFormat::Binary => {
                phrase_list.write_i64(phrase.pos)?;
                phrase_list.write_i32(phrase.freq)?;
                list_offset += 12;
            }
            OutputFormat::Text => {
                let line = format!("{} {}\n", phrase.pos, phrase.freq);
                phrase_list.write_all(line.as_bytes())?;
                list_offset += line.len() as i64;
            }
        }
    }
    write_seq_offset(&mut seq_index, format, list_offset)?;

    seq_index.finish()?;
    phrase_list.finish()?;
    raw_stream.finish()?;
    Ok(distinct)
}

fn write_seq_offset(out: &mut OutputFile, format: OutputFormat, offset: i64) -> Result<()> {
    match format {
        OutputFormat::Binary => out.write_i32(offset as i32),
        OutputFormat::Text => out.write_all(format!("{offset}\n").as_bytes()),
    }
}

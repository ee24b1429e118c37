//! End-to-end pipeline tests over small fixture dictionaries.
//!
//! Each test compiles a working directory from scratch: a character
//! dictionary, a keyboard mapping whose chardef block maps `a`/`b` to X
//! (deliberately ambiguous), `c` to Y and `d` to Z, and a phrase
//! dictionary with duplicate texts and one unsupported phrase.

use kidx::config::{
    Limits, CHAR_DICT_FILE, FWD_INDEX_FILE, KEYSEQ_FILE, KEY_TREE_FILE, PHRASE_DICT_FILE,
    PHRASE_LIST_FILE, SEQ_INDEX_FILE,
};
use kidx::format::OutputFormat;
use kidx::{charmap, phrase, tree};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MAPPING: &str = "%gen_inp\n%ename demo\n%chardef begin\na X\nb X\nc Y\nd Z\n%chardef end\n";

/// (text, freq) content of the phrase dictionary. "XY" appears three times
/// to exercise frequency merging; "XQ" contains an unmapped character.
const PHRASES: &[(&str, i32)] = &[("XY", 10), ("XY", 20), ("XY", 30), ("Z", 7), ("XQ", 9)];

fn write_phrase_dict(path: &Path, format: OutputFormat, phrases: &[(&str, i32)]) {
    match format {
        OutputFormat::Binary => {
            let mut data = Vec::new();
            for &(text, freq) in phrases {
                data.push(text.len() as u8);
                data.extend_from_slice(text.as_bytes());
                data.extend_from_slice(&freq.to_le_bytes());
            }
            fs::write(path, data).unwrap();
        }
        OutputFormat::Text => {
            let mut data = String::new();
            for &(text, freq) in phrases {
                data.push_str(&format!("{text}\t{freq}\n"));
            }
            fs::write(path, data).unwrap();
        }
    }
}

fn setup(format: OutputFormat, phrases: &[(&str, i32)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CHAR_DICT_FILE), b"X\tY\tZ\t").unwrap();
    let mapping = dir.path().join("demo.cin");
    fs::write(&mapping, MAPPING).unwrap();
    write_phrase_dict(&dir.path().join(PHRASE_DICT_FILE), format, phrases);
    (dir, mapping)
}

fn compile_all(dir: &Path, mapping: &Path, format: OutputFormat) {
    let limits = Limits::default();
    charmap::build(dir, mapping, format, &limits).unwrap();
    phrase::run(dir, format, &limits).unwrap();
    tree::compile(dir, format, &limits).unwrap();
}

#[test]
fn full_pipeline_text() {
    let (dir, mapping) = setup(OutputFormat::Text, PHRASES);
    compile_all(dir.path(), &mapping, OutputFormat::Text);

    // Three duplicate "XY" records average to freq 20; X is ambiguous, so
    // the phrase expands to two sequences. "XQ" is dropped.
    let raw = fs::read_to_string(dir.path().join(KEYSEQ_FILE)).unwrap();
    assert_eq!(raw, "97 99 0\n98 99 0\n100 0\n");

    // "XY" run head sits at offset 0, the "Z" record at 18.
    let list = fs::read_to_string(dir.path().join(PHRASE_LIST_FILE)).unwrap();
    assert_eq!(list, "0 20\n0 20\n18 7\n");

    let offsets: Vec<i64> = fs::read_to_string(dir.path().join(SEQ_INDEX_FILE))
        .unwrap()
        .lines()
        .map(|l| l.parse().unwrap())
        .collect();
    assert_eq!(offsets, vec![0, 5, 10, 15]);

    let tree_records: Vec<Vec<i64>> = fs::read_to_string(dir.path().join(KEY_TREE_FILE))
        .unwrap()
        .lines()
        .map(|l| l.split(' ').map(|t| t.parse().unwrap()).collect())
        .collect();
    assert_eq!(
        tree_records,
        vec![
            vec![0, -1, 1, 3],
            vec![97, -1, 4, 4],
            vec![98, -1, 5, 5],
            vec![100, 2, -1, -1],
            vec![99, 0, -1, -1],
            vec![99, 1, -1, -1],
        ]
    );
}

#[test]
fn full_pipeline_binary() {
    let (dir, mapping) = setup(OutputFormat::Binary, PHRASES);
    compile_all(dir.path(), &mapping, OutputFormat::Binary);

    // The raw stream is textual in either mode.
    let raw = fs::read_to_string(dir.path().join(KEYSEQ_FILE)).unwrap();
    assert_eq!(raw, "97 99 0\n98 99 0\n100 0\n");

    let list = fs::read(dir.path().join(PHRASE_LIST_FILE)).unwrap();
    let records: Vec<(i64, i32)> = list
        .chunks_exact(12)
        .map(|c| {
            (
                i64::from_le_bytes(c[0..8].try_into().unwrap()),
                i32::from_le_bytes(c[8..12].try_into().unwrap()),
            )
        })
        .collect();
    // Binary phrase records are 7 bytes for "XY", so "Z" starts at 21.
    assert_eq!(records, vec![(0, 20), (0, 20), (21, 7)]);

    let offsets: Vec<i32> = fs::read(dir.path().join(SEQ_INDEX_FILE))
        .unwrap()
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes(c.try_into().unwrap()))
        .collect();
    assert_eq!(offsets, vec![0, 12, 24, 36]);

    let tree_data = fs::read(dir.path().join(KEY_TREE_FILE)).unwrap();
    assert_eq!(tree_data.len(), 6 * 16);
    let root_begin = i32::from_le_bytes(tree_data[8..12].try_into().unwrap());
    let root_end = i32::from_le_bytes(tree_data[12..16].try_into().unwrap());
    assert_eq!((root_begin, root_end), (1, 3));
}

#[test]
fn forward_index_encodings_agree() {
    let limits = Limits::default();

    let (text_dir, mapping) = setup(OutputFormat::Text, PHRASES);
    charmap::build(text_dir.path(), &mapping, OutputFormat::Text, &limits).unwrap();
    let from_text: Vec<(u32, i64)> = fs::read_to_string(text_dir.path().join(FWD_INDEX_FILE))
        .unwrap()
        .lines()
        .map(|l| {
            let (key, pos) = l.split_once(' ').unwrap();
            (u32::from_str_radix(key, 16).unwrap(), pos.parse().unwrap())
        })
        .collect();

    let (bin_dir, mapping) = setup(OutputFormat::Binary, PHRASES);
    charmap::build(bin_dir.path(), &mapping, OutputFormat::Binary, &limits).unwrap();
    let data = fs::read(bin_dir.path().join(FWD_INDEX_FILE)).unwrap();
    let from_binary: Vec<(u32, i64)> = data
        .chunks_exact(12)
        .map(|c| {
            (
                u32::from_le_bytes(c[0..4].try_into().unwrap()),
                i64::from_le_bytes(c[4..12].try_into().unwrap()),
            )
        })
        .collect();

    assert_eq!(from_text, from_binary);
    assert_eq!(from_text, vec![(0x61, 0), (0x62, 0), (0x63, 2), (0x64, 4)]);
}

#[test]
fn sorted_index_ranges_partition_phrase_list() {
    let (dir, mapping) = setup(OutputFormat::Binary, PHRASES);
    compile_all(dir.path(), &mapping, OutputFormat::Binary);

    let offsets: Vec<i64> = fs::read(dir.path().join(SEQ_INDEX_FILE))
        .unwrap()
        .chunks_exact(4)
        .map(|c| i64::from(i32::from_le_bytes(c.try_into().unwrap())))
        .collect();
    let list_len = fs::metadata(dir.path().join(PHRASE_LIST_FILE)).unwrap().len() as i64;

    // Strictly increasing offsets, starting at 0 and closing at the file
    // length: adjacent pairs cover the whole list with no gap or overlap.
    assert_eq!(*offsets.first().unwrap(), 0);
    assert_eq!(*offsets.last().unwrap(), list_len);
    assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    assert!(offsets.iter().all(|&o| o % 12 == 0));
}

#[test]
fn unsupported_phrases_produce_no_output() {
    let (dir, mapping) = setup(OutputFormat::Text, &[("XQ", 9), ("QQ", 3)]);
    compile_all(dir.path(), &mapping, OutputFormat::Text);

    assert_eq!(fs::read_to_string(dir.path().join(KEYSEQ_FILE)).unwrap(), "");
    assert_eq!(
        fs::read_to_string(dir.path().join(PHRASE_LIST_FILE)).unwrap(),
        ""
    );
    // Only the sentinel remains.
    assert_eq!(
        fs::read_to_string(dir.path().join(SEQ_INDEX_FILE)).unwrap(),
        "0\n"
    );
}

#[test]
fn reruns_are_byte_identical() {
    for format in [OutputFormat::Binary, OutputFormat::Text] {
        let (dir, mapping) = setup(format, PHRASES);
        compile_all(dir.path(), &mapping, format);

        let outputs = [
            FWD_INDEX_FILE,
            kidx::config::REV_INDEX_FILE,
            SEQ_INDEX_FILE,
            PHRASE_LIST_FILE,
            KEYSEQ_FILE,
            KEY_TREE_FILE,
            kidx::config::META_FILE,
        ];
        let first: Vec<Vec<u8>> = outputs
            .iter()
            .map(|f| fs::read(dir.path().join(f)).unwrap())
            .collect();

        compile_all(dir.path(), &mapping, format);
        for (file, before) in outputs.iter().zip(&first) {
            let after = fs::read(dir.path().join(file)).unwrap();
            assert_eq!(&after, before, "{file} changed across reruns");
        }
    }
}

//! Capacity limits and the well-known file names of the pipeline.
//!
//! Every stage resolves its inputs and outputs against a working directory
//! (`--dir`); only the keyboard-mapping file is passed explicitly.

/// Character dictionary the forward index points into (input).
pub const CHAR_DICT_FILE: &str = "chars.dat";
/// Phrase dictionary: `(text, frequency)` records (input).
pub const PHRASE_DICT_FILE: &str = "phrases.dat";
/// Forward index: `(key, dictionary offset)` sorted by key.
pub const FWD_INDEX_FILE: &str = "fwd_index.dat";
/// Reverse index: character -> keystroke set.
pub const REV_INDEX_FILE: &str = "rev_index.dat";
/// Sorted sequence index: one phrase-list offset per distinct sequence.
pub const SEQ_INDEX_FILE: &str = "seq_index.dat";
/// Phrase list: `(dictionary offset, frequency)` per variant.
pub const PHRASE_LIST_FILE: &str = "phrase_list.dat";
/// Raw keystroke-sequence stream handed to the tree compiler. Always text.
pub const KEYSEQ_FILE: &str = "keyseq.txt";
/// Compiled phrase tree, breadth-first.
pub const KEY_TREE_FILE: &str = "key_tree.dat";
/// Compile metadata sidecar.
pub const META_FILE: &str = "meta.json";

/// Longest keystroke sequence a phrase may expand to. A dictionary record
/// with more characters than this cannot be represented and is rejected.
pub const MAX_SEQ_KEYS: usize = 9;

/// Fixed working-set ceilings, sized for expected corpus scale. There is no
/// dynamic resizing: exceeding a ceiling aborts the stage.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Chardef entries accepted from the keyboard mapping.
    pub max_words: usize,
    /// Records accepted from the phrase dictionary.
    pub max_phrases: usize,
    /// Trie nodes, which also bounds the breadth-first queue.
    pub max_nodes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_words: 60_000,
            max_phrases: 420_000,
            max_nodes: 6_400_000,
        }
    }
}

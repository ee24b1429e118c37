//! Arena prefix tree over keystroke sequences.

use crate::config::Limits;
use crate::error::{CompileError, Result};
use crate::utils::encoding::KeyCode;
use std::path::Path;

/// One trie node. The arena owns every node; `children` holds arena
/// indices ordered by child key ascending.
#[derive(Debug)]
pub struct TrieNode {
    pub key: KeyCode,
    /// Ordinal of the sequence terminating here, -1 if none.
    pub phrase_id: i32,
    children: Vec<u32>,
}

/// Prefix tree backed by a node arena. Index 0 is the root (reserved key
/// 0); nodes are never freed individually.
pub struct KeyTrie {
    nodes: Vec<TrieNode>,
    max_nodes: usize,
    sequences: u32,
}

impl KeyTrie {
    pub fn new(max_nodes: usize) -> Self {
        Self {
            nodes: vec![TrieNode {
                key: 0,
                phrase_id: -1,
                children: Vec::new(),
            }],
            max_nodes,
            sequences: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].children.is_empty()
    }

    /// Terminated sequences inserted so far.
    pub fn sequences(&self) -> u32 {
        self.sequences
    }

    pub fn node(&self, index: u32) -> &TrieNode {
        &self.nodes[index as usize]
    }

    pub fn children(&self, index: u32) -> &[u32] {
        &self.nodes[index as usize].children
    }

    /// Insert one keystroke sequence; the terminal node takes the next
    /// sequence ordinal as its phrase id.
    pub fn insert(&mut self, keys: &[KeyCode]) -> Result<()> {
        let mut current = 0u32;
        for &key in keys {
            current = self.step(current, key)?;
        }
        self.nodes[current as usize].phrase_id = self.sequences as i32;
        self.sequences += 1;
        Ok(())
    }

    /// Descend from `parent` along `key`, creating the child if absent.
    /// The child list is scanned linearly; a new child is spliced in before
    /// the first sibling whose key is not less than it.
    fn step(&mut self, parent: u32, key: KeyCode) -> Result<u32> {
        let mut at = self.nodes[parent as usize].children.len();
        for (i, &child) in self.nodes[parent as usize].children.iter().enumerate() {
            let child_key = self.nodes[child as usize].key;
            if child_key == key {
                return Ok(child);
            }
            if child_key > key {
                at = i;
                break;
            }
        }
        if self.nodes.len() == self.max_nodes {
            return Err(CompileError::capacity("tree node arena", self.max_nodes));
        }
        let node = self.nodes.len() as u32;
        self.nodes.push(TrieNode {
            key,
            phrase_id: -1,
            children: Vec::new(),
        });
        self.nodes[parent as usize].children.insert(at, node);
        Ok(node)
    }
}

/// Build the trie from the raw sequence stream at `path`: whitespace
/// separated unsigned keys, each sequence terminated by `0`.
pub fn construct_from_stream(path: &Path, limits: &Limits) -> Result<KeyTrie> {
    let text = std::fs::read_to_string(path).map_err(|e| CompileError::io(path, e))?;
    let mut trie = KeyTrie::new(limits.max_nodes);
    let mut sequence: Vec<KeyCode> = Vec::new();
    for token in text.split_ascii_whitespace() {
        let key: KeyCode = token
            .parse()
            .map_err(|_| CompileError::format(path, format!("bad keystroke token `{token}`")))?;
        if key == 0 {
            trie.insert(&sequence)?;
            sequence.clear();
        } else {
            sequence.push(key);
        }
    }
    if !sequence.is_empty() {
        return Err(CompileError::format(path, "unterminated key sequence"));
    }
    Ok(trie)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie_of(sequences: &[&[KeyCode]]) -> KeyTrie {
        let mut trie = KeyTrie::new(1000);
        for keys in sequences {
            trie.insert(keys).unwrap();
        }
        trie
    }

    #[test]
    fn test_shared_prefixes_share_nodes() {
        let trie = trie_of(&[&[1, 2], &[1, 3], &[4]]);
        // root + 1 + 2 + 3 + 4
        assert_eq!(trie.len(), 5);
        assert_eq!(trie.sequences(), 3);
        assert_eq!(trie.children(0).len(), 2);
    }

    #[test]
    fn test_children_kept_sorted_by_key() {
        let trie = trie_of(&[&[9], &[3], &[7], &[1]]);
        let keys: Vec<KeyCode> = trie
            .children(0)
            .iter()
            .map(|&c| trie.node(c).key)
            .collect();
        assert_eq!(keys, vec![1, 3, 7, 9]);
    }

    #[test]
    fn test_terminal_ids_follow_input_order() {
        let trie = trie_of(&[&[1, 2], &[1], &[2]]);
        let n1 = trie.children(0)[0];
        let n2 = trie.children(0)[1];
        let n12 = trie.children(n1)[0];
        assert_eq!(trie.node(n12).phrase_id, 0);
        assert_eq!(trie.node(n1).phrase_id, 1);
        assert_eq!(trie.node(n2).phrase_id, 2);
    }

    #[test]
    fn test_empty_sequence_marks_root() {
        let trie = trie_of(&[&[]]);
        assert_eq!(trie.node(0).phrase_id, 0);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_node_capacity() {
        let mut trie = KeyTrie::new(2);
        assert!(trie.insert(&[1]).is_ok());
        let err = trie.insert(&[2]).unwrap_err();
        assert!(matches!(err, CompileError::Capacity { .. }));
    }

    #[test]
    fn test_stream_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyseq.txt");
        std::fs::write(&path, "1 2 0\n1 3 0\n4 0\n").unwrap();
        let trie = construct_from_stream(&path, &Limits::default()).unwrap();
        assert_eq!(trie.sequences(), 3);
        assert_eq!(trie.len(), 5);
    }

    #[test]
    fn test_unterminated_stream_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyseq.txt");
        std::fs::write(&path, "1 2 0\n3 4").unwrap();
        assert!(construct_from_stream(&path, &Limits::default()).is_err());
    }

    #[test]
    fn test_bad_token_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keyseq.txt");
        std::fs::write(&path, "1 x 0\n").unwrap();
        assert!(construct_from_stream(&path, &Limits::default()).is_err());
    }
}

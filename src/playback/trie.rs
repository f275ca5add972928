//! Prefix search index
//!
//! A 26-ary trie over `[a-z]` indexing song titles and artist names.
//! Keys are case-folded on the way in, and every character outside
//! `[A-Za-z]` is skipped entirely: it neither advances the walk nor marks
//! an end. "Señorita" is therefore indexed under the path `seorita`.
//!
//! A node becomes terminal when any insertion ends on it, and accumulates
//! every song id inserted there; duplicates are preserved. Prefix lookup
//! returns the terminal list of the final node only; ids attached to
//! longer keys below the prefix do not contribute.

use crate::playback::types::SongId;

const ALPHABET: usize = 26;

#[derive(Debug, Default)]
struct TrieNode {
    children: [Option<Box<TrieNode>>; ALPHABET],
    terminal: bool,
    song_ids: Vec<SongId>,
}

/// Case-folded prefix index from keys to song ids
#[derive(Debug, Default)]
pub struct SearchTrie {
    root: TrieNode,
}

impl SearchTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a song id under a key
    ///
    /// Walks the folded key, creating nodes as needed, and appends the id
    /// to the final node's list. A key that folds to nothing attaches the
    /// id to the root.
    pub fn insert(&mut self, key: &str, song_id: SongId) {
        let mut node = &mut self.root;
        for idx in folded_indices(key) {
            let child = node.children[idx].get_or_insert_with(Default::default);
            node = &mut **child;
        }
        node.terminal = true;
        node.song_ids.push(song_id);
    }

    /// Song ids whose key equals the folded prefix exactly
    ///
    /// Returns an empty list when no key ends at the prefix node or when
    /// the path does not exist.
    pub fn search_prefix(&self, prefix: &str) -> Vec<SongId> {
        let mut node = &self.root;
        for idx in folded_indices(prefix) {
            match &node.children[idx] {
                Some(child) => node = &**child,
                None => return Vec::new(),
            }
        }
        node.song_ids.clone()
    }

    /// Song ids under the folded prefix, including longer keys
    ///
    /// Walks the whole subtree below the prefix node in pre-order
    /// (a before z), so "seo" finds everything filed as "seorita".
    pub fn collect_prefix(&self, prefix: &str) -> Vec<SongId> {
        let mut node = &self.root;
        for idx in folded_indices(prefix) {
            match &node.children[idx] {
                Some(child) => node = &**child,
                None => return Vec::new(),
            }
        }

        let mut out = Vec::new();
        collect_subtree(node, &mut out);
        out
    }
}

fn collect_subtree(node: &TrieNode, out: &mut Vec<SongId>) {
    out.extend_from_slice(&node.song_ids);
    for child in node.children.iter().flatten() {
        collect_subtree(child, out);
    }
}

/// Child indices for the folded form of a key: lowercase ASCII letters
/// mapped to `0..26`, everything else dropped
fn folded_indices(key: &str) -> impl Iterator<Item = usize> + '_ {
    key.chars().filter_map(|ch| {
        let c = ch.to_ascii_lowercase();
        c.is_ascii_lowercase().then(|| c as usize - 'a' as usize)
    })
}

//! Prefix trie.
//!
//! The scanner uses this as a cheap "could a check start here?" gate before
//! it runs a full grammar. The trie never decides what was matched; the
//! grammar re-derives that.
//!
//! Nodes live in a single `Vec` (index 0 is the root) and each node keeps its
//! children sorted by `char`, so a lookup is a binary search per character.
//! Keys are case-sensitive; callers lowercase both keys and input.

use crate::TrieError;

#[derive(Debug, Clone)]
struct TrieNode<V> {
    children: Vec<(char, usize)>,
    entry: Option<(String, V)>,
}

impl<V> TrieNode<V> {
    fn new() -> Self {
        TrieNode { children: Vec::new(), entry: None }
    }

    fn child(&self, c: char) -> Option<usize> {
        self.children.binary_search_by_key(&c, |&(k, _)| k).ok().map(|i| self.children[i].1)
    }
}

/// Result of [`Trie::longest_prefix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch<'t, V> {
    /// The stored key that matched.
    pub key: &'t str,
    pub value: &'t V,
    /// Length of the match in bytes.
    pub len: usize,
}

#[derive(Debug, Clone)]
pub struct Trie<V> {
    nodes: Vec<TrieNode<V>>,
    len: usize,
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Trie<V> {
    pub fn new() -> Self {
        Trie { nodes: vec![TrieNode::new()], len: 0 }
    }

    /// Build a trie from `(key, value)` pairs, stopping at the first bad key.
    pub fn try_from_iter<K, I>(entries: I) -> Result<Self, TrieError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut trie = Trie::new();
        for (key, value) in entries {
            trie.insert(key.as_ref(), value)?;
        }
        Ok(trie)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value` under `key`. Keys must be non-empty and unique.
    pub fn insert(&mut self, key: &str, value: V) -> Result<(), TrieError> {
        if key.is_empty() {
            return Err(TrieError::EmptyKey);
        }

        let mut node = 0;
        for c in key.chars() {
            node = match self.nodes[node].child(c) {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::new());
                    let children = &mut self.nodes[node].children;
                    let at = children.partition_point(|&(k, _)| k < c);
                    children.insert(at, (c, next));
                    next
                }
            };
        }

        let slot = &mut self.nodes[node].entry;
        if slot.is_some() {
            return Err(TrieError::DuplicateKey(key.to_owned()));
        }
        *slot = Some((key.to_owned(), value));
        self.len += 1;
        Ok(())
    }

    fn find(&self, key: &str) -> Option<&(String, V)> {
        let mut node = 0;
        for c in key.chars() {
            node = self.nodes[node].child(c)?;
        }
        self.nodes[node].entry.as_ref()
    }

    /// Exact membership.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|(_, value)| value)
    }

    /// The longest stored key that is a prefix of `text[start..]`.
    ///
    /// Returns `None` when nothing matches or when `start` is not a char
    /// boundary inside `text`.
    pub fn longest_prefix<'t>(&'t self, text: &str, start: usize) -> Option<PrefixMatch<'t, V>> {
        if start >= text.len() || !text.is_char_boundary(start) {
            return None;
        }

        let mut node = 0;
        let mut best = None;
        for (offset, c) in text[start..].char_indices() {
            let Some(next) = self.nodes[node].child(c) else { break };
            node = next;
            if let Some((key, value)) = &self.nodes[node].entry {
                best = Some(PrefixMatch { key: key.as_str(), value, len: offset + c.len_utf8() });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greetings() -> Trie<i32> {
        Trie::try_from_iter([("hello", 1), ("hell", 2), ("heaven", 3)]).unwrap()
    }

    #[test]
    fn membership_is_exact() {
        let trie = greetings();
        assert!(trie.contains("hello"));
        assert!(trie.contains("hell"));
        assert!(!trie.contains("hel"));
        assert!(!trie.contains("world"));
        assert!(!trie.contains(""));
        assert_eq!(trie.get("heaven"), Some(&3));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn longest_prefix_prefers_longer_keys() {
        let trie = greetings();

        let m = trie.longest_prefix("test helloworld", 5).unwrap();
        assert_eq!((m.key, *m.value, m.len), ("hello", 1, 5));

        let m = trie.longest_prefix("test hellworld", 5).unwrap();
        assert_eq!((m.key, *m.value, m.len), ("hell", 2, 4));
    }

    #[test]
    fn longest_prefix_misses() {
        let trie = greetings();
        assert!(trie.longest_prefix("test hellworld", 3).is_none());
        assert!(trie.longest_prefix("test heavy", 5).is_none());
        assert!(trie.longest_prefix("hel", 0).is_none());
        assert!(trie.longest_prefix("", 0).is_none());
        assert!(trie.longest_prefix("test", 10).is_none());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let trie = Trie::try_from_iter([("hello", 2), ("HELLO", 2)]).unwrap();
        assert!(!trie.contains("Hello"));
        let m = trie.longest_prefix("test HELLO there", 5).unwrap();
        assert_eq!(m.key, "HELLO");
    }

    #[test]
    fn rejects_duplicate_and_empty_keys() {
        let mut trie = Trie::new();
        trie.insert("test", 1).unwrap();
        assert_eq!(trie.insert("test", 2), Err(TrieError::DuplicateKey("test".into())));
        assert_eq!(trie.insert("", 3), Err(TrieError::EmptyKey));
        assert_eq!(trie.get("test"), Some(&1));
        assert_eq!(TrieError::DuplicateKey("test".into()).to_string(), "duplicate key: test");
    }

    #[test]
    fn overlapping_prefixes() {
        let trie = Trie::try_from_iter([("test", 1), ("testing", 2), ("tea", 3)]).unwrap();
        assert_eq!(trie.longest_prefix("testing123", 0).map(|m| *m.value), Some(2));
        assert_eq!(trie.longest_prefix("test123", 0).map(|m| *m.value), Some(1));
        assert_eq!(trie.longest_prefix("tea time", 0).map(|m| *m.value), Some(3));
    }

    #[test]
    fn handles_multibyte_keys() {
        let trie = Trie::try_from_iter([("café", 1)]).unwrap();
        let m = trie.longest_prefix("un café", 3).unwrap();
        assert_eq!(m.len, "café".len());
        assert!(trie.longest_prefix("café", 4).is_none());
    }
}

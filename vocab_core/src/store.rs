//! Vocabulary store: the word → meaning pairs.
//!
//! Entries are keyed by word (case-sensitive exact match) and kept in
//! insertion order so the vocabulary file is rewritten stably.

use crate::{AddOutcome, VocabularyEntry};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct VocabularyStore {
    entries: Vec<VocabularyEntry>,
    index: HashMap<String, usize>,
}

impl VocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded records; later duplicates of a word are dropped
    pub fn from_entries(entries: impl IntoIterator<Item = VocabularyEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            if store.add(entry.word.clone(), entry.meaning) == AddOutcome::AlreadyExists {
                tracing::debug!("Dropping duplicate vocabulary record for {:?}", entry.word);
            }
        }
        store
    }

    /// Append a new entry unless the word is already present
    pub fn add(&mut self, word: impl Into<String>, meaning: impl Into<String>) -> AddOutcome {
        let word = word.into();
        if self.index.contains_key(&word) {
            return AddOutcome::AlreadyExists;
        }

        self.index.insert(word.clone(), self.entries.len());
        self.entries.push(VocabularyEntry::new(word, meaning));
        AddOutcome::Added
    }

    pub fn get(&self, word: &str) -> Option<&VocabularyEntry> {
        self.index.get(word).map(|&i| &self.entries[i])
    }

    /// Meaning of `word`, if it is in the store
    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.get(word).map(|entry| entry.meaning.as_str())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_lookup() {
        let mut store = VocabularyStore::new();
        assert_eq!(store.add("run", "to move quickly"), AddOutcome::Added);
        assert_eq!(store.lookup("run"), Some("to move quickly"));
        assert_eq!(store.lookup("walk"), None);
    }

    #[test]
    fn test_duplicate_add_keeps_original_meaning() {
        let mut store = VocabularyStore::new();
        store.add("run", "to move quickly");

        assert_eq!(store.add("run", "something else"), AddOutcome::AlreadyExists);
        assert_eq!(store.lookup("run"), Some("to move quickly"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_words_are_case_sensitive() {
        let mut store = VocabularyStore::new();
        store.add("Run", "capitalised");

        assert_eq!(store.add("run", "lowercase"), AddOutcome::Added);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_from_entries_keeps_order_and_first_duplicate() {
        let store = VocabularyStore::from_entries(vec![
            VocabularyEntry::new("b", "bee"),
            VocabularyEntry::new("a", "ay"),
            VocabularyEntry::new("b", "second bee"),
        ]);

        let words: Vec<_> = store.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["b", "a"]);
        assert_eq!(store.lookup("b"), Some("bee"));
    }
}

// File: src/learning.rs
use crate::core::classifier::CharClassifier;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Exact-string index of learned names to their initials.
///
/// Only `learn` writes here. Lookups during matching never insert, so the
/// index holds exactly the vocabulary the host preheated.
pub struct WordIndex {
    words: RwLock<HashMap<String, String>>,
}

impl WordIndex {
    pub fn new() -> Self {
        Self { words: RwLock::new(HashMap::new()) }
    }

    /// Computes, stores and returns the initials of `text`. Re-learning the
    /// same text recomputes and overwrites.
    pub fn learn(&self, classifier: &CharClassifier, text: &str) -> String {
        let initials = initials_of(classifier, text);
        self.words.write().insert(text.to_string(), initials.clone());
        initials
    }

    pub fn learn_words<I, S>(&self, classifier: &CharClassifier, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut learned = 0;
        for word in words {
            self.learn(classifier, word.as_ref());
            learned += 1;
        }
        learned
    }

    pub fn get(&self, text: &str) -> Option<String> {
        self.words.read().get(text).cloned()
    }

    /// Stored initials when `text` was learned, computed on the fly otherwise.
    pub fn resolve(&self, classifier: &CharClassifier, text: &str) -> String {
        self.get(text).unwrap_or_else(|| initials_of(classifier, text))
    }

    pub fn len(&self) -> usize {
        self.words.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.read().is_empty()
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        self.words.read().iter().map(|(w, i)| (w.clone(), i.clone())).collect()
    }

    pub fn extend<I: IntoIterator<Item = (String, String)>>(&self, entries: I) {
        self.words.write().extend(entries);
    }

    pub fn clear(&self) {
        self.words.write().clear();
    }
}

impl Default for WordIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// One initial per Unicode scalar of `text`, in order.
pub fn initials_of(classifier: &CharClassifier, text: &str) -> String {
    text.chars().map(|c| classifier.classify(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learn_stores_and_returns_initials() {
        let classifier = CharClassifier::new();
        let index = WordIndex::new();
        let initials = index.learn(&classifier, "张三");
        assert_eq!(initials, "zs");
        assert_eq!(index.get("张三").as_deref(), Some("zs"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn relearning_overwrites_without_growing() {
        let classifier = CharClassifier::new();
        let index = WordIndex::new();
        index.learn(&classifier, "李四");
        index.learn(&classifier, "李四");
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("李四").as_deref(), Some("ls"));
    }

    #[test]
    fn resolve_does_not_populate_index() {
        let classifier = CharClassifier::new();
        let index = WordIndex::new();
        assert_eq!(index.resolve(&classifier, "Abc1"), "abc1");
        assert!(index.is_empty());
        assert_eq!(classifier.cached_len(), 4);
    }

    #[test]
    fn mixed_text_keeps_one_initial_per_scalar() {
        let classifier = CharClassifier::new();
        assert_eq!(initials_of(&classifier, "长A离-2"), format!("ca{}-2", classifier.resolve('离')));
        assert_eq!(initials_of(&classifier, "").len(), 0);
    }

    #[test]
    fn learn_words_counts_every_element() {
        let classifier = CharClassifier::new();
        let index = WordIndex::new();
        assert_eq!(index.learn_words(&classifier, ["张三", "李四", "张三"]), 3);
        assert_eq!(index.len(), 2);
    }
}

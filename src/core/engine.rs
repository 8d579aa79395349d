use crate::config::SearchConfig;
use crate::core::classifier::CharClassifier;
use crate::core::highlight::{find_literal, wrap};
use crate::core::types::{NamedEntry, Searchable, Stats};
use crate::error::Result;
use crate::fuzzy::subsequence::is_subsequence;
use crate::learning::WordIndex;
use crate::persistence::{load_from_disk, save_to_disk};
use std::path::Path;

// The search engine owns both caches. Build one per process (or per session)
// and share it by reference or `Arc`; every method takes `&self`.
pub struct PinyinSearch {
    classifier: CharClassifier,
    words: WordIndex,
    config: SearchConfig,
}

impl PinyinSearch {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            classifier: CharClassifier::with_capacity(config.char_cache_capacity),
            words: WordIndex::new(),
            config,
        }
    }

    /// Starts from a saved snapshot when one is readable, cold otherwise.
    pub fn from_snapshot_or_new(path: &Path, config: SearchConfig) -> Self {
        let engine = Self::with_config(config);
        if path.exists() {
            if let Err(e) = engine.load_snapshot(path) {
                tracing::warn!("Ignoring unreadable snapshot {:?}: {}", path, e);
                engine.clear();
            }
        }
        engine
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn classify(&self, c: char) -> char {
        self.classifier.classify(c)
    }

    /// Initials of `text`: the learned value when present, computed otherwise.
    pub fn get_initials(&self, text: &str) -> String {
        self.words.resolve(&self.classifier, text)
    }

    pub fn learn(&self, text: &str) -> String {
        self.words.learn(&self.classifier, text)
    }

    /// Bulk learn, typically once per session to preheat the caches.
    pub fn learn_words<I, S>(&self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let learned = self.words.learn_words(&self.classifier, words);
        tracing::debug!(learned, indexed = self.words.len(), "preheated word index");
    }

    /// Bulk learn from loosely typed input. Anything other than an array is
    /// ignored, as are non-string elements.
    pub fn learn_words_value(&self, value: &serde_json::Value) {
        match value.as_array() {
            Some(items) => self.learn_words(items.iter().filter_map(|v| v.as_str())),
            None => tracing::debug!("learn_words_value ignored a non-array value"),
        }
    }

    /// Learns every name and nickname of `entries`.
    pub fn learn_entries(&self, entries: &[NamedEntry]) {
        let names = entries
            .iter()
            .flat_map(|e| std::iter::once(&e.name).chain(e.nicknames.iter()));
        self.learn_words(names);
    }

    /// Whether `query` finds `text`, trying in order: a literal
    /// case-insensitive substring, a substring of the initials, and finally
    /// the query as a scattered subsequence of the initials.
    ///
    /// An empty text or query always matches.
    pub fn is_match(&self, text: &str, query: &str) -> bool {
        if text.is_empty() || query.is_empty() {
            return true;
        }
        // Same folding as `highlight`, so every literal match can be marked.
        if find_literal(text, query).is_some() {
            return true;
        }

        let query = query.to_lowercase();
        let initials = self.get_initials(text);
        initials.contains(&query) || is_subsequence(&initials, &query)
    }

    /// Items whose `key` field (or one of its aliases) matches, in their
    /// original order. An empty query keeps every item.
    pub fn filter<'a, T: Searchable>(&self, items: &'a [T], query: &str, key: &str) -> Vec<&'a T> {
        if query.is_empty() {
            return items.iter().collect();
        }
        items.iter().filter(|item| self.item_matches(*item, query, key)).collect()
    }

    /// [`filter`](Self::filter) on the configured default key.
    pub fn filter_default<'a, T: Searchable>(&self, items: &'a [T], query: &str) -> Vec<&'a T> {
        self.filter(items, query, &self.config.default_key)
    }

    /// Like [`filter`](Self::filter), reading the text through `accessor`.
    pub fn filter_by<'a, T, F>(&self, items: &'a [T], query: &str, accessor: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        if query.is_empty() {
            return items.iter().collect();
        }
        items.iter().filter(|item| self.is_match(accessor(*item), query)).collect()
    }

    fn item_matches<T: Searchable + ?Sized>(&self, item: &T, query: &str, key: &str) -> bool {
        // An item without the field is not matched by its own text.
        let own = item.field(key).is_some_and(|text| self.is_match(text, query));
        own || item.aliases(key).iter().any(|alias| self.is_match(alias, query))
    }

    /// Wraps the first literal case-insensitive occurrence of `query` in a
    /// `<mark>` element. Matches found only through initials are not marked;
    /// the text comes back unchanged.
    pub fn highlight(&self, text: &str, query: &str, class_name: &str) -> String {
        match find_literal(text, query) {
            Some(range) => wrap(text, range, class_name),
            None => text.to_string(),
        }
    }

    pub fn highlight_default(&self, text: &str, query: &str) -> String {
        self.highlight(text, query, &self.config.highlight_class)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            cached_chars: self.classifier.cached_len(),
            indexed_words: self.words.len(),
            cache_hits: self.classifier.hits(),
            cache_misses: self.classifier.misses(),
        }
    }

    /// Empties both caches; later work starts cold.
    pub fn clear(&self) {
        self.classifier.clear();
        self.words.clear();
        tracing::debug!("cleared character cache and word index");
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        save_to_disk(&self.classifier, &self.words, path)
    }

    /// Merges a saved snapshot into the caches. Returns the number of words
    /// restored.
    pub fn load_snapshot(&self, path: &Path) -> Result<usize> {
        load_from_disk(&self.classifier, &self.words, path)
    }
}

impl Default for PinyinSearch {
    fn default() -> Self {
        Self::new()
    }
}

// File: src/core/classifier.rs
use crate::core::boundary::{is_han, is_sorted_table, lookup_initial, BoundaryEntry, BOUNDARY_TABLE, SPECIAL_OVERRIDES};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Resolves single characters to their phonetic initial and memoizes the
/// result. Safe to share between threads; concurrent misses on the same
/// character store the same value.
pub struct CharClassifier {
    table: &'static [BoundaryEntry],
    cache: RwLock<HashMap<char, char>>,
    capacity: Option<usize>,
    hits: AtomicU64,
    misses: AtomicU64,
    capacity_logged: AtomicBool,
}

impl CharClassifier {
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// `capacity` caps the number of cached characters. Once full, new
    /// characters are still classified but no longer stored.
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        debug_assert!(is_sorted_table(&BOUNDARY_TABLE), "boundary table must be sorted");
        Self {
            table: &BOUNDARY_TABLE,
            cache: RwLock::new(HashMap::new()),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            capacity_logged: AtomicBool::new(false),
        }
    }

    /// Classifies one character. O(1) on a cache hit, O(log n) over the
    /// boundary table otherwise.
    pub fn classify(&self, c: char) -> char {
        if let Some(&initial) = self.cache.read().get(&c) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return initial;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let initial = self.resolve(c);
        self.store(c, initial);
        initial
    }

    /// Classification without touching the cache.
    pub fn resolve(&self, c: char) -> char {
        if let Some(&forced) = SPECIAL_OVERRIDES.get(&c) {
            return forced;
        }
        if !is_han(c) {
            // Only the first scalar of the mapping, so each character yields one initial.
            return c.to_lowercase().next().unwrap_or(c);
        }
        lookup_initial(self.table, c as u32)
    }

    fn store(&self, c: char, initial: char) {
        let mut cache = self.cache.write();
        if let Some(cap) = self.capacity {
            if cache.len() >= cap && !cache.contains_key(&c) {
                if !self.capacity_logged.swap(true, Ordering::Relaxed) {
                    tracing::warn!(capacity = cap, "character cache full, new characters are no longer cached");
                }
                return;
            }
        }
        cache.insert(c, initial);
    }

    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Copy of the cache, for snapshots.
    pub fn entries(&self) -> Vec<(char, char)> {
        self.cache.read().iter().map(|(&c, &i)| (c, i)).collect()
    }

    /// Restores cached entries, respecting the capacity.
    pub fn extend<I: IntoIterator<Item = (char, char)>>(&self, entries: I) {
        for (c, initial) in entries {
            self.store(c, initial);
        }
    }

    pub fn clear(&self) {
        self.cache.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.capacity_logged.store(false, Ordering::Relaxed);
    }
}

impl Default for CharClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_range_lookup() {
        let classifier = CharClassifier::new();
        // 长 (U+957F) falls in the 'o' bucket by range.
        assert_eq!(lookup_initial(&BOUNDARY_TABLE, '长' as u32), 'o');
        assert_eq!(classifier.classify('长'), 'c');
    }

    #[test]
    fn second_call_is_served_from_cache() {
        let classifier = CharClassifier::new();
        let first = classifier.classify('鸣');
        assert_eq!(classifier.cached_len(), 1);
        assert_eq!(classifier.misses(), 1);

        let second = classifier.classify('鸣');
        assert_eq!(first, second);
        assert_eq!(classifier.cached_len(), 1);
        assert_eq!(classifier.hits(), 1);
    }

    #[test]
    fn non_han_passes_through_lower_cased() {
        let classifier = CharClassifier::new();
        assert_eq!(classifier.classify('A'), 'a');
        assert_eq!(classifier.classify('z'), 'z');
        assert_eq!(classifier.classify('7'), '7');
        assert_eq!(classifier.classify('-'), '-');
        assert_eq!(classifier.classify('Ä'), 'ä');
    }

    #[test]
    fn astral_characters_are_one_scalar() {
        let classifier = CharClassifier::new();
        // CJK Extension B, outside the common block.
        assert_eq!(classifier.classify('𠀀'), '𠀀');
    }

    #[test]
    fn low_end_of_block_goes_to_first_bucket() {
        let classifier = CharClassifier::new();
        assert_eq!(classifier.classify('\u{4E01}'), 'a');
    }

    #[test]
    fn capacity_stops_caching_but_still_classifies() {
        let classifier = CharClassifier::with_capacity(Some(1));
        assert_eq!(classifier.classify('A'), 'a');
        assert_eq!(classifier.classify('B'), 'b');
        assert_eq!(classifier.cached_len(), 1);
        assert_eq!(classifier.classify('B'), 'b');
        assert_eq!(classifier.hits(), 0);
    }

    #[test]
    fn clear_resets_cache_and_counters() {
        let classifier = CharClassifier::new();
        classifier.classify('鸣');
        classifier.classify('鸣');
        classifier.clear();
        assert_eq!(classifier.cached_len(), 0);
        assert_eq!(classifier.hits(), 0);
        assert_eq!(classifier.misses(), 0);
    }
}

// File: src/persistence.rs
use crate::core::classifier::CharClassifier;
use crate::error::{Result, SearchError};
use crate::learning::WordIndex;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The warm state worth keeping between sessions. Counters are not saved.
#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
struct Snapshot {
    words: Vec<(String, String)>,
    chars: Vec<(char, char)>,
}

/// Writes the caches atomically: a temp file in the target directory is
/// renamed over `path` once fully written.
pub fn save_to_disk(classifier: &CharClassifier, words: &WordIndex, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| SearchError::io(parent_dir, e))?;

    let snapshot = Snapshot { words: words.entries(), chars: classifier.entries() };

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| SearchError::io(parent_dir, e))?;
    let mut writer = BufWriter::new(&temp_file);
    bincode::serialize_into(&mut writer, &snapshot)?;
    writer.flush().map_err(|e| SearchError::io(temp_file.path(), e))?;
    drop(writer);

    temp_file.persist(path)?;
    tracing::info!(
        words = snapshot.words.len(),
        chars = snapshot.chars.len(),
        "saved search snapshot to {:?}",
        path
    );
    Ok(())
}

/// Merges a snapshot into the caches and returns the number of words read.
///
/// Only the keys are trusted. Every initial is re-derived from the current
/// tables, so a snapshot written by an older table (or a damaged one) can
/// warm the caches but never change a classification.
pub fn load_from_disk(classifier: &CharClassifier, words: &WordIndex, path: &Path) -> Result<usize> {
    let file = File::open(path).map_err(|e| SearchError::io(path, e))?;
    let reader = BufReader::new(file);
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;

    let mut stale = 0usize;
    let chars: Vec<(char, char)> = snapshot
        .chars
        .into_iter()
        .map(|(c, saved)| {
            let initial = classifier.resolve(c);
            stale += usize::from(initial != saved);
            (c, initial)
        })
        .collect();
    classifier.extend(chars);

    let restored = snapshot.words.len();
    let entries: Vec<(String, String)> = snapshot
        .words
        .into_iter()
        .map(|(word, saved)| {
            let initials: String = word.chars().map(|c| classifier.resolve(c)).collect();
            stale += usize::from(initials != saved);
            (word, initials)
        })
        .collect();
    words.extend(entries);

    if stale > 0 {
        tracing::warn!(stale, "snapshot {:?} disagreed with the current tables, re-derived", path);
    }
    tracing::info!(words = restored, "loaded search snapshot from {:?}", path);
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PinyinSearch;
    use crate::config::SearchConfig;

    #[test]
    fn snapshot_restores_warm_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("index.bin");

        let engine = PinyinSearch::new();
        engine.learn_words(["张三", "李四"]);
        engine.save_snapshot(&path).unwrap();

        let restored = PinyinSearch::new();
        assert_eq!(restored.load_snapshot(&path).unwrap(), 2);
        let stats = restored.stats();
        assert_eq!(stats.indexed_words, 2);
        assert_eq!(stats.cached_chars, 4);
        assert_eq!(stats.cache_misses, 0);
        assert_eq!(restored.get_initials("张三"), "zs");
    }

    fn write_snapshot(path: &Path, snapshot: &Snapshot) {
        let file = File::create(path).unwrap();
        bincode::serialize_into(BufWriter::new(file), snapshot).unwrap();
    }

    #[test]
    fn stale_snapshot_cannot_change_classification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.bin");
        write_snapshot(
            &path,
            &Snapshot {
                words: vec![("长离".to_string(), "xq".to_string())],
                chars: vec![('长', 'x'), ('A', 'q')],
            },
        );

        let engine = PinyinSearch::new();
        assert_eq!(engine.load_snapshot(&path).unwrap(), 1);
        assert_eq!(engine.classify('长'), 'c');
        assert_eq!(engine.classify('A'), 'a');
        assert_eq!(engine.get_initials("长离"), "cl");
        assert!(!engine.is_match("长离", "xq"));
        assert_eq!(engine.stats().indexed_words, 1);
    }

    #[test]
    fn missing_snapshot_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = PinyinSearch::new();
        let err = engine.load_snapshot(&dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, SearchError::Io { .. }));
    }

    #[test]
    fn corrupt_snapshot_starts_cold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.bin");
        fs::write(&path, [0xFFu8; 7]).unwrap();

        let engine = PinyinSearch::from_snapshot_or_new(&path, SearchConfig::default());
        assert_eq!(engine.stats().indexed_words, 0);
        assert_eq!(engine.stats().cached_chars, 0);
    }
}

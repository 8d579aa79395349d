//! Search configuration, loaded from a JSON file.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// CSS class put on the `<mark>` element by `highlight`.
    pub highlight_class: String,
    /// Field `filter` reads when the caller does not name one.
    pub default_key: String,
    /// Upper bound on cached characters. `None` means unbounded.
    pub char_cache_capacity: Option<usize>,
    /// Where the warm index is saved between sessions.
    pub snapshot_path: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            highlight_class: "highlight".to_string(),
            default_key: "name".to_string(),
            char_cache_capacity: None,
            snapshot_path: None,
        }
    }
}

impl SearchConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SearchError::io(path, e))?;
        let config: SearchConfig = serde_json::from_str(&content)
            .map_err(|e| SearchError::Config { path: path.to_path_buf(), source: e })?;
        tracing::info!("Loaded search configuration from {:?}", path);
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SearchError::Config { path: path.to_path_buf(), source: e })?;
        std::fs::write(path, content).map_err(|e| SearchError::io(path, e))
    }
}

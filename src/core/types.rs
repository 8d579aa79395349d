// src/core/types.rs
use serde::{Deserialize, Serialize};

/// Cache sizes and counters, for observability and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub cached_chars: usize,
    pub indexed_words: usize,
    /// Classifications served from the character cache.
    pub cache_hits: u64,
    /// Classifications that had to be computed.
    pub cache_misses: u64,
}

/// A named record from the host application: a character with its
/// nicknames and the group it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntry {
    pub name: String,
    #[serde(default)]
    pub nicknames: Vec<String>,
    #[serde(default, alias = "groupName")]
    pub group_name: String,
}

impl NamedEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_nicknames<I, S>(mut self, nicknames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nicknames = nicknames.into_iter().map(Into::into).collect();
        self
    }
}

/// Anything `filter` can search: plain strings, keyed JSON objects and
/// [`NamedEntry`] records.
pub trait Searchable {
    /// The text to match for `key`. Plain strings ignore the key and return
    /// themselves; records return `None` when they have no such field.
    fn field(&self, key: &str) -> Option<&str>;

    /// Extra names matched alongside `field(key)`.
    fn aliases(&self, _key: &str) -> &[String] {
        &[]
    }
}

impl Searchable for str {
    fn field(&self, _key: &str) -> Option<&str> {
        Some(self)
    }
}

impl Searchable for String {
    fn field(&self, _key: &str) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn field(&self, key: &str) -> Option<&str> {
        (**self).field(key)
    }

    fn aliases(&self, key: &str) -> &[String] {
        (**self).aliases(key)
    }
}

impl Searchable for serde_json::Value {
    fn field(&self, key: &str) -> Option<&str> {
        match self {
            serde_json::Value::String(s) => Some(s.as_str()),
            serde_json::Value::Object(map) => map.get(key).and_then(|v| v.as_str()),
            _ => None,
        }
    }
}

impl Searchable for NamedEntry {
    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(self.name.as_str()),
            "group_name" | "groupName" => Some(self.group_name.as_str()),
            _ => None,
        }
    }

    fn aliases(&self, key: &str) -> &[String] {
        if key == "name" {
            &self.nicknames
        } else {
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stats_serialize_in_camel_case() {
        let stats = Stats { cached_chars: 3, indexed_words: 1, ..Stats::default() };
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["cachedChars"], 3);
        assert_eq!(value["indexedWords"], 1);
    }

    #[test]
    fn json_items_expose_their_key_or_themselves() {
        let keyed = json!({ "name": "张三", "id": 7 });
        assert_eq!(keyed.field("name"), Some("张三"));
        assert_eq!(keyed.field("title"), None);
        assert_eq!(json!("李四").field("name"), Some("李四"));
        assert_eq!(json!(42).field("name"), None);
    }

    #[test]
    fn named_entry_reads_from_host_json() {
        let entry: NamedEntry = serde_json::from_str(
            r#"{ "name": "今汐", "nicknames": ["汐汐"], "groupName": "鸣潮" }"#,
        )
        .unwrap();
        assert_eq!(entry.field("name"), Some("今汐"));
        assert_eq!(entry.field("group_name"), Some("鸣潮"));
        assert_eq!(entry.aliases("name"), ["汐汐".to_string()]);
        assert!(entry.aliases("group_name").is_empty());
    }
}

//! A single layer of key/value settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::FxHashMap;

/// Where a property source came from. Declaration order is precedence
/// order, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    CommandLine,
    File,
    Environment,
}

/// Resolution order, highest precedence first.
pub const PRECEDENCE: [SourceKind; 3] = [
    SourceKind::CommandLine,
    SourceKind::File,
    SourceKind::Environment,
];

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CommandLine => "command-line",
            Self::File => "file",
            Self::Environment => "environment",
        }
    }

    /// Zero-based rank in `PRECEDENCE`; lower wins.
    pub fn rank(&self) -> usize {
        match self {
            Self::CommandLine => 0,
            Self::File => 1,
            Self::Environment => 2,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-sensitive mapping from setting key to string value.
///
/// Keys are compared exactly. An empty-string value is a real value and is
/// distinct from an absent key. Inserting an existing key replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySource {
    kind: SourceKind,
    values: FxHashMap<String, String>,
}

impl PropertySource {
    /// Create an empty source of the given kind.
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            values: FxHashMap::default(),
        }
    }

    /// Build a source from key/value pairs; later pairs win on duplicate keys.
    pub fn from_entries<K, V, I>(kind: SourceKind, entries: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut source = Self::new(kind);
        for (key, value) in entries {
            source.insert(key, value);
        }
        source
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins_within_a_source() {
        let source = PropertySource::from_entries(
            SourceKind::File,
            [("a", "1"), ("a", "2")],
        );
        assert_eq!(source.get("a"), Some("2"));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let source = PropertySource::from_entries(SourceKind::File, [("xxx", "lower")]);
        assert!(source.contains("xxx"));
        assert!(!source.contains("XXX"));
    }

    #[test]
    fn precedence_matches_rank() {
        for (i, kind) in PRECEDENCE.iter().enumerate() {
            assert_eq!(kind.rank(), i);
        }
    }
}

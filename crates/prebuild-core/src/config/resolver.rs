//! Fixed-precedence resolution across property sources.

use tracing::trace;

use super::property_source::{PropertySource, SourceKind};
use crate::errors::SettingsError;
use crate::types::BTreeMap;

/// Read-only view over up to three property sources.
///
/// Resolution order (highest priority first):
/// 1. Command-line settings
/// 2. Settings file
/// 3. Environment / server-supplied settings
///
/// Lookups return the whole value from the first source that contains the
/// key. Disagreement between sources is never an error. The resolver holds
/// no interior mutability, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct PropertyResolver {
    sources: Vec<PropertySource>,
}

impl PropertyResolver {
    /// Create a resolver from the three standard layers.
    pub fn new(
        command_line: PropertySource,
        file: PropertySource,
        environment: PropertySource,
    ) -> Self {
        Self::from_sources([command_line, file, environment])
    }

    /// Create a resolver from any set of sources. Sources are ordered by
    /// their kind's precedence; sources of the same kind keep the order in
    /// which they were supplied.
    pub fn from_sources(sources: impl IntoIterator<Item = PropertySource>) -> Self {
        let mut sources: Vec<PropertySource> = sources.into_iter().collect();
        sources.sort_by_key(|s| s.kind().rank());
        Self { sources }
    }

    /// Resolver with no sources; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the value from the highest-precedence source holding `key`.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.resolve_with_source(key).map(|(_, value)| value)
    }

    /// Like `resolve`, also reporting which source supplied the value.
    pub fn resolve_with_source(&self, key: &str) -> Option<(SourceKind, &str)> {
        let hit = self
            .sources
            .iter()
            .find_map(|source| source.get(key).map(|value| (source.kind(), value)));
        if let Some((kind, _)) = hit {
            trace!(key, source = %kind, "setting resolved");
        }
        hit
    }

    /// Returns the resolved value, or `default` when no source holds `key`.
    /// A present empty value is returned as-is.
    pub fn resolve_or_default<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.resolve(key).unwrap_or(default)
    }

    /// Returns the resolved value or `SettingsError::MissingSetting`.
    pub fn require(&self, key: &str) -> Result<&str, SettingsError> {
        self.resolve(key).ok_or_else(|| SettingsError::MissingSetting {
            key: key.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sources.iter().any(|s| s.contains(key))
    }

    /// First source of the given kind, if one was supplied.
    pub fn source(&self, kind: SourceKind) -> Option<&PropertySource> {
        self.sources.iter().find(|s| s.kind() == kind)
    }

    /// Flattened view of every key with its winning value, sorted by key.
    pub fn effective_settings(&self) -> BTreeMap<String, String> {
        let mut merged = BTreeMap::new();
        // Lowest precedence first so higher layers overwrite.
        for source in self.sources.iter().rev() {
            for (key, value) in source.iter() {
                merged.insert(key.to_string(), value.to_string());
            }
        }
        merged
    }
}

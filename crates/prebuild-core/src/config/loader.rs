//! Thin adapters that turn raw inputs into property sources.
//!
//! Producing the inputs (reading the server API, locating the settings
//! file) belongs to the caller. These only parse what they are handed.

use std::path::Path;

use tracing::debug;

use super::property_source::{PropertySource, SourceKind};
use crate::errors::ConfigError;

impl PropertySource {
    /// Parse a TOML document, flattening nested tables into dotted keys.
    ///
    /// `[sonar] projectKey = "a"` becomes `sonar.projectKey = "a"`. Scalars
    /// are rendered as strings; arrays of scalars are joined with `,`.
    pub fn from_toml_str(kind: SourceKind, text: &str) -> Result<Self, ConfigError> {
        Self::parse_toml(kind, text, "<string>")
    }

    /// Read and parse a TOML settings file.
    pub fn from_toml_file(kind: SourceKind, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let source = Self::parse_toml(kind, &content, &path.display().to_string())?;
        debug!(path = %path.display(), entries = source.len(), "loaded settings file");
        Ok(source)
    }

    fn parse_toml(kind: SourceKind, text: &str, origin: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        let mut source = Self::new(kind);
        flatten_toml(&mut source, None, &table);
        Ok(source)
    }

    /// Parse a JSON object of settings. String values are taken verbatim,
    /// numbers and booleans are rendered, `null` becomes an empty value.
    pub fn from_json_str(kind: SourceKind, text: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ConfigError::ParseError {
                path: "<json>".to_string(),
                message: e.to_string(),
            })?;
        let object = value.as_object().ok_or_else(|| ConfigError::InvalidValue {
            field: "<json>".to_string(),
            message: "expected a JSON object of settings".to_string(),
        })?;

        let mut source = Self::new(kind);
        for (key, value) in object {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => String::new(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(ConfigError::InvalidValue {
                        field: key.clone(),
                        message: format!("unsupported value: {other}"),
                    })
                }
            };
            source.insert(key.clone(), rendered);
        }
        Ok(source)
    }

    /// Read environment/server settings from a JSON-valued environment
    /// variable. An unset variable yields an empty source.
    pub fn from_env_json(var: &str) -> Result<Self, ConfigError> {
        match std::env::var(var) {
            Ok(text) if text.trim().is_empty() => Ok(Self::new(SourceKind::Environment)),
            Ok(text) => Self::from_json_str(SourceKind::Environment, &text),
            Err(_) => Ok(Self::new(SourceKind::Environment)),
        }
    }

    /// Parse `key=value` arguments. A leading `/d:` or `-D` is stripped.
    /// Only the first `=` splits, so values may contain `=`.
    pub fn from_pairs<I, S>(kind: SourceKind, args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = Self::new(kind);
        for arg in args {
            let arg = arg.as_ref();
            let body = arg
                .strip_prefix("/d:")
                .or_else(|| arg.strip_prefix("-D"))
                .unwrap_or(arg);
            let (key, value) = body.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
                field: arg.to_string(),
                message: "expected key=value".to_string(),
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: arg.to_string(),
                    message: "setting key is empty".to_string(),
                });
            }
            source.insert(key, value);
        }
        Ok(source)
    }
}

fn flatten_toml(source: &mut PropertySource, prefix: Option<&str>, table: &toml::Table) {
    for (key, value) in table {
        let full_key = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match value {
            toml::Value::Table(inner) => flatten_toml(source, Some(&full_key), inner),
            toml::Value::Array(items) => {
                let rendered: Vec<String> = items.iter().filter_map(render_scalar).collect();
                if rendered.len() != items.len() {
                    debug!(key = %full_key, "non-scalar array entries ignored");
                }
                source.insert(full_key, rendered.join(","));
            }
            scalar => {
                if let Some(rendered) = render_scalar(scalar) {
                    source.insert(full_key, rendered);
                }
            }
        }
    }
}

fn render_scalar(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

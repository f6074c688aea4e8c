//! Localized strings for the import/export panel.
//!
//! Every user-facing string has a stable key and an English default. A
//! [`Catalog`] can override any key from a YAML file, either flat
//! (`importExport.titles.importFailed: ...`) or nested by key segment.

pub mod keys;

use anyhow::{Context, Result};
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::Path;

pub use keys::Message;

/// Localized string lookup
pub trait Translator: Send + Sync {
    /// Resolve `key`, falling back to `default`, then substitute `{{var}}`s
    fn translate(&self, key: &str, default: &str, vars: &[(&str, &str)]) -> String;

    fn message(&self, msg: &Message, vars: &[(&str, &str)]) -> String {
        self.translate(msg.key, msg.default, vars)
    }
}

/// Message catalog with optional overrides
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Catalog that only knows the built-in defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        let mut entries = HashMap::new();
        match value {
            Value::Null => {}
            Value::Mapping(_) => flatten("", &value, &mut entries),
            _ => anyhow::bail!("message catalog must be a mapping"),
        }
        Ok(Self { entries })
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read message catalog: {:?}", path))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse message catalog: {:?}", path))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, default: &str, vars: &[(&str, &str)]) -> String {
        let template = self.entries.get(key).map(String::as_str).unwrap_or(default);
        interpolate(template, vars)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let Some(segment) = scalar_to_string(k) else {
                    continue;
                };
                let key = if prefix.is_empty() {
                    segment
                } else {
                    format!("{prefix}.{segment}")
                };
                flatten(&key, v, out);
            }
        }
        other => {
            if let Some(s) = scalar_to_string(other) {
                out.insert(prefix.to_string(), s);
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Replace `{{name}}` placeholders; unknown placeholders are left as-is
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                match vars.iter().find(|(k, _)| *k == name) {
                    Some((_, v)) => out.push_str(v),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

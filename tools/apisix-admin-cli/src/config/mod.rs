mod context;
mod file;

pub use context::*;
pub use file::*;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_CONTEXT: &str = "default";
pub const DEFAULT_ADMIN_URL: &str = "http://127.0.0.1:9180";

/// Main CLI configuration structure
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CliConfig {
    pub contexts: HashMap<String, ContextConfig>,
    pub current_context: String,
}

/// Configuration for a specific context
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextConfig {
    /// Base URL of the admin API, e.g. `http://127.0.0.1:9180`
    pub admin_url: Option<String>,
    /// Value sent in the `X-API-KEY` header
    pub admin_key: Option<String>,
    /// Where exported files are written; defaults to the working directory
    pub download_dir: Option<PathBuf>,
    /// YAML file overriding the built-in message catalog
    pub locale_file: Option<PathBuf>,
    /// Per-request timeout; unset means wait indefinitely
    pub timeout_secs: Option<u64>,
}

impl ContextConfig {
    /// Fill every unset field from `fallback`
    pub fn or(self, fallback: &ContextConfig) -> ContextConfig {
        ContextConfig {
            admin_url: self.admin_url.or_else(|| fallback.admin_url.clone()),
            admin_key: self.admin_key.or_else(|| fallback.admin_key.clone()),
            download_dir: self
                .download_dir
                .or_else(|| fallback.download_dir.clone()),
            locale_file: self.locale_file.or_else(|| fallback.locale_file.clone()),
            timeout_secs: self.timeout_secs.or(fallback.timeout_secs),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        let mut contexts = HashMap::new();
        contexts.insert(
            DEFAULT_CONTEXT.to_string(),
            ContextConfig {
                admin_url: Some(DEFAULT_ADMIN_URL.to_string()),
                ..Default::default()
            },
        );

        Self {
            contexts,
            current_context: DEFAULT_CONTEXT.to_string(),
        }
    }
}

impl CliConfig {
    /// Get the current context configuration
    pub fn current_context(&self) -> Option<&ContextConfig> {
        self.contexts.get(&self.current_context)
    }

    /// Get a specific context configuration
    pub fn get_context(&self, name: &str) -> Option<&ContextConfig> {
        self.contexts.get(name)
    }

    /// Set the current context
    pub fn set_current_context(&mut self, name: String) -> Result<()> {
        if !self.contexts.contains_key(&name) {
            return Err(anyhow::anyhow!("Context '{}' does not exist", name));
        }
        self.current_context = name;
        Ok(())
    }

    /// Update or create a context
    pub fn set_context(&mut self, name: String, config: ContextConfig) {
        self.contexts.insert(name, config);
    }

    /// List all context names, sorted
    pub fn list_contexts(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.contexts.keys().collect();
        names.sort();
        names
    }
}

/// Load or create configuration from a specific path
pub async fn load_or_create_config_from_path(
    config_path: &std::path::Path,
) -> Result<CliConfig> {
    if !config_path.exists() {
        let config = CliConfig::default();
        save_config_to_path(&config, config_path).await?;
        return Ok(config);
    }
    load_config_from_path(config_path).await
}

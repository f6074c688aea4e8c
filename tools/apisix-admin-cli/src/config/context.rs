use super::{CliConfig, ContextConfig, file};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Context management operations
pub struct ContextManager {
    config: CliConfig,
    config_path: PathBuf,
}

impl ContextManager {
    /// Create a new context manager with loaded configuration
    pub async fn new() -> Result<Self> {
        let config_path = file::get_config_file_path()?;
        Self::with_config_path(config_path).await
    }

    /// Create a new context manager with a specific config path (useful for testing)
    pub async fn with_config_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config =
            super::load_or_create_config_from_path(config_path.as_ref()).await?;
        Ok(Self {
            config,
            config_path: config_path.as_ref().to_path_buf(),
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &CliConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Save configuration changes
    pub async fn save(&self) -> Result<()> {
        file::save_config_to_path(&self.config, &self.config_path).await
    }

    /// Merge `update` into the named context (current one if `None`) and save
    pub async fn set_context(
        &mut self,
        name: Option<String>,
        update: ContextConfig,
    ) -> Result<()> {
        let context_name =
            name.unwrap_or_else(|| self.config.current_context.clone());

        let existing = self
            .config
            .get_context(&context_name)
            .cloned()
            .unwrap_or_default();
        self.config
            .set_context(context_name.clone(), update.or(&existing));

        // A freshly created config may point at a context that no longer exists
        if !self
            .config
            .contexts
            .contains_key(&self.config.current_context)
        {
            self.config.current_context = context_name;
        }

        self.save().await
    }

    /// Switch to a different context
    pub async fn select_context(&mut self, name: String) -> Result<()> {
        self.config.set_current_context(name)?;
        self.save().await
    }

    /// Get current context configuration
    pub fn get_current_context(&self) -> Option<&ContextConfig> {
        self.config.current_context()
    }
}

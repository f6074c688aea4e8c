use crate::config::{ContextConfig, ContextManager};
use crate::view::OutputArgs;
use chrono::DateTime;
use std::path::PathBuf;

/// Get version information including build time - using Box::leak to get a static str
fn get_version_info() -> &'static str {
    let version = env!("CARGO_PKG_VERSION");
    let build_timestamp_str = env!("BUILD_TIMESTAMP");
    let git_hash = option_env!("GIT_HASH").unwrap_or("unknown");

    let build_time = build_timestamp_str
        .parse::<i64>()
        .ok()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    Box::leak(
        format!("{} (built {}, git {})", version, build_time, git_hash)
            .into_boxed_str(),
    )
}

/// Main CLI structure
#[derive(clap::Parser, Clone, Debug)]
#[clap(name = "apisix-admin", author, version = get_version_info(), about, long_about = None)]
pub struct ApisixCli {
    #[command(subcommand)]
    pub command: ApisixCommands,
}

/// Available CLI commands
#[derive(clap::Subcommand, Clone, Debug)]
pub enum ApisixCommands {
    /// Import a YAML configuration file into the gateway
    #[clap(aliases = &["imp", "i"])]
    Import {
        /// Configuration file (.yaml or .yml)
        file: PathBuf,
        #[clap(flatten)]
        conn: ConnectionArgs,
        #[clap(flatten)]
        out: OutputArgs,
    },
    /// Export the gateway configuration to a timestamped YAML file
    #[clap(aliases = &["exp", "e"])]
    Export {
        /// Directory to write the file to (defaults to the context's download_dir, then `.`)
        #[arg(short = 'd', long)]
        out_dir: Option<PathBuf>,
        #[clap(flatten)]
        conn: ConnectionArgs,
        #[clap(flatten)]
        out: OutputArgs,
    },
    /// Show when the configuration was last imported
    #[clap(aliases = &["last", "l"])]
    LastImport {
        #[clap(flatten)]
        conn: ConnectionArgs,
    },
    /// Render the import/export panel
    #[clap(aliases = &["show", "p"])]
    Panel {
        #[clap(flatten)]
        conn: ConnectionArgs,
        #[clap(flatten)]
        out: OutputArgs,
    },
    /// Context management operations
    #[clap(aliases = &["ctx"])]
    Context {
        #[command(subcommand)]
        opt: ContextOperation,
    },
}

/// Context management operations
#[derive(clap::Subcommand, Clone, Debug)]
pub enum ContextOperation {
    /// Display the current context
    #[clap(aliases = &["g", "show"])]
    Get,
    /// List all contexts
    #[clap(aliases = &["ls"])]
    List,
    /// Create or update a context (the current one when no name is given)
    #[clap(aliases = &["s", "update"])]
    Set {
        /// Context name
        name: Option<String>,
        /// Admin API base URL
        #[arg(long)]
        admin_url: Option<String>,
        /// Admin API key
        #[arg(long)]
        admin_key: Option<String>,
        /// Directory for exported files
        #[arg(long)]
        download_dir: Option<PathBuf>,
        /// YAML message catalog overriding the built-in strings
        #[arg(long)]
        locale_file: Option<PathBuf>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Switch to a different context
    #[clap(aliases = &["use", "switch"])]
    Select {
        /// Context name
        name: String,
    },
}

/// Connection overrides shared by every command talking to the admin API
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Admin API base URL, e.g. http://127.0.0.1:9180
    #[arg(short = 'u', long)]
    pub admin_url: Option<String>,
    /// Admin API key sent as X-API-KEY
    #[arg(short = 'k', long, env = "APISIX_ADMIN_KEY", hide_env_values = true)]
    pub admin_key: Option<String>,
    /// Use this context instead of the current one
    #[arg(short = 'c', long)]
    pub context: Option<String>,
}

impl ConnectionArgs {
    fn explicit(&self) -> ContextConfig {
        ContextConfig {
            admin_url: self.admin_url.clone(),
            admin_key: self.admin_key.clone(),
            ..Default::default()
        }
    }

    /// Merge explicit arguments over the stored context from `manager`
    pub fn resolve(&self, manager: &ContextManager) -> anyhow::Result<ContextConfig> {
        let stored = match &self.context {
            Some(name) => manager
                .config()
                .get_context(name)
                .ok_or_else(|| anyhow::anyhow!("Context '{}' does not exist", name))?,
            None => manager
                .get_current_context()
                .ok_or_else(|| anyhow::anyhow!("No context selected"))?,
        };
        Ok(self.explicit().or(stored))
    }

    /// Merge context configuration with explicit connection arguments
    /// Context values are used when explicit arguments are not provided
    pub async fn with_context(&self) -> anyhow::Result<ContextConfig> {
        let manager = ContextManager::new().await?;
        self.resolve(&manager)
    }

    /// Same as [`with_context`](Self::with_context) with a specific config path
    pub async fn with_context_from_path<P: AsRef<std::path::Path>>(
        &self,
        config_path: P,
    ) -> anyhow::Result<ContextConfig> {
        let manager = ContextManager::with_config_path(config_path).await?;
        self.resolve(&manager)
    }
}

/// Available output formats
#[derive(clap::ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

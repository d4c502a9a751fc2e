//! Shared command context
//!
//! Resolves the configuration file and data directory from the global flags
//! and wires the store, services and validator together.

use anyhow::{Context, Result};
use clap::Args;
use huddle_core::auth;
use huddle_core::comment::CommentAggregator;
use huddle_core::config::{Config, MetricsConfig};
use huddle_core::error::HuddleError;
use huddle_core::post::{PageRequest, PostService};
use huddle_core::store::ForumStore;
use huddle_core::types::Flair;
use huddle_core::user::User;
use huddle_storage::FileSystemStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = ".huddle/config.toml";

/// Global flags shared by every command
#[derive(Debug, Clone)]
pub struct Globals {
    config_path: PathBuf,
    data_dir: Option<PathBuf>,
}

impl Globals {
    pub fn new(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Self {
        Self {
            config_path: config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            data_dir,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the configuration; a missing file means defaults
    pub fn load_config(&self) -> Result<Config> {
        load_config(&self.config_path)
    }

    /// Metrics settings, falling back to defaults if the file is unreadable
    pub fn metrics_config(&self) -> MetricsConfig {
        self.load_config().map(|c| c.metrics).unwrap_or_default()
    }

    /// Effective data directory: the flag, then the config, then the platform default
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| config.store.data_dir.clone())
            .unwrap_or_else(FileSystemStore::default_dir)
    }

    /// Open the store and build the services
    pub fn open(&self) -> Result<AppContext> {
        let config = self.load_config()?;
        let data_dir = self.data_dir(&config);
        let store = FileSystemStore::new(&data_dir)
            .with_context(|| format!("Failed to open forum data in {}", data_dir.display()))?;
        Ok(AppContext::new(config, Arc::new(store)))
    }
}

/// Parse a configuration file
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("No config at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .map_err(|e| HuddleError::Toml(e.to_string()))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Parse an optional flair for a write; blank means unchanged
pub fn parse_flair(raw: Option<&str>) -> huddle_core::Result<Option<Flair>> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .transpose()
}

/// Login of the acting user
#[derive(Debug, Clone, Args)]
pub struct Credentials {
    /// Acting user (username or email)
    #[arg(long = "as", value_name = "USER")]
    pub login: String,

    /// Password of the acting user (prompted when omitted)
    #[arg(long, env = "HUDDLE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Read a password from the terminal
pub fn prompt_password(prompt: &str, confirm: bool) -> Result<String> {
    use dialoguer::Password;

    let mut input = Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Repeat password", "Passwords do not match");
    }
    input.interact().context("Failed to read password")
}

/// Services wired over one store
pub struct AppContext {
    pub config: Config,
    pub store: Arc<dyn ForumStore>,
    pub posts: PostService,
    pub comments: CommentAggregator,
}

impl AppContext {
    pub fn new(config: Config, store: Arc<dyn ForumStore>) -> Self {
        let posts = PostService::new(Arc::clone(&store)).with_latest_limit(config.stats.latest_limit);
        let comments = CommentAggregator::new(Arc::clone(&store));
        Self {
            config,
            store,
            posts,
            comments,
        }
    }

    /// Check the acting user's password, prompting for it if needed
    pub fn authenticate(&self, credentials: &Credentials) -> Result<User> {
        let password = match &credentials.password {
            Some(password) => password.clone(),
            None => prompt_password(&format!("Password for {}", credentials.login), false)?,
        };
        Ok(auth::authenticate(
            self.store.as_ref(),
            &credentials.login,
            &password,
        )?)
    }

    /// Normalise raw page parameters against the configured limits
    pub fn page_request(&self, page: Option<&str>, per_page: Option<&str>) -> PageRequest {
        PageRequest::from_query(page, per_page, &self.config.pagination)
    }
}

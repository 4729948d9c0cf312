//! Configuration loading for brave-search-mcp
//!
//! Configuration is layered, later layers winning:
//! 1. Default values
//! 2. TOML file: `--config` (or `BRAVE_SEARCH_CONFIG_PATH`, read by the CLI),
//!    else `<config dir>/brave-search-mcp/config.toml`
//! 3. Environment variables `BRAVE_API_KEY`, `BRAVE_API_BASE_URL`
//! 4. Command line flags (applied by the binary)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::{DEFAULT_MAX_IMAGE_BYTES, MAX_IDS_PER_CALL};
use crate::local::{IdPolicy, LocalSearchSettings};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Brave Search API access
    #[serde(default)]
    pub brave: BraveConfig,
    /// Tool defaults and local search behavior
    #[serde(default)]
    pub search: SearchConfig,
    /// Image search caching
    #[serde(default)]
    pub images: ImageConfig,
    /// HTTP transport
    #[serde(default)]
    pub server: ServerConfig,
}

/// Brave Search API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BraveConfig {
    /// Subscription token sent as `X-Subscription-Token`
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// API base URL including the version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Search tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result count when a web, news or video call omits `count`
    #[serde(default = "default_count")]
    pub default_count: u32,
    /// Result count when a local search call omits `count`
    #[serde(default = "default_local_count")]
    pub local_default_count: u32,
    /// How location ids are batched for the POI lookups
    #[serde(default)]
    pub id_policy: IdPolicy,
    /// Ids per POI lookup call (1-20)
    #[serde(default = "default_poi_batch_size")]
    pub poi_batch_size: usize,
}

/// Image cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Images kept for `brave-image://` resources before the oldest is evicted
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Largest image download accepted
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

/// HTTP transport configuration (used with `--use-sse`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_base_url() -> String {
    "https://api.search.brave.com/res/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("brave-search-mcp/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_count() -> u32 {
    10
}

fn default_local_count() -> u32 {
    10
}

fn default_poi_batch_size() -> usize {
    MAX_IDS_PER_CALL
}

fn default_cache_capacity() -> usize {
    32
}

fn default_max_image_bytes() -> usize {
    DEFAULT_MAX_IMAGE_BYTES
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3033
}

impl Default for BraveConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            local_default_count: default_local_count(),
            id_policy: IdPolicy::default(),
            poi_batch_size: default_poi_batch_size(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl SearchConfig {
    pub fn local_settings(&self) -> LocalSearchSettings {
        LocalSearchSettings {
            policy: self.id_policy,
            batch_size: self.poi_batch_size,
        }
    }
}

impl Config {
    /// Load configuration from file (if any) and the process environment
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let mut config = match path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                tracing::info!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
            None => {
                tracing::info!("No config path available, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Apply environment overrides, reading variables through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("BRAVE_API_KEY") {
            self.brave.api_key = Some(key);
        }
        if let Some(url) = lookup("BRAVE_API_BASE_URL") {
            self.brave.base_url = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.api_key()?;

        if !(1..=MAX_IDS_PER_CALL).contains(&self.search.poi_batch_size) {
            bail!(
                "search.poi_batch_size must be between 1 and {}, got {}",
                MAX_IDS_PER_CALL,
                self.search.poi_batch_size
            );
        }
        if self.images.cache_capacity == 0 {
            bail!("images.cache_capacity must be at least 1");
        }
        Ok(())
    }

    /// The configured API key; required for every tool
    pub fn api_key(&self) -> Result<&str> {
        match self.brave.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => bail!("BRAVE_API_KEY environment variable is required"),
        }
    }

    /// Default configuration file path, used when no `--config` is given
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("brave-search-mcp").join("config.toml"))
    }
}

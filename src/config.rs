use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::share::DEFAULT_SHARE_KEY;
use crate::core::SolverOptions;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub solver: SolverSettings,
    #[serde(default)]
    pub share: ShareSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct SolverSettings {
    /// Upper bound on permutations examined per request; 0 means unbounded
    #[serde(default = "default_max_permutations")]
    pub max_permutations: u64,
    /// Larger groups are rejected before solving
    #[serde(default = "default_max_participants")]
    pub max_participants: usize,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_permutations: default_max_permutations(),
            max_participants: default_max_participants(),
            shuffle: default_shuffle(),
        }
    }
}

impl SolverSettings {
    pub fn options(&self) -> SolverOptions {
        SolverOptions {
            max_permutations: Some(self.max_permutations).filter(|&max| max > 0),
            shuffle: self.shuffle,
        }
    }
}

fn default_max_permutations() -> u64 { 5_000_000 }
fn default_max_participants() -> usize { 12 }
fn default_shuffle() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct ShareSettings {
    /// Page that reads the `secret` parameter
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_share_key")]
    pub key: String,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: default_share_key(),
        }
    }
}

fn default_base_url() -> String { "http://localhost:8080/reveal".to_string() }
fn default_share_key() -> String { DEFAULT_SHARE_KEY.to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SANTA__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SANTA__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SANTA")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

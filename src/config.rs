//! Server configuration.
//!
//! Values are layered, later sources winning: built-in defaults, an optional
//! YAML file (`--config`), environment variables, then command-line flags.
//! The result is built once at startup and shared read-only.

use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 4096;

#[derive(Debug, Clone, Parser)]
#[command(name = "lantern")]
#[command(about = "Minimal HTTP/1.1 server with echo and file routes")]
pub struct Cli {
    /// Address to bind, e.g. 0.0.0.0:4221
    #[arg(long, env = "LISTEN")]
    pub listen: Option<String>,

    /// Root directory for the /files/ routes
    #[arg(long, env = "SERVE_DIR")]
    pub directory: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Size of the per-connection request buffer
    #[arg(long)]
    pub max_request_bytes: Option<usize>,

    /// Give up reading a request after this many seconds
    #[arg(long)]
    pub read_timeout_secs: Option<u64>,
}

/// Shape of the YAML configuration file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub listen_addr: Option<String>,
    pub directory: Option<PathBuf>,
    pub max_request_bytes: Option<usize>,
    pub read_timeout_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("serving directory {0} does not exist or is not a directory")]
    InvalidDirectory(PathBuf),

    #[error("max_request_bytes must be greater than zero")]
    ZeroRequestBuffer,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Root for the file routes. `None` disables them.
    pub directory: Option<PathBuf>,
    pub max_request_bytes: usize,
    /// `None` waits for the client indefinitely.
    pub read_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: None,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            read_timeout: None,
        }
    }
}

impl Config {
    /// Builds the configuration from the process arguments and environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => Self::read_file(path)?,
            None => FileConfig::default(),
        };

        let defaults = Config::default();
        let config = Config {
            listen_addr: cli
                .listen
                .or(file.listen_addr)
                .unwrap_or(defaults.listen_addr),
            directory: cli.directory.or(file.directory),
            max_request_bytes: cli
                .max_request_bytes
                .or(file.max_request_bytes)
                .unwrap_or(defaults.max_request_bytes),
            read_timeout: cli
                .read_timeout_secs
                .or(file.read_timeout_secs)
                .map(Duration::from_secs),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_request_bytes == 0 {
            return Err(ConfigError::ZeroRequestBuffer);
        }

        if let Some(dir) = &self.directory {
            if !dir.is_dir() {
                return Err(ConfigError::InvalidDirectory(dir.clone()));
            }
        }

        Ok(())
    }

    pub fn serving_directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

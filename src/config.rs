//! Configuration management for spaced-review.
//!
//! Settings come from built-in defaults, then an optional YAML file
//! (`spaced-review.yaml` in the working directory, or an explicit path), then
//! command-line overrides.

use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE_NAME: &str = "spaced-review.yaml";

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// Path to the `SQLite` database file.
    pub database: PathBuf,

    /// Prefix under which the JSON API is mounted (e.g. `/api`).
    pub base_path: String,

    /// Directory of static front-end files served at the root.
    /// None means no static files are served.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_dir: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database: paths::default_db_path(),
            base_path: "/api".to_string(),
            web_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

/// Values supplied on the command line that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Listen address override.
    pub addr: Option<SocketAddr>,
    /// Database path override.
    pub database: Option<PathBuf>,
    /// API prefix override.
    pub base_path: Option<String>,
    /// Static asset directory override.
    pub web_dir: Option<PathBuf>,
    /// Log filter override.
    pub log_filter: Option<String>,
}

impl ServerConfig {
    /// Load config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit `config_path` must exist. Without one, `spaced-review.yaml`
    /// in `base_dir` is used if present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed, or if the
    /// result is invalid.
    pub fn resolve(
        config_path: Option<&Path>,
        base_dir: &Path,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default_path = base_dir.join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load_from(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(addr) = overrides.addr {
            self.addr = addr;
        }
        if let Some(database) = overrides.database {
            self.database = database;
        }
        if let Some(base_path) = overrides.base_path {
            self.base_path = base_path;
        }
        if let Some(web_dir) = overrides.web_dir {
            self.web_dir = Some(web_dir);
        }
        if let Some(log_filter) = overrides.log_filter {
            self.log_filter = log_filter;
        }
    }

    /// Normalise and check values.
    ///
    /// The base path gains a leading slash and loses any trailing one; `/` and
    /// the empty string both mean "mount at the root".
    ///
    /// # Errors
    ///
    /// Returns an error if the base path contains route syntax.
    pub fn validate(&mut self) -> Result<()> {
        let trimmed = self.base_path.trim().trim_matches('/');
        if trimmed.contains([':', '*', '{', '}']) {
            return Err(Error::Config(format!(
                "base_path must be a plain prefix, got '{}'",
                self.base_path
            )));
        }
        self.base_path = if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") };
        Ok(())
    }
}

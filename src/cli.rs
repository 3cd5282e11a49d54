//! Command-line interface for the server binary.
//!
//! The binary is a thin wrapper; argument handling lives here so it can be tested.

use crate::config::ConfigOverrides;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Spaced-repetition flashcard server.
///
/// Flags override values from the config file.
#[derive(Parser, Debug)]
#[command(name = "spaced-review")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// YAML config file (default: ./spaced-review.yaml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long)]
    pub addr: Option<SocketAddr>,

    /// Path to the SQLite database
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Prefix for API routes
    #[arg(long)]
    pub base_path: Option<String>,

    /// Directory of static front-end files to serve at the root
    #[arg(long)]
    pub web_dir: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. "info", "spaced_review=debug")
    #[arg(long)]
    pub log: Option<String>,
}

impl Cli {
    /// Split out the values that override the config file.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            addr: self.addr,
            database: self.db.clone(),
            base_path: self.base_path.clone(),
            web_dir: self.web_dir.clone(),
            log_filter: self.log.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::try_parse_from(["spaced-review"]).unwrap();
        assert!(cli.config.is_none());
        assert_eq!(cli.overrides(), ConfigOverrides::default());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "spaced-review",
            "--config",
            "conf.yaml",
            "--addr",
            "127.0.0.1:3000",
            "--db",
            "tasks.db",
            "--base-path",
            "/v1",
            "--web-dir",
            "web",
            "--log",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("conf.yaml")));
        let overrides = cli.overrides();
        assert_eq!(overrides.addr, Some("127.0.0.1:3000".parse().unwrap()));
        assert_eq!(overrides.database, Some(PathBuf::from("tasks.db")));
        assert_eq!(overrides.base_path.as_deref(), Some("/v1"));
        assert_eq!(overrides.web_dir, Some(PathBuf::from("web")));
        assert_eq!(overrides.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_rejects_bad_addr() {
        assert!(Cli::try_parse_from(["spaced-review", "--addr", "not-an-addr"]).is_err());
    }
}

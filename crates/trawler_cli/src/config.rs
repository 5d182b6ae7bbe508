//! Layered configuration for the `trawler` binary.
//!
//! Command-line flags win over `TRAWLER_*` environment variables, which win
//! over `./trawler.toml`, which wins over `~/.config/trawler/config.toml`.
//! Anything left unset keeps its built-in default. Without a `[database]`
//! url the cache lives in the XDG state directory.
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "sqlite://~/.local/state/trawler/trawler.db"  # optional, this is the default
//!
//! [github]
//! tokens = ["ghp_personal...", "ghp_work..."]  # tried in order
//! public_fallback = true
//!
//! [sync]
//! observed_window_minutes = 6
//! notification_retention_days = 7
//! check_staleness_hours = 24
//!
//! [sync.page]
//! per_page = 50
//! max_pages = 2
//! ```

use std::path::{Path, PathBuf};

use config::{Config as ConfigBuilder, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;
use trawler::SyncConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Sync engine tunables.
    pub sync: SyncConfig,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL.
    /// Supports sqlite:// and postgres:// schemes.
    pub url: Option<String>,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// A single token; also read from `TRAWLER_GITHUB_TOKEN`.
    pub token: Option<String>,
    /// Additional tokens, tried after `token` in order.
    pub tokens: Vec<String>,
    /// Try anonymous access when no token can see a repository.
    pub public_fallback: bool,
}

impl Config {
    /// Read every config source, later ones overriding earlier ones:
    /// the XDG config file, `./trawler.toml`, then `TRAWLER_*` variables.
    ///
    /// A malformed file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();
        for path in config_files() {
            tracing::debug!(path = %path.display(), "reading config file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        // TRAWLER_GITHUB_TOKEN -> github.token
        let env = Environment::with_prefix("TRAWLER")
            .separator("_")
            .try_parsing(true);
        let config: Self = builder.add_source(env).build()?.try_deserialize()?;
        config
            .sync
            .validate()
            .map_err(|e| ConfigError::Message(e.to_string()))?;
        Ok(config)
    }

    /// The configured database, or `trawler.db` in the state directory.
    ///
    /// `mode=rwc` lets SQLite create the file on first use.
    pub fn database_url(&self) -> Option<String> {
        if let Some(url) = &self.database.url {
            return Some(url.clone());
        }
        let path = Self::default_state_dir()?.join("trawler.db");
        Some(format!("sqlite://{}?mode=rwc", path.display()))
    }

    /// Configured tokens in the order identities are tried, without blanks or duplicates.
    pub fn github_tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        for token in self.github.token.iter().chain(&self.github.tokens) {
            let token = token.trim();
            if !token.is_empty() && !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_string());
            }
        }
        tokens
    }

    /// `$XDG_STATE_HOME/trawler` on Linux; the data directory elsewhere.
    pub fn default_state_dir() -> Option<PathBuf> {
        let dirs = project_dirs()?;
        Some(match dirs.state_dir() {
            Some(state) => state.to_path_buf(),
            None => dirs.data_dir().to_path_buf(),
        })
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "trawler")
}

fn config_files() -> Vec<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .into_iter()
        .chain(std::iter::once(PathBuf::from("trawler.toml")))
        .filter(|path| path.is_file())
        .collect()
}

/// Create the directory holding a file-backed SQLite database.
pub fn ensure_sqlite_parent(database_url: &str) -> std::io::Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = Path::new(rest.split_once('?').map_or(rest, |(path, _)| path));

    if path.is_relative() {
        tracing::warn!(
            path = %path.display(),
            "Relative database path resolves against the current directory"
        );
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

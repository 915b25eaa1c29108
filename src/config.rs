use colored::*;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `database.path`.
pub const ENV_DB_PATH: &str = "READLOG_DB_PATH";
/// Environment variable that overrides `reader.username`.
pub const ENV_USERNAME: &str = "READLOG_USERNAME";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub reader: ReaderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("readlog")
                .join("readlog.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Owner recorded on every inserted book
    pub username: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            username: std::env::var("USER")
                .ok()
                .filter(|user| !user.is_empty())
                .unwrap_or_else(|| "reader".to_string()),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file(config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();

        // Primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        // Fallback location: ./<project>.yml
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        Ok(Self::load_first(&candidates))
    }

    /// First candidate that exists and parses, else defaults.
    fn load_first(candidates: &[PathBuf]) -> Self {
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    log::warn!("Failed to load config from {}: {:#}", path.display(), e);
                    eprintln!(
                        "{} ignoring {}: {:#}",
                        "Warning:".yellow().bold(),
                        path.display(),
                        e
                    );
                }
            }
        }

        log::info!("No usable config file found, using defaults");
        Self::default()
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply `READLOG_*` overrides; blank values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = value(ENV_DB_PATH) {
            log::info!("Database path overridden by {}", ENV_DB_PATH);
            self.database.path = PathBuf::from(path);
        }
        if let Some(username) = value(ENV_USERNAME) {
            log::info!("Username overridden by {}", ENV_USERNAME);
            self.reader.username = username;
        }
    }
}

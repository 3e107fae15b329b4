//! Configuration management for planit.
//!
//! Loads configuration from ${PLANIT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::posture::Posture;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "PLANIT_API_URL";
/// Environment variable overriding the posture.
pub const POSTURE_ENV: &str = "PLANIT_POSTURE";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments/sections from the template are kept while the user's
/// customized values win.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for planit configuration and client storage.
    //!
    //! PLANIT_HOME resolution order:
    //! 1. PLANIT_HOME environment variable (if set)
    //! 2. ~/.config/planit (default)

    use std::path::PathBuf;

    /// Returns the planit home directory.
    pub fn planit_home() -> PathBuf {
        if let Ok(home) = std::env::var("PLANIT_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("planit")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        planit_home().join("config.toml")
    }

    /// Restricted store holding the session token and user info.
    pub fn secure_store_path() -> PathBuf {
        planit_home().join("secure_store.json")
    }

    /// Unrestricted local store (preferences, and everything else in the
    /// vulnerable posture).
    pub fn local_store_path() -> PathBuf {
        planit_home().join("local_storage.json")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `PLANIT_LOG` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Log file name (relative to PLANIT_HOME) or absolute path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the PlanIt API
    pub api_url: String,

    /// Security posture of the client
    pub posture: Posture,

    /// Per-request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            posture: Posture::default(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Android emulator alias for the host's localhost.
    pub const DEFAULT_API_URL: &str = "http://10.0.2.2:5000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Per-request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    /// Resolves the API base URL with precedence: flag > env > config.
    ///
    /// The returned URL has no trailing slash.
    ///
    /// # Errors
    /// Returns an error if the winning value is not a valid URL.
    pub fn resolve_api_url(&self, flag: Option<&str>) -> Result<String> {
        let env = std::env::var(API_URL_ENV).ok();
        let candidate = [flag, env.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(self.api_url.trim());

        let parsed = url::Url::parse(candidate)
            .with_context(|| format!("Invalid API URL: {candidate}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("API URL must use http or https: {candidate}");
        }

        Ok(candidate.trim_end_matches('/').to_string())
    }

    /// Resolves the posture with precedence: flag > env > config.
    ///
    /// # Errors
    /// Returns an error if the flag or env value is not a known posture.
    pub fn resolve_posture(&self, flag: Option<&str>) -> Result<Posture> {
        if let Some(value) = flag {
            return value.parse();
        }
        match std::env::var(POSTURE_ENV) {
            Ok(value) if !value.trim().is_empty() => value
                .parse()
                .with_context(|| format!("Invalid {POSTURE_ENV}")),
            _ => Ok(self.posture),
        }
    }

    /// Resolves the configured log file against PLANIT_HOME.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        let file = self.logging.file.as_deref()?.trim();
        if file.is_empty() {
            return None;
        }
        let path = PathBuf::from(file);
        if path.is_absolute() {
            Some(path)
        } else {
            Some(paths::planit_home().join(path))
        }
    }

    /// Saves only the `api_url` field to the config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read, parsed, or written.
    pub fn save_api_url(url: &str) -> Result<()> {
        Self::save_api_url_to(&paths::config_path(), url)
    }

    /// Saves only the `api_url` field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read, parsed, or written.
    pub fn save_api_url_to(path: &Path, url: &str) -> Result<()> {
        url::Url::parse(url).with_context(|| format!("Invalid API URL: {url}"))?;
        Self::save_value_to(path, "api_url", url)
    }

    /// Saves only the `posture` field to the config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read, parsed, or written.
    pub fn save_posture(posture: Posture) -> Result<()> {
        Self::save_posture_to(&paths::config_path(), posture)
    }

    /// Saves only the `posture` field to a specific config file path.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read, parsed, or written.
    pub fn save_posture_to(path: &Path, posture: Posture) -> Result<()> {
        Self::save_value_to(path, "posture", posture.display_name())
    }

    fn save_value_to(path: &Path, key: &str, new_value: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc[key] = value(new_value);

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api_url, "http://10.0.2.2:5000");
        assert_eq!(config.posture, Posture::Secure);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "posture = \"vulnerable\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.posture, Posture::Vulnerable);
        assert_eq!(config.api_url, Config::DEFAULT_API_URL);
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let parsed: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("api_url = \"http://10.0.2.2:5000\""));
        assert!(contents.contains("# file ="));
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_save_api_url_preserves_other_values_and_comments() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "posture = \"vulnerable\"\n").unwrap();

        Config::save_api_url_to(&config_path, "http://localhost:5000").unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Base URL of the PlanIt API."));
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.posture, Posture::Vulnerable);
    }

    #[test]
    fn test_save_api_url_rejects_garbage() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        assert!(Config::save_api_url_to(&config_path, "not a url").is_err());
        assert!(!config_path.exists());
    }

    #[test]
    fn test_save_posture_creates_file_from_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        Config::save_posture_to(&config_path, Posture::Vulnerable).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.posture, Posture::Vulnerable);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_request_timeout_zero_disables() {
        let config = Config {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), None);
        assert_eq!(
            Config::default().request_timeout(),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_resolve_api_url_flag_wins_and_trims_slash() {
        let config = Config::default();
        let url = config
            .resolve_api_url(Some("http://127.0.0.1:9000/"))
            .unwrap();
        assert_eq!(url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_resolve_api_url_rejects_other_schemes() {
        let config = Config {
            api_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_url(Some("ftp://example.com")).is_err());
    }

    #[test]
    fn test_resolve_posture_flag_wins() {
        let config = Config::default();
        assert_eq!(
            config.resolve_posture(Some("vulnerable")).unwrap(),
            Posture::Vulnerable
        );
        assert!(config.resolve_posture(Some("nope")).is_err());
    }

    #[test]
    fn test_logging_file_loaded_from_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[logging]\nlevel = \"debug\"\nfile = \"/tmp/planit-test.log\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(
            config.log_file_path(),
            Some(PathBuf::from("/tmp/planit-test.log"))
        );
    }
}

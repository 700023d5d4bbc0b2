use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Settings the console starts with. Read from a TOML file when one exists;
/// every field has a working default so a config file is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the backend REST API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Where the session token lives. Defaults to the platform data
    /// directory.
    pub state_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            state_dir: None,
        }
    }
}

impl Config {
    /// Loads the user-level config file when present, otherwise the
    /// defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("malformed config at {}", path.display()))?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("backoffice").join("config.toml"))
    }

    pub fn state_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.state_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("backoffice"))
            .context("no platform data directory; set state_dir in the config")
    }

    /// Path of the persisted session token.
    pub fn token_path(&self) -> Result<PathBuf> {
        Ok(self.state_dir()?.join("session"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_the_local_backend() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn partial_files_keep_the_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"https://admin.example.com/api\"").unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.base_url, "https://admin.example.com/api");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_urll = \"typo\"").unwrap();
        assert!(Config::load_from(file.path()).is_err());
    }

    #[test]
    fn explicit_state_dir_wins() {
        let config = Config {
            state_dir: Some(PathBuf::from("/tmp/console-state")),
            ..Config::default()
        };
        assert_eq!(
            config.token_path().unwrap(),
            PathBuf::from("/tmp/console-state/session")
        );
    }
}

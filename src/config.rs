use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the dashboard backend; `/api/...` paths are appended.
    pub base_url: String,
    /// Interval for `watch` and the viewer's background refresh. Zero
    /// disables the viewer's refresh task.
    pub refresh_interval_secs: u64,
    /// Listen address for `serve`.
    pub listen_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            refresh_interval_secs: 30,
            listen_addr: "127.0.0.1:8331".to_string(),
        }
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("could not determine config directory")?;
        Ok(config_dir.join("fleetboard").join("config.toml"))
    }
}

pub fn load() -> Result<Config> {
    load_from(&Config::path()?)
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.refresh_interval_secs, 30);
    }

    #[test]
    fn partial_file_falls_back_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"https://fleet.example.net\"\n").unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.base_url, "https://fleet.example.net");
        assert_eq!(config.listen_addr, "127.0.0.1:8331");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [not toml").unwrap();

        assert!(load_from(&path).is_err());
    }
}

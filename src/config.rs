use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = ".egretconfig.json";

/// JSON config file in the user's home directory. The file bootstraps the
/// system (it carries the DB URL) and must exist; nothing creates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_user_name: Option<String>,
}

impl Config {
    pub fn read() -> Result<Config> {
        Self::read_from(&config_path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        let cfg = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(cfg)
    }

    /// Record `name` as the logged-in user and rewrite the file.
    pub fn set_user(&mut self, name: &str) -> Result<()> {
        self.current_user_name = Some(name.to_string());
        self.write_to(&config_path()?)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string(self)?;
        fs::write(path, raw)
            .with_context(|| format!("could not write config file {}", path.display()))?;
        Ok(())
    }
}

fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not resolve home directory")?;
    Ok(home.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut cfg = Config {
            db_url: Some("postgres://localhost:5432/egret".into()),
            current_user_name: None,
        };
        cfg.write_to(&path).unwrap();

        let got = Config::read_from(&path).unwrap();
        assert_eq!(got.db_url.as_deref(), Some("postgres://localhost:5432/egret"));
        assert_eq!(got.current_user_name, None);

        cfg.current_user_name = Some("robin".into());
        cfg.write_to(&path).unwrap();
        let got = Config::read_from(&path).unwrap();
        assert_eq!(got.current_user_name.as_deref(), Some("robin"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(Config::read_from(&path).is_err());
    }
}

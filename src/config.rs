use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

pub const DEFAULT_UNTITLED: &str = "(no title)";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Title printed for reminders that have none.
    pub untitled: String,
    /// Reminder list titles to query; empty means every list.
    pub lists: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            untitled: DEFAULT_UNTITLED.to_string(),
            lists: Vec::new(),
        }
    }
}

impl Config {
    /// Load the user config, falling back to defaults when it is missing or broken.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match Self::from_path(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("Ignoring {}: {:#}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).map(Some)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content).wrap_err("Invalid config")?;
        Ok(file.into_config())
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("reminder-count").join("config.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    untitled: Option<String>,
    lists: Option<Vec<String>>,
}

impl ConfigFile {
    fn into_config(self) -> Config {
        let mut config = Config::default();

        if let Some(untitled) = self.untitled {
            config.untitled = untitled;
        }
        if let Some(lists) = self.lists {
            config.lists = lists
                .into_iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();
        }

        config
    }
}

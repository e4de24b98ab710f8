//! Configuration structures and loading logic.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub subreddit: SubredditConfig,

    #[serde(default)]
    pub dates: DatesConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Feed targeting configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubredditConfig {
    /// Subreddit to scan, without the `r/` prefix.
    #[serde(default)]
    pub name: String,
}

/// Optional search window, `YYYY-MM-DD` on both ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatesConfig {
    #[serde(default)]
    pub before: Option<String>,

    #[serde(default)]
    pub after: Option<String>,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Root directory downloads land under.
    #[serde(default = "default_download_folder")]
    pub download_folder: PathBuf,

    /// Whether to show per-run progress bars.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_folder: default_download_folder(),
            show_progress: true,
        }
    }
}

fn default_download_folder() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download root directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options.download_folder.clone()
    }
}

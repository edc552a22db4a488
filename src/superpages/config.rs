//! # Configuration
//!
//! Settings live in `config.json` inside the data directory. A missing file
//! means defaults; unknown fields are ignored and missing ones fall back to
//! their defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default-format` | `rst` | Content format for new pages (`txt`, `rst`, `html`) |
//! | `default-template` | `superflatpages/detail.html` | Template used when a page has no custom one |
//! | `default-author` | unset | Author recorded when `--author` is not given |

use crate::error::{Result, SuperpagesError};
use crate::model::{ContentFormat, DEFAULT_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const CONFIG_KEYS: [&str; 3] = ["default-format", "default-template", "default-author"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuperpagesConfig {
    #[serde(default)]
    pub default_format: ContentFormat,

    #[serde(default = "default_template")]
    pub default_template: String,

    #[serde(default)]
    pub default_author: Option<String>,
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

impl Default for SuperpagesConfig {
    fn default() -> Self {
        Self {
            default_format: ContentFormat::default(),
            default_template: default_template(),
            default_author: None,
        }
    }
}

impl SuperpagesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SuperpagesError::Io)?;
        let config: SuperpagesConfig =
            serde_json::from_str(&content).map_err(SuperpagesError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SuperpagesError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SuperpagesError::Serialization)?;
        fs::write(config_path, content).map_err(SuperpagesError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-format" => Some(self.default_format.to_string()),
            "default-template" => Some(self.default_template.clone()),
            "default-author" => Some(self.default_author.clone().unwrap_or_default()),
            _ => None,
        }
    }

    /// Set a key from its string form. An empty value unsets `default-author`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default-format" => {
                self.default_format = value.parse()?;
            }
            "default-template" => {
                if value.trim().is_empty() {
                    return Err(SuperpagesError::Config(
                        "default-template cannot be empty".to_string(),
                    ));
                }
                self.default_template = value.trim().to_string();
            }
            "default-author" => {
                let value = value.trim();
                self.default_author = (!value.is_empty()).then(|| value.to_string());
            }
            _ => {
                return Err(SuperpagesError::Config(format!(
                    "Unknown config key: {} (expected one of {})",
                    key,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

use std::fs;
use std::path::{Path, PathBuf};

pub use clipboard::{ClipboardContext, ClipboardProvider};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Editor configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// General editor settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,

    /// File access settings
    #[serde(default)]
    pub files: FilesConfig,
}

/// Editor settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EditorConfig {
    /// File opened when none is given on the command line
    #[serde(default = "default_file")]
    pub default_file: String,

    /// Show line numbers
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,

    /// Spaces inserted for Tab
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,
}

/// Logging settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LogConfig {
    /// Log file, relative paths resolve against the user directory
    #[serde(default = "default_log_file")]
    pub file: String,

    /// Default level filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// File access settings
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FilesConfig {
    /// Paths that may never be opened or deleted, on top of the log file
    #[serde(default)]
    pub protected: Vec<PathBuf>,
}

// Default values
fn default_file() -> String {
    "untitled.txt".to_string()
}
fn default_show_line_numbers() -> bool {
    true
}
fn default_tab_width() -> usize {
    4
}
fn default_log_file() -> String {
    "splitedit.log".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_file: default_file(),
            show_line_numbers: default_show_line_numbers(),
            tab_width: default_tab_width(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Where the log file lives for a given user directory
    pub fn log_path(&self, user_dir: &Path) -> PathBuf {
        user_dir.join(&self.log.file)
    }

    /// Every path the document layer must refuse to touch
    pub fn protected_paths(&self, user_dir: &Path) -> Vec<PathBuf> {
        let mut paths = vec![self.log_path(user_dir)];
        paths.extend(self.files.protected.iter().cloned());
        paths
    }
}

/// Directory holding the config and log files
pub fn user_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("splitedit")
}

/// Configuration manager
pub struct ConfigManager {
    /// The config
    config: Config,

    /// The path to the config file
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager
    pub fn new(config_dir: &Path) -> Self {
        let config_path = config_dir.join("config.json");

        Self {
            config: Config::default(),
            config_path,
        }
    }

    /// Load the config
    pub fn load(&mut self) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Load config if it exists, otherwise use defaults
        if self.config_path.exists() {
            let config_str = fs::read_to_string(&self.config_path)?;
            self.config = serde_json::from_str(&config_str)
                .map_err(|e| anyhow!("Failed to parse config: {}", e))?;
        }

        Ok(())
    }

    /// Save the config
    pub fn save(&self) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, config_str)?;
        Ok(())
    }

    /// Get the config
    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// Get a mutable reference to the config
    pub fn get_config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Update a setting
    pub fn update_setting(&mut self, path: &str, value: serde_json::Value) -> Result<()> {
        match path {
            "editor.defaultFile" => {
                self.config.editor.default_file = value
                    .as_str()
                    .ok_or_else(|| anyhow!("Expected string"))?
                    .to_string();
            }
            "editor.showLineNumbers" => {
                self.config.editor.show_line_numbers =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "editor.tabWidth" => {
                self.config.editor.tab_width =
                    value.as_u64().ok_or_else(|| anyhow!("Expected number"))? as usize;
            }
            "log.file" => {
                self.config.log.file = value
                    .as_str()
                    .ok_or_else(|| anyhow!("Expected string"))?
                    .to_string();
            }
            "log.level" => {
                self.config.log.level = value
                    .as_str()
                    .ok_or_else(|| anyhow!("Expected string"))?
                    .to_string();
            }
            "files.protected" => {
                self.config.files.protected = serde_json::from_value(value)
                    .map_err(|e| anyhow!("Expected list of paths: {}", e))?;
            }
            _ => {
                return Err(anyhow!("Unsupported setting path: {}", path));
            }
        }

        Ok(())
    }

    /// Get a setting by path
    pub fn get_setting(&self, path: &str) -> Result<serde_json::Value> {
        match path {
            "editor.defaultFile" => Ok(serde_json::json!(self.config.editor.default_file)),
            "editor.showLineNumbers" => Ok(serde_json::json!(self.config.editor.show_line_numbers)),
            "editor.tabWidth" => Ok(serde_json::json!(self.config.editor.tab_width)),
            "log.file" => Ok(serde_json::json!(self.config.log.file)),
            "log.level" => Ok(serde_json::json!(self.config.log.level)),
            "files.protected" => Ok(serde_json::json!(self.config.files.protected)),
            _ => Err(anyhow!("Unsupported setting path: {}", path)),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = ".srcview";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config directory not found: could not determine home directory")]
    HomeDirNotFound,
    #[error("failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    ParseFailed(#[from] serde_json::Error),
}

/// Light or dark palette for the code view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    #[default]
    Dark,
}

impl ColorMode {
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    /// Name of the editor theme registered for this mode.
    pub fn theme_name(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.theme_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Initial color mode.
    #[serde(default)]
    pub color_mode: ColorMode,

    /// Width of the file sidebar in columns (desktop layout only).
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,

    /// Terminals narrower than this many columns use the mobile layout.
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: u16,

    /// Height in rows of the code view when only one file is shown.
    #[serde(default = "default_single_file_height")]
    pub single_file_height: u16,

    /// Lines moved by a single scroll-wheel notch.
    #[serde(default = "default_scroll_step")]
    pub scroll_step: usize,

    /// Capture mouse events (clicks on tabs, sidebar and import links).
    #[serde(default = "default_mouse")]
    pub mouse: bool,
}

fn default_sidebar_width() -> u16 {
    32
}

fn default_mobile_breakpoint() -> u16 {
    100
}

fn default_single_file_height() -> u16 {
    30
}

fn default_scroll_step() -> usize {
    3
}

fn default_mouse() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::default(),
            sidebar_width: default_sidebar_width(),
            mobile_breakpoint: default_mobile_breakpoint(),
            single_file_height: default_single_file_height(),
            scroll_step: default_scroll_step(),
            mouse: default_mouse(),
        }
    }
}

/// Return the config directory path: `~/.srcview/`
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
    Ok(home.join(CONFIG_DIR_NAME))
}

impl Config {
    /// Load configuration from the given config directory.
    /// Returns defaults if the file does not exist.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the given config directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir)?;
        let path = config_dir.join(CONFIG_FILE_NAME);
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        Ok(())
    }
}

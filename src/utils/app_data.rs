use crate::output::ColorMode;
use crate::pipeline::ExtractOptions;
use crate::utils::files::Encoding;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "rept";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the platform config directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Thresholds of the extraction loop
    #[serde(default)]
    pub extract: ExtractOptions,

    /// How input files are decoded
    #[serde(default)]
    pub encoding: Encoding,

    /// Trim extracted substrings to whole lines
    #[serde(default)]
    pub align_lines: bool,

    #[serde(default)]
    pub color: ColorMode,

    /// Glob patterns selecting files when walking directories
    /// (empty means every file)
    #[serde(default)]
    pub globs: Vec<String>,
}

impl AppConfig {
    /// Load config from `path` (the config directory when `None`), or
    /// return default if not found
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => get_config_path()?,
        };

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
            let config: AppConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
            log::debug!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = get_config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE))
}

/// Get the application config directory (not created)
pub fn get_config_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else {
        // Linux/Unix: XDG_CONFIG_HOME or ~/.config; Windows: roaming AppData
        dirs::config_dir()
    };

    let base = base.context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

//! CLI configuration loading.
//!
//! Search order: an explicit `--config` path, then `cogscreen.toml` in the
//! current directory, then `~/.config/cogscreen/config.toml`. A missing
//! config file is fine; defaults apply.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CogscreenConfig {
    /// Where the JSON results collection lives.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// User id attributed to results when `--user` is omitted.
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Optional directory of custom test definition TOML files, merged
    /// into the built-in catalog.
    #[serde(default)]
    pub tests_dir: Option<PathBuf>,
}

impl Default for CogscreenConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            default_user: default_user(),
            tests_dir: None,
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./cogscreen-results.json")
}

fn default_user() -> String {
    "default".to_string()
}

/// Load configuration, falling back to defaults when no file is found.
///
/// `COGSCREEN_DATA_FILE` overrides the data file path from any source.
pub fn load_config(explicit: Option<&Path>) -> Result<CogscreenConfig> {
    let mut config = match find_config_file(explicit)? {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => CogscreenConfig::default(),
    };

    if let Ok(data_file) = std::env::var("COGSCREEN_DATA_FILE") {
        config.data_file = PathBuf::from(data_file);
    }

    Ok(config)
}

fn find_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from("cogscreen.toml");
    if local.exists() {
        return Ok(Some(local));
    }

    if let Some(home) = std::env::var_os("HOME") {
        let user_config = PathBuf::from(home)
            .join(".config")
            .join("cogscreen")
            .join("config.toml");
        if user_config.exists() {
            return Ok(Some(user_config));
        }
    }

    Ok(None)
}

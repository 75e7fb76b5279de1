use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 1000;
pub const DEFAULT_LOCAL_STORAGE_KEY: &str = "kanbanColumns";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Quiet period after the last change before the board is written back
    #[serde(default)]
    pub save_debounce_ms: Option<u64>,

    /// Root directory for the remote record store and the local fallback slot
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub local_storage_key: Option<String>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/goalboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("goalboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("goalboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                match std::fs::read_to_string(&config_path) {
                    Ok(content) => return Self::from_toml_str(&content),
                    Err(e) => {
                        tracing::warn!("Failed to read {}: {}", config_path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    /// Parse a config document, falling back to defaults when it is malformed.
    pub fn from_toml_str(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid config file: {}", e);
            Self::default()
        })
    }

    pub fn effective_save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms.unwrap_or(DEFAULT_SAVE_DEBOUNCE_MS))
    }

    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("goalboard")))
            .unwrap_or_else(|| PathBuf::from(".goalboard"))
    }

    pub fn effective_local_storage_key(&self) -> &str {
        self.local_storage_key
            .as_deref()
            .unwrap_or(DEFAULT_LOCAL_STORAGE_KEY)
    }
}

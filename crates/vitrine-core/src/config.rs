use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// App configuration
///
/// Loaded from a toml file under the platform config directory; missing
/// file means defaults, so a first run needs no setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog backend; `/catalog` is appended per fetch.
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Where the SQLite store lives. Defaults to the platform data dir.
    pub db_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://storefront.example.com/api".to_string(),
            },
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the default location, falling back to defaults.
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::Config(format!("failed to parse config: {e}")))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to disk, creating the directory on first use.
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("failed to serialize config: {e}")))?;

        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Resolved path for the on-device store database.
    pub fn store_path(&self) -> crate::Result<PathBuf> {
        if let Some(path) = &self.store.db_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| crate::Error::Config("could not find data directory".into()))?;
        Ok(data_dir.join("vitrine").join("store.db3"))
    }

    fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::Config("could not find config directory".into()))?;
        Ok(config_dir.join("vitrine").join("config.toml"))
    }
}

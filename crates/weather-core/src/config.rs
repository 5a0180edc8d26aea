use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::assets::{AssetTable, ChannelName};
use super::error::AmbientError;
use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Slider position on start, 0..=100.
    #[serde(default = "default_initial_volume")]
    pub initial_volume: u8,
}

/// Where the sound files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding `summer.mp3`, `rain.mp3`, `winter.mp3`.
    /// Defaults to `assets/` beside the executable, else `<data_dir>/assets`.
    #[serde(default = "platform::assets_dir")]
    pub dir: PathBuf,
    /// Per-channel replacement sound: a path (relative to `dir`) or an
    /// `http(s)://` URL.
    #[serde(default)]
    pub sounds: HashMap<ChannelName, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            initial_volume: default_initial_volume(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: platform::assets_dir(),
            sounds: HashMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_initial_volume() -> u8 {
    50
}

fn default_log_filter() -> String {
    "info,symphonia=warn,hyper_util=warn,reqwest=warn".to_string()
}

impl Config {
    /// Read `config.toml` from the config dir; a missing file yields defaults.
    pub fn load() -> anyhow::Result<Self> {
        Ok(Self::load_from(&Self::config_path())?)
    }

    pub fn load_from(path: &Path) -> Result<Self, AmbientError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| AmbientError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, AmbientError> {
        let mut config: Self = toml::from_str(content).map_err(|e| AmbientError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.audio.initial_volume = config.audio.initial_volume.min(100);
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    pub fn asset_table(&self) -> AssetTable {
        AssetTable::new(&self.assets.dir, &self.assets.sounds)
    }
}

//! Static per-channel asset bindings.
//!
//! The table is built once at start from the built-in defaults plus any
//! overrides in `config.toml`, then shared read-only.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AmbientError;

/// One of the three ambient scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelName {
    Summer,
    Rain,
    Winter,
}

impl ChannelName {
    /// Declaration order; also the order buttons are laid out in.
    pub const ALL: [ChannelName; 3] = [ChannelName::Summer, ChannelName::Rain, ChannelName::Winter];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summer => "summer",
            Self::Rain => "rain",
            Self::Winter => "winter",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Summer => 0,
            Self::Rain => 1,
            Self::Winter => 2,
        }
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelName {
    type Err = AmbientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summer" => Ok(Self::Summer),
            "rain" => Ok(Self::Rain),
            "winter" => Ok(Self::Winter),
            _ => Err(AmbientError::UnknownChannel(s.to_string())),
        }
    }
}

/// Where a sound's raw bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    File(PathBuf),
    Url(String),
}

impl SoundSource {
    /// `http://` and `https://` strings become URLs; anything else is a path,
    /// resolved against `base` when relative.
    pub fn parse(raw: &str, base: &Path) -> Self {
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Self::Url(raw.to_string());
        }
        let path = PathBuf::from(raw);
        if path.is_absolute() {
            Self::File(path)
        } else {
            Self::File(base.join(path))
        }
    }
}

impl fmt::Display for SoundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

/// Backdrop drawn behind the buttons while a channel is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Sunshine,
    Rainfall,
    Snowfall,
}

#[derive(Debug, Clone)]
pub struct AssetBundle {
    pub background: Backdrop,
    pub icon: &'static str,
    pub sound: SoundSource,
}

/// Shown on a button whose channel is playing (clicking it pauses).
pub const PAUSE_ICON: &str = "⏸";

/// Immutable mapping from channel name to its asset bundle.
#[derive(Debug, Clone)]
pub struct AssetTable {
    bundles: [AssetBundle; 3],
}

impl AssetTable {
    /// Build the table from an asset directory and optional per-channel sound
    /// overrides (path or URL).
    pub fn new(assets_dir: &Path, sound_overrides: &HashMap<ChannelName, String>) -> Self {
        let bundle = |name: ChannelName| {
            let raw = sound_overrides
                .get(&name)
                .cloned()
                .unwrap_or_else(|| default_sound_file(name).to_string());
            AssetBundle {
                background: default_backdrop(name),
                icon: default_icon(name),
                sound: SoundSource::parse(&raw, assets_dir),
            }
        };
        Self {
            bundles: ChannelName::ALL.map(bundle),
        }
    }

    pub fn get(&self, name: ChannelName) -> &AssetBundle {
        &self.bundles[name.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChannelName, &AssetBundle)> {
        ChannelName::ALL.into_iter().zip(self.bundles.iter())
    }
}

fn default_sound_file(name: ChannelName) -> &'static str {
    match name {
        ChannelName::Summer => "summer.mp3",
        ChannelName::Rain => "rain.mp3",
        ChannelName::Winter => "winter.mp3",
    }
}

fn default_icon(name: ChannelName) -> &'static str {
    match name {
        ChannelName::Summer => "☀",
        ChannelName::Rain => "☂",
        ChannelName::Winter => "❄",
    }
}

fn default_backdrop(name: ChannelName) -> Backdrop {
    match name {
        ChannelName::Summer => Backdrop::Sunshine,
        ChannelName::Rain => Backdrop::Rainfall,
        ChannelName::Winter => Backdrop::Snowfall,
    }
}

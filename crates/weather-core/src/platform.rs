use std::path::PathBuf;

const APP_DIR: &str = "weather-sounds";

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/weather-sounds/ (XDG standard)
    // instead of macOS Application Support for consistency
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        // Portable install: a data/ directory next to the executable wins
        if let Some(exe_dir) = exe_dir() {
            let portable_data = exe_dir.join("data");
            if portable_data.exists() {
                return portable_data;
            }
        }

        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(windows)]
    {
        if let Some(exe_dir) = exe_dir() {
            if exe_dir.join("config.toml").exists() {
                return exe_dir;
            }
        }
    }

    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

/// Default location of the bundled sound files.
///
/// An `assets/` directory beside the executable takes precedence so that
/// packaged builds work without any setup; otherwise `<data_dir>/assets`.
pub fn assets_dir() -> PathBuf {
    if let Some(exe_dir) = exe_dir() {
        let bundled = exe_dir.join("assets");
        if bundled.exists() {
            return bundled;
        }
    }
    data_dir().join("assets")
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
}

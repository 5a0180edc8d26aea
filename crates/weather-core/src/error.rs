use std::path::PathBuf;

/// Errors surfaced by the weather-sounds core.
#[derive(Debug, thiserror::Error)]
pub enum AmbientError {
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {url} returned status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("decode error: {0}")]
    Decode(String),

    #[error("audio output error: {0}")]
    Output(String),

    #[error("load task failed: {0}")]
    Task(String),

    #[error("config parse error in {file}: {message}")]
    Config { file: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, AmbientError>;

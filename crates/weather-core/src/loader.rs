//! Fetching raw sound bytes from disk or over HTTP.

use std::time::Duration;

use tracing::debug;

use crate::assets::SoundSource;
use crate::error::{AmbientError, Result};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn fetch_sound(source: &SoundSource) -> Result<Vec<u8>> {
    match source {
        SoundSource::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| AmbientError::Read {
                    path: path.clone(),
                    source,
                })?;
            debug!("read {} bytes from {}", bytes.len(), path.display());
            Ok(bytes)
        }
        SoundSource::Url(url) => fetch_url(url).await,
    }
}

async fn fetch_url(url: &str) -> Result<Vec<u8>> {
    let http = |source: reqwest::Error| AmbientError::Http {
        url: url.to_string(),
        source,
    };
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(http)?;
    let resp = client.get(url).send().await.map_err(http)?;
    if !resp.status().is_success() {
        return Err(AmbientError::HttpStatus {
            url: url.to_string(),
            status: resp.status().as_u16(),
        });
    }
    let bytes = resp.bytes().await.map_err(http)?;
    debug!("fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}

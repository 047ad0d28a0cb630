//! Server runtime downloads
//!
//! Fetches server jars and BuildTools over HTTP. Downloads are idempotent:
//! a file already on disk is never fetched again, so re-running the debug
//! pipeline stays cheap.

use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::types::{SpigletError, SpigletResult};

/// Downloads files for the debug pipeline
pub struct Downloader {
    client: reqwest::Client,
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}

impl Downloader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch `url` into `dest`. Returns `false` when the file was already
    /// present and nothing was downloaded.
    pub async fn fetch(&self, url: &str, dest: &Path) -> SpigletResult<bool> {
        if dest.exists() {
            return Ok(false);
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SpigletError::Download(format!("Failed to fetch {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(SpigletError::Download(format!(
                "Failed to fetch {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpigletError::Download(format!("Failed to read {}: {}", url, e)))?;

        if bytes.is_empty() {
            return Err(SpigletError::Download(format!(
                "Downloaded file from {} is empty",
                url
            )));
        }

        let mut file = File::create(dest).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        Ok(true)
    }
}

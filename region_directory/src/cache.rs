//! Local cache for directory listings.
//!
//! A cache file holds the raw payload exactly as the directory returned it.
//! Files are owned by one process at a time; concurrent runs sharing a cache
//! directory may observe partial writes.

use crate::DirectoryError;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::path::Path;
use tracing::{debug, warn};

/// Decodes `path` if it holds a usable payload, otherwise calls `fetch`,
/// decodes its payload and writes it to `path` for the next run.
///
/// Any read or decode failure of the cache file counts as a miss.
pub async fn load_or_fetch<DTO, F, Fut>(path: &Path, fetch: F) -> Result<DTO, DirectoryError>
where
    DTO: DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Value, DirectoryError>>,
{
    match read_cached::<DTO>(path).await {
        Ok(cached) => {
            debug!(path = %path.display(), "Using cached directory payload");
            return Ok(cached);
        }
        Err(err) => debug!(path = %path.display(), "Cache miss: {err:#}"),
    }

    let payload = fetch().await?;
    let decoded = serde_json::from_value::<DTO>(payload.clone()).map_err(|source| {
        DirectoryError::MalformedPayload {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if let Err(err) = persist(path, &payload).await {
        warn!(path = %path.display(), "Failed to cache directory payload: {err:#}");
    }

    Ok(decoded)
}

async fn read_cached<DTO: DeserializeOwned>(path: &Path) -> anyhow::Result<DTO> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to decode {}", path.display()))
}

async fn persist(path: &Path, payload: &Value) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let contents = serde_json::to_string(payload).context("Failed to serialize payload")?;
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

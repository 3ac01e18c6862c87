use crate::DirectoryError;
use serde_json::Value;
use shared_kernel::http_client::HttpClient;
use std::path::PathBuf;
use tracing::info;
use url::Url;

pub mod list_sub_regions;
pub mod resolve_region;

/// Resolves region names and lists a region's sub-regions, caching each
/// listing on disk so later runs skip the directory round trip.
#[derive(Clone)]
pub struct RegionDirectory {
    http_client: HttpClient,
    base_url: Url,
    cache_directory: PathBuf,
}

impl RegionDirectory {
    pub fn new(http_client: HttpClient, base_url: Url, cache_directory: impl Into<PathBuf>) -> Self {
        Self {
            http_client,
            base_url,
            cache_directory: cache_directory.into(),
        }
    }

    fn cache_path(&self, file_name: &str) -> PathBuf {
        self.cache_directory.join(file_name)
    }

    fn endpoint(&self, path: &str) -> Result<Url, DirectoryError> {
        Ok(self.base_url.join(path)?)
    }

    async fn fetch(&self, url: Url) -> Result<Value, DirectoryError> {
        info!(%url, "Fetching directory listing");
        Ok(self.http_client.get_json(url).await?)
    }
}

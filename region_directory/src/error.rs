use shared_kernel::http_client::{HttpClientError, StatusCode};
use std::path::PathBuf;
use thiserror::Error as ThisError;
use url::Url;

/// Every variant is fatal: the directory is prerequisite data for a run.
#[derive(ThisError, Debug)]
pub enum DirectoryError {
    #[error("{url} returned {status}")]
    FetchFailed { url: Url, status: StatusCode },
    #[error("{url} returned 403, the directory is blocking this client")]
    Forbidden { url: Url },
    #[error("Could not find region {name}, try one of {suggestions:?}")]
    RegionNotFound {
        name: String,
        suggestions: Vec<String>,
    },
    #[error("Directory payload for {} has an unexpected shape", path.display())]
    MalformedPayload {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to build directory url")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Transport(anyhow::Error),
}

impl DirectoryError {
    pub fn is_forbidden(&self) -> bool {
        matches!(self, DirectoryError::Forbidden { .. })
    }
}

impl From<HttpClientError> for DirectoryError {
    fn from(error: HttpClientError) -> Self {
        match error {
            HttpClientError::Forbidden { url } => DirectoryError::Forbidden { url },
            HttpClientError::UnexpectedStatus { url, status } => {
                DirectoryError::FetchFailed { url, status }
            }
            other => DirectoryError::Transport(anyhow::Error::new(other)),
        }
    }
}

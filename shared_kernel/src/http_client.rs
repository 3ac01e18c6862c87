use anyhow::{anyhow, Context};
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue};
pub use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error as ThisError;
use url::Url;

/// The language and user agent every request of a run is sent with.
///
/// Chosen once when the process starts and then handed to the [`HttpClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientIdentity {
    language: String,
    user_agent: String,
}

impl ClientIdentity {
    pub fn new(language: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn choose_from(language: impl Into<String>, user_agents: &[String]) -> anyhow::Result<Self> {
        let user_agent = user_agents
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| anyhow!("The user agent pool is empty"))?;
        Ok(Self::new(language, user_agent.clone()))
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn headers(&self) -> HashMap<&'static str, String> {
        HashMap::from([
            ("accept-language", self.language.clone()),
            ("user-agent", self.user_agent.clone()),
        ])
    }
}

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error(transparent)]
    ResponseError(#[from] anyhow::Error),
    #[error("httpBuilderError {0}")]
    HTTPBuilderError(String),
    #[error("{url} returned 403")]
    Forbidden { url: Url },
    #[error("{url} returned {status}")]
    UnexpectedStatus { url: Url, status: StatusCode },
}

struct HeadersMapGenerator(HeaderMap);

impl HeadersMapGenerator {
    fn into_inner(self) -> HeaderMap {
        self.0
    }
}

impl TryFrom<HashMap<&'static str, String>> for HeadersMapGenerator {
    type Error = HttpClientError;

    fn try_from(value: HashMap<&'static str, String>) -> Result<Self, Self::Error> {
        let mut header_map = HeaderMap::new();

        for (key, value) in value.into_iter() {
            let value = HeaderValue::from_str(&value)
                .map_err(|err| HttpClientError::HTTPBuilderError(format!("{err} {value}")))?;
            header_map.insert(key, value);
        }
        Ok(Self(header_map))
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: ClientWithMiddleware,
}

impl HttpClient {
    pub fn new(identity: &ClientIdentity) -> Result<Self, HttpClientError> {
        let header_map = HeadersMapGenerator::try_from(identity.headers())?.into_inner();
        let client = reqwest::Client::builder()
            .default_headers(header_map)
            .build()
            .map_err(|err| HttpClientError::HTTPBuilderError(err.to_string()))?;
        let client = ClientBuilder::new(client)
            .with(TracingMiddleware::default())
            .build();
        Ok(Self { client })
    }

    /// Issues a GET and decodes a 200 body as JSON. A 403 is reported as
    /// [`HttpClientError::Forbidden`] so callers can tell a blocked client
    /// apart from an ordinary failed request.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn get_json(&self, url: Url) -> Result<Value, HttpClientError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch request from {url}"))?;

        match response.status() {
            StatusCode::OK => response
                .json::<Value>()
                .await
                .with_context(|| format!("Failed to deserialize response from {url}"))
                .map_err(HttpClientError::ResponseError),
            StatusCode::FORBIDDEN => Err(HttpClientError::Forbidden { url }),
            status => Err(HttpClientError::UnexpectedStatus { url, status }),
        }
    }
}

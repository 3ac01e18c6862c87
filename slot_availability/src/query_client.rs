use crate::data_transfer::raw::{CalendarResponse, DayResponse, RawCalendarCenter, RawSlot};
use async_trait::async_trait;
use region_directory::data_transfer::SubRegionId;
use shared_kernel::date_time::query_date::QueryDate;
use shared_kernel::http_client::{HttpClient, HttpClientError, StatusCode};
use thiserror::Error as ThisError;
use url::Url;

/// Which availability endpoint to ask. The tag decides how the response is
/// decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// One day per call.
    Day,
    /// About seven days per call, starting at the query date.
    Week,
}

impl EndpointKind {
    fn path(&self) -> &'static str {
        match self {
            EndpointKind::Day => "v2/appointment/sessions/public/findByDistrict",
            EndpointKind::Week => "v2/appointment/sessions/public/calendarByDistrict",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    Day(Vec<RawSlot>),
    Week(Vec<RawCalendarCenter>),
}

#[derive(ThisError, Debug)]
pub enum SlotQueryError {
    #[error("{url} returned 403, the remote is blocking this client")]
    Forbidden { url: Url },
    #[error("{url} returned {status}")]
    QueryFailed { url: Url, status: StatusCode },
    #[error("Unexpected {kind:?} payload from {url}")]
    MalformedPayload {
        url: Url,
        kind: EndpointKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to build slot query url")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Transport(anyhow::Error),
}

impl SlotQueryError {
    /// Fatal errors end the whole run. Everything else only costs the data of
    /// one (sub-region, date) slice.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SlotQueryError::Forbidden { .. } | SlotQueryError::InvalidUrl(_)
        )
    }
}

impl From<HttpClientError> for SlotQueryError {
    fn from(error: HttpClientError) -> Self {
        match error {
            HttpClientError::Forbidden { url } => SlotQueryError::Forbidden { url },
            HttpClientError::UnexpectedStatus { url, status } => {
                SlotQueryError::QueryFailed { url, status }
            }
            other => SlotQueryError::Transport(anyhow::Error::new(other)),
        }
    }
}

#[async_trait]
pub trait SlotSource: Send + Sync {
    async fn query(
        &self,
        kind: EndpointKind,
        sub_region_id: SubRegionId,
        date: QueryDate,
    ) -> Result<RawPayload, SlotQueryError>;
}

pub struct SlotQueryClient {
    http_client: HttpClient,
    base_url: Url,
}

impl SlotQueryClient {
    pub fn new(http_client: HttpClient, base_url: Url) -> Self {
        Self {
            http_client,
            base_url,
        }
    }

    fn url(
        &self,
        kind: EndpointKind,
        sub_region_id: SubRegionId,
        date: QueryDate,
    ) -> Result<Url, SlotQueryError> {
        let mut url = self.base_url.join(kind.path())?;
        url.query_pairs_mut()
            .append_pair("district_id", &sub_region_id.to_string())
            .append_pair("date", &date.to_string());
        Ok(url)
    }
}

#[async_trait]
impl SlotSource for SlotQueryClient {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn query(
        &self,
        kind: EndpointKind,
        sub_region_id: SubRegionId,
        date: QueryDate,
    ) -> Result<RawPayload, SlotQueryError> {
        let url = self.url(kind, sub_region_id, date)?;
        let body = self.http_client.get_json(url.clone()).await?;
        let malformed = |source| SlotQueryError::MalformedPayload { url, kind, source };

        match kind {
            EndpointKind::Day => serde_json::from_value::<DayResponse>(body)
                .map(|response| RawPayload::Day(response.sessions))
                .map_err(malformed),
            EndpointKind::Week => serde_json::from_value::<CalendarResponse>(body)
                .map(|response| RawPayload::Week(response.centers))
                .map_err(malformed),
        }
    }
}

use crate::data_transfer::AggregatedResult;
use crate::normalizer::{normalize, normalize_day};
use crate::presenter;
use crate::query_client::{EndpointKind, RawPayload, SlotQueryError, SlotSource};
use region_directory::data_transfer::SubRegion;
use shared_kernel::date_time::query_date::QueryDate;
use std::io::Write;
use thiserror::Error as ThisError;
use tracing::{error, info, warn};

#[derive(ThisError, Debug)]
pub enum AggregationError {
    #[error(transparent)]
    Query(#[from] SlotQueryError),
    #[error("Failed to write the report")]
    Output(#[from] std::io::Error),
}

/// How many slot queries a run issued, and how many of those came back
/// without data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueryStats {
    pub issued: usize,
    pub failed: usize,
}

/// Walks sub-regions and dates against a [`SlotSource`], one query at a time.
pub struct AvailabilityAggregator<S> {
    source: S,
}

impl<S: SlotSource> AvailabilityAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Week mode. Dates form the outer loop and sub-regions the inner one.
    /// Every sub-region appears in the result, with no dates if nothing was
    /// found for it. The first fatal error ends the run.
    #[tracing::instrument(skip_all, fields(sub_regions = sub_regions.len(), dates = dates.len()), level = "info")]
    pub async fn run_week(
        &self,
        sub_regions: &[SubRegion],
        dates: &[QueryDate],
    ) -> Result<(AggregatedResult, QueryStats), SlotQueryError> {
        let mut result = AggregatedResult::new();
        let mut stats = QueryStats::default();

        for sub_region in sub_regions {
            result.register(&sub_region.sub_region_name);
        }

        for date in dates {
            for sub_region in sub_regions {
                let payload = self
                    .query_slice(EndpointKind::Week, sub_region, *date, &mut stats)
                    .await?;
                if let Some(payload) = payload {
                    result.merge(&sub_region.sub_region_name, normalize(payload, *date));
                }
            }
        }

        info!(
            issued = stats.issued,
            failed = stats.failed,
            slots = result.slot_count(),
            "Week run finished"
        );
        Ok((result, stats))
    }

    /// Day mode. Sub-regions form the outer loop and dates the inner one.
    /// Matches are written to `out` as soon as a date has any; nothing is
    /// kept across dates.
    #[tracing::instrument(skip_all, fields(sub_regions = sub_regions.len(), dates = dates.len()), level = "info")]
    pub async fn run_day<W: Write + Send>(
        &self,
        sub_regions: &[SubRegion],
        dates: &[QueryDate],
        out: &mut W,
    ) -> Result<QueryStats, AggregationError> {
        let mut stats = QueryStats::default();

        for sub_region in sub_regions {
            presenter::write_sub_region_banner(out, &sub_region.sub_region_name)?;
            for date in dates {
                let payload = self
                    .query_slice(EndpointKind::Day, sub_region, *date, &mut stats)
                    .await?;
                let Some(RawPayload::Day(sessions)) = payload else {
                    continue;
                };
                let slots = normalize_day(sessions, *date);
                if slots.is_empty() {
                    continue;
                }
                presenter::write_date_heading(out, &date.to_string())?;
                for slot in &slots {
                    presenter::write_slot(out, slot)?;
                }
            }
        }

        info!(
            issued = stats.issued,
            failed = stats.failed,
            "Day run finished"
        );
        Ok(stats)
    }

    /// Issues one query. Non-fatal failures are logged and yield `None` so
    /// the caller moves on to the next slice.
    async fn query_slice(
        &self,
        kind: EndpointKind,
        sub_region: &SubRegion,
        date: QueryDate,
        stats: &mut QueryStats,
    ) -> Result<Option<RawPayload>, SlotQueryError> {
        stats.issued += 1;
        match self.source.query(kind, sub_region.sub_region_id, date).await {
            Ok(payload) => Ok(Some(payload)),
            Err(err @ SlotQueryError::Forbidden { .. }) => {
                error!("Blocked by the remote, aborting the run: {err}");
                Err(err)
            }
            Err(err) if err.is_fatal() => {
                error!("{err}");
                Err(err)
            }
            Err(err) => {
                stats.failed += 1;
                warn!(
                    sub_region = %sub_region.sub_region_name,
                    %date,
                    "No data for this slice: {err:#}"
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AggregationError, AvailabilityAggregator};
    use crate::data_transfer::raw::{RawCalendarCenter, RawCalendarSession, RawSlot};
    use crate::query_client::{EndpointKind, RawPayload, SlotQueryError, SlotSource};
    use async_trait::async_trait;
    use region_directory::data_transfer::{SubRegion, SubRegionId};
    use serde_json::json;
    use shared_kernel::date_time::query_date::QueryDate;
    use shared_kernel::http_client::StatusCode;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use url::Url;

    #[derive(Clone, Copy)]
    enum Reply {
        Centers(usize),
        Sessions(usize),
        Failed,
        Forbidden,
    }

    /// Replies per (sub-region, date); anything not listed gets an empty
    /// payload of the requested kind.
    #[derive(Default)]
    struct FakeSource {
        replies: HashMap<(u32, String), Reply>,
        calls: Mutex<Vec<(EndpointKind, u32, String)>>,
    }

    impl FakeSource {
        fn reply(mut self, sub_region: u32, date: &str, reply: Reply) -> Self {
            self.replies.insert((sub_region, date.to_string()), reply);
            self
        }

        fn calls(&self) -> Vec<(EndpointKind, u32, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn url() -> Url {
        Url::parse("https://example.org/slots").unwrap()
    }

    fn center(date: &str, sessions: usize) -> RawCalendarCenter {
        RawCalendarCenter {
            name: "Civil Hospital".to_string(),
            address: None,
            pincode: 110001,
            fee_type: Some("Free".to_string()),
            sessions: (0..sessions)
                .map(|_| RawCalendarSession {
                    date: date.to_string(),
                    vaccine: "COVISHIELD".to_string(),
                    min_age_limit: json!(18).into(),
                    available_capacity: 5,
                    available_capacity_dose1: 5,
                })
                .collect(),
        }
    }

    fn day_slot() -> RawSlot {
        RawSlot {
            name: "Civil Hospital".to_string(),
            pincode: 110001,
            vaccine: "COVAXIN".to_string(),
            available_capacity: 4,
            min_age_limit: json!(18).into(),
            date: None,
        }
    }

    #[async_trait]
    impl SlotSource for FakeSource {
        async fn query(
            &self,
            kind: EndpointKind,
            sub_region_id: SubRegionId,
            date: QueryDate,
        ) -> Result<RawPayload, SlotQueryError> {
            let date = date.to_string();
            self.calls
                .lock()
                .unwrap()
                .push((kind, sub_region_id.inner(), date.clone()));
            let reply = self.replies.get(&(sub_region_id.inner(), date.clone())).copied();
            match (kind, reply) {
                (_, Some(Reply::Failed)) => Err(SlotQueryError::QueryFailed {
                    url: url(),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                }),
                (_, Some(Reply::Forbidden)) => Err(SlotQueryError::Forbidden { url: url() }),
                (EndpointKind::Week, Some(Reply::Centers(sessions))) => {
                    Ok(RawPayload::Week(vec![center(&date, sessions)]))
                }
                (EndpointKind::Day, Some(Reply::Sessions(count))) => {
                    Ok(RawPayload::Day((0..count).map(|_| day_slot()).collect()))
                }
                (EndpointKind::Week, _) => Ok(RawPayload::Week(vec![])),
                (EndpointKind::Day, _) => Ok(RawPayload::Day(vec![])),
            }
        }
    }

    fn sub_regions() -> Vec<SubRegion> {
        vec![
            SubRegion {
                sub_region_id: SubRegionId::new(2),
                sub_region_name: "South".to_string(),
            },
            SubRegion {
                sub_region_id: SubRegionId::new(1),
                sub_region_name: "Central".to_string(),
            },
        ]
    }

    fn dates(values: &[&str]) -> Vec<QueryDate> {
        values
            .iter()
            .map(|value| QueryDate::parse(value).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_week_mode_visits_dates_then_sub_regions_and_keeps_empty_sub_regions() {
        let source = FakeSource::default().reply(1, "01-05-2021", Reply::Centers(1));
        let aggregator = AvailabilityAggregator::new(source);

        let (result, stats) = aggregator
            .run_week(&sub_regions(), &dates(&["01-05-2021", "08-05-2021"]))
            .await
            .unwrap();

        let calls = aggregator
            .source
            .calls()
            .into_iter()
            .map(|(_, id, date)| (id, date))
            .collect::<Vec<_>>();
        assert_eq!(
            calls,
            vec![
                (2, "01-05-2021".to_string()),
                (1, "01-05-2021".to_string()),
                (2, "08-05-2021".to_string()),
                (1, "08-05-2021".to_string()),
            ]
        );
        assert_eq!(stats.issued, 4);
        assert_eq!(stats.failed, 0);
        assert_eq!(result.get("Central").unwrap().slot_count(), 1);
        assert!(result.get("South").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_slices_are_skipped() {
        let source = FakeSource::default()
            .reply(2, "01-05-2021", Reply::Failed)
            .reply(1, "01-05-2021", Reply::Centers(2));
        let aggregator = AvailabilityAggregator::new(source);

        let (result, stats) = aggregator
            .run_week(&sub_regions(), &dates(&["01-05-2021"]))
            .await
            .unwrap();

        assert_eq!(stats.failed, 1);
        assert_eq!(result.get("Central").unwrap().slot_count(), 2);
        assert!(result.get("South").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_a_forbidden_reply_stops_the_run_immediately() {
        let source = FakeSource::default().reply(2, "01-05-2021", Reply::Forbidden);
        let aggregator = AvailabilityAggregator::new(source);

        let error = aggregator
            .run_week(&sub_regions(), &dates(&["01-05-2021", "08-05-2021"]))
            .await
            .unwrap_err();

        assert!(matches!(error, SlotQueryError::Forbidden { .. }));
        assert_eq!(aggregator.source.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_day_mode_visits_sub_regions_then_dates_and_prints_matches() {
        let source = FakeSource::default().reply(1, "02-05-2021", Reply::Sessions(2));
        let aggregator = AvailabilityAggregator::new(source);
        let mut out = Vec::new();

        let stats = aggregator
            .run_day(&sub_regions(), &dates(&["01-05-2021", "02-05-2021"]), &mut out)
            .await
            .unwrap();

        assert_eq!(
            aggregator.source.calls(),
            vec![
                (EndpointKind::Day, 2, "01-05-2021".to_string()),
                (EndpointKind::Day, 2, "02-05-2021".to_string()),
                (EndpointKind::Day, 1, "01-05-2021".to_string()),
                (EndpointKind::Day, 1, "02-05-2021".to_string()),
            ]
        );
        assert_eq!(stats.issued, 4);

        let printed = String::from_utf8(out).unwrap();
        let lines = printed.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains(" South "));
        assert!(lines[1].contains(" Central "));
        assert!(lines[2].contains(" 02-05-2021 "));
        assert!(lines[3].contains("Name: Civil Hospital"));
        assert!(!printed.contains("01-05-2021"));
    }

    #[tokio::test]
    async fn test_day_mode_stops_on_forbidden() {
        let source = FakeSource::default().reply(2, "01-05-2021", Reply::Forbidden);
        let aggregator = AvailabilityAggregator::new(source);
        let mut out = Vec::new();

        let error = aggregator
            .run_day(&sub_regions(), &dates(&["01-05-2021", "02-05-2021"]), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            AggregationError::Query(SlotQueryError::Forbidden { .. })
        ));
        assert_eq!(aggregator.source.calls().len(), 1);
    }
}

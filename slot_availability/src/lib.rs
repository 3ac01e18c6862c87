pub mod aggregator;
pub mod data_transfer;
pub mod normalizer;
pub mod presenter;
pub mod query_client;

pub use aggregator::{AggregationError, AvailabilityAggregator, QueryStats};
pub use query_client::{EndpointKind, RawPayload, SlotQueryClient, SlotQueryError, SlotSource};

//! Record shapes returned by the two slot endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const ELIGIBLE_AGE_LIMIT: &str = "18";

/// Minimum age of a session, as sent by the remote. The remote has sent both
/// numbers and strings here, so only the textual form is compared.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct AgeLimit(Value);

impl AgeLimit {
    pub fn textual(&self) -> String {
        match &self.0 {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.textual() == ELIGIBLE_AGE_LIMIT
    }
}

impl From<Value> for AgeLimit {
    fn from(value: Value) -> Self {
        AgeLimit(value)
    }
}

/// One site on one day, from the day endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawSlot {
    pub name: String,
    pub pincode: u32,
    #[serde(default)]
    pub vaccine: String,
    #[serde(default)]
    pub available_capacity: u32,
    #[serde(default)]
    pub min_age_limit: AgeLimit,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DayResponse {
    #[serde(default)]
    pub sessions: Vec<RawSlot>,
}

/// One site with roughly a week of sessions, from the calendar endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawCalendarCenter {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub pincode: u32,
    #[serde(default)]
    pub fee_type: Option<String>,
    #[serde(default)]
    pub sessions: Vec<RawCalendarSession>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawCalendarSession {
    pub date: String,
    #[serde(default)]
    pub vaccine: String,
    #[serde(default)]
    pub min_age_limit: AgeLimit,
    #[serde(default)]
    pub available_capacity: u32,
    #[serde(default)]
    pub available_capacity_dose1: u32,
}

impl RawCalendarSession {
    pub fn is_eligible(&self) -> bool {
        self.min_age_limit.is_eligible()
            && self.available_capacity > 0
            && self.available_capacity_dose1 > 0
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CalendarResponse {
    #[serde(default)]
    pub centers: Vec<RawCalendarCenter>,
}

use crate::data_transfer::raw::{RawCalendarCenter, RawSlot};
use crate::data_transfer::{CanonicalSlot, DatedSlots};
use crate::query_client::RawPayload;
use itertools::Itertools;
use shared_kernel::date_time::query_date::QueryDate;

/// Keeps the day sessions open to the 18+ bracket, in their original order.
/// A session without its own date is stamped with the query date.
pub fn normalize_day(sessions: Vec<RawSlot>, date: QueryDate) -> Vec<CanonicalSlot> {
    sessions
        .into_iter()
        .filter(|session| session.min_age_limit.is_eligible())
        .map(|session| CanonicalSlot {
            site_name: session.name,
            pincode: session.pincode,
            vaccine: session.vaccine,
            fee_type: None,
            available_capacity: session.available_capacity,
            available_capacity_dose1: None,
            address: None,
            date: session.date.unwrap_or_else(|| date.to_string()),
        })
        .collect()
}

/// Flattens calendar centers into slots grouped by session date.
///
/// Only sessions open to 18+ with first-dose capacity left are kept. Within a
/// center, sessions are visited in ascending date-string order; a center
/// without sessions contributes nothing.
pub fn normalize_week(centers: Vec<RawCalendarCenter>) -> DatedSlots {
    let mut dated = DatedSlots::new();

    for center in centers {
        let sessions = center
            .sessions
            .into_iter()
            .filter(|session| session.is_eligible())
            .sorted_by(|left, right| left.date.cmp(&right.date));

        for session in sessions {
            let date = session.date;
            let slot = CanonicalSlot {
                site_name: center.name.clone(),
                pincode: center.pincode,
                vaccine: session.vaccine,
                fee_type: center.fee_type.clone(),
                available_capacity: session.available_capacity,
                available_capacity_dose1: Some(session.available_capacity_dose1),
                address: center.address.clone(),
                date: date.clone(),
            };
            dated.push(&date, slot);
        }
    }

    dated
}

/// Normalizes either payload shape into dated slots. Day payloads land
/// under their query date, and only when something matched.
pub fn normalize(payload: RawPayload, date: QueryDate) -> DatedSlots {
    match payload {
        RawPayload::Day(sessions) => {
            let slots = normalize_day(sessions, date);
            let mut dated = DatedSlots::new();
            if !slots.is_empty() {
                dated.insert(date.to_string(), slots);
            }
            dated
        }
        RawPayload::Week(centers) => normalize_week(centers),
    }
}

use chrono::{Datelike, NaiveDate};

const WIRE_FORMAT: &str = "%d-%m-%Y";

/// A calendar date as the slot endpoints expect it: `DD-MM-YYYY`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct QueryDate(NaiveDate);

impl QueryDate {
    pub fn from_parts(day: u32, month: u32, year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(value, WIRE_FORMAT).map(Self)
    }

    /// Every calendar day of the month, first to last. An invalid month
    /// yields no dates.
    pub fn days_of_month(month: u32, year: i32) -> Vec<Self> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return vec![];
        };
        first
            .iter_days()
            .take_while(|day| day.month() == month)
            .map(Self)
            .collect()
    }

    /// `today`, then every 7th day after it that still falls in today's month.
    /// Each date anchors one calendar query covering the following week.
    pub fn weekly_window(today: NaiveDate) -> Vec<Self> {
        today
            .iter_weeks()
            .take_while(|day| day.month() == today.month() && day.year() == today.year())
            .map(Self)
            .collect()
    }
}

impl std::fmt::Display for QueryDate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

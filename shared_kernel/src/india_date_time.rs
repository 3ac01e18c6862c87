use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Kolkata;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
/// IndiaDateTime stores the time as `DateTime<UTC>` and reads dates off the
/// Asia/Kolkata calendar, which is the calendar the slot directory uses
pub struct IndiaDateTime(DateTime<Utc>);

impl IndiaDateTime {
    pub fn now() -> Self {
        IndiaDateTime(Utc::now())
    }

    pub fn date(&self) -> NaiveDate {
        self.to_date_time().date_naive()
    }

    pub fn to_date_time(&self) -> DateTime<Tz> {
        Kolkata.from_utc_datetime(&self.0.naive_utc())
    }
}

impl From<DateTime<Utc>> for IndiaDateTime {
    fn from(data: DateTime<Utc>) -> IndiaDateTime {
        IndiaDateTime(data)
    }
}

#[cfg(test)]
mod tests {
    use super::IndiaDateTime;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_date_rolls_over_before_utc_midnight() {
        let late_evening_utc = Utc.with_ymd_and_hms(2021, 4, 30, 20, 0, 0).unwrap();
        let date = IndiaDateTime::from(late_evening_utc).date();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 5, 1).unwrap());
    }

    #[test]
    fn test_date_matches_utc_during_the_day() {
        let morning_utc = Utc.with_ymd_and_hms(2021, 4, 30, 3, 0, 0).unwrap();
        let date = IndiaDateTime::from(morning_utc).date();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 4, 30).unwrap());
    }
}

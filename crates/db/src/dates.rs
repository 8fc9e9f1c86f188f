//! Calendar-date normalisation.
//!
//! Every date that leaves the service is a plain `YYYY-MM-DD` string.  On the
//! way in we are lenient: clients that echo back a full timestamp (as some
//! drivers hand out for `DATE` columns) still land on the right day.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Wire format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a client-supplied date.
///
/// Accepts `2024-01-05`, `2024-01-05T00:00:00.000Z` (any RFC 3339 offset),
/// `2024-01-05 08:30:00` and `2024-01-05T08:30:00`.  Timestamps keep the
/// calendar day as written; no timezone shifting is applied.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.naive_local().date());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(ts.date());
        }
    }
    None
}

/// Render a date the way every response carries it.
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `#[serde(with = "db::dates::ymd")]` for `NaiveDate` fields.
pub mod ymd {
    use super::*;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_date(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }
}

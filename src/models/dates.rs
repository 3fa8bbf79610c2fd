//! Date parsing shared by the wire format and the CLI
//!
//! Dates travel as `YYYY-MM-DD`. Some clients send full timestamps for
//! income and saving dates, so reading also accepts RFC 3339 and naive
//! `YYYY-MM-DDTHH:MM:SS` values and keeps the calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date or a timestamp into a calendar date
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(ts.date());
    }
    Err(format!("invalid date '{}', expected YYYY-MM-DD", input))
}

/// Serde adapter for `Option<NaiveDate>` fields
pub mod optional {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(super::DATE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_date(s).map(Some).map_err(de::Error::custom),
        }
    }
}

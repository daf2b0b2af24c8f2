//! Normalisation of free-text issue dates into ISO-8601 instants.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Placeholder DSpace renders for a missing date
const NO_DATE: &str = "-";

const FULL_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

const MONTH_FORMATS: &[&str] = &["%Y-%m", "%Y/%m", "%b-%Y", "%b %Y", "%B %Y", "%B-%Y"];

/// Normalise a date cell to an ISO-8601 instant in UTC.
///
/// Calendar dates land on UTC midnight; full RFC 3339 instants keep their
/// time of day. Empty text and the `-` placeholder map to `Ok(None)`; text
/// that is not a recognisable full or partial date is `Error::MalformedDate`.
pub fn normalize(raw: &str) -> Result<Option<String>> {
    let text = raw.trim().trim_matches('\u{a0}').trim();
    if text.is_empty() || text == NO_DATE {
        return Ok(None);
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(
            instant
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ));
    }

    parse_date(text)
        .map(|date| Some(to_iso(date)))
        .ok_or_else(|| Error::MalformedDate {
            raw: raw.to_string(),
        })
}

/// Like [`normalize`], but degrades malformed text to `None`
#[must_use]
pub fn normalize_lossy(raw: &str) -> Option<String> {
    match normalize(raw) {
        Ok(date) => date,
        Err(e) => {
            tracing::warn!("Dropping issue date: {}", e);
            None
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Some(date) = FULL_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    {
        return Some(date);
    }

    // chrono needs a day to build a date, so partial dates get the first
    let padded = format!("{text} 01");
    if let Some(date) = MONTH_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&padded, &format!("{format} %d")).ok())
    {
        return Some(date);
    }

    if text.len() == 4 && text.bytes().all(|b| b.is_ascii_digit()) {
        return text
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    None
}

fn to_iso(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

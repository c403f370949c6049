//! Date formatting for date dimensions
//!
//! Callers may inject their own `DateFormatter`; `ChronoDateFormatter`
//! is used otherwise and understands strftime patterns plus a `%Q`
//! quarter extension. Patterns chrono cannot parse never reach
//! `DateTime::format`.

use crate::model::RawValue;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Formats a date with a format string
pub trait DateFormatter: Send + Sync {
    fn format(&self, date: DateTime<Utc>, format: &str) -> String;
}

/// Default formatter backed by chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDateFormatter;

/// Used when a caller format cannot be parsed
pub const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

impl DateFormatter for ChronoDateFormatter {
    fn format(&self, date: DateTime<Utc>, format: &str) -> String {
        let quarter = (date.month0() / 3 + 1).to_string();
        let format = format.replace("%Q", &quarter);
        let items: Vec<Item<'_>> = StrftimeItems::new(&format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            tracing::warn!("Invalid date format '{}', using {}", format, FALLBACK_DATE_FORMAT);
            return date.format(FALLBACK_DATE_FORMAT).to_string();
        }
        date.format_with_items(items.into_iter()).to_string()
    }
}

/// Whether chrono can render a format string (`%Q` included)
pub fn is_valid_date_format(format: &str) -> bool {
    let format = format.replace("%Q", "1");
    !StrftimeItems::new(&format).any(|item| matches!(item, Item::Error))
}

impl<F> DateFormatter for F
where
    F: Fn(DateTime<Utc>, &str) -> String + Send + Sync,
{
    fn format(&self, date: DateTime<Utc>, format: &str) -> String {
        self(date, format)
    }
}

/// Granularity of a date dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateGranularity {
    Years,
    Quarters,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
}

impl DateGranularity {
    /// Default format string for this granularity
    pub fn default_format(&self) -> &'static str {
        match self {
            DateGranularity::Years => "%Y",
            DateGranularity::Quarters => "Q%Q %Y",
            DateGranularity::Months => "%m/%Y",
            DateGranularity::Weeks | DateGranularity::Days => "%m/%d/%Y",
            DateGranularity::Hours => "%m/%d/%Y %H:00",
            DateGranularity::Minutes => "%m/%d/%Y %H:%M",
        }
    }
}

/// Interpret a raw value as a date: epoch milliseconds or an ISO-like string
pub fn parse_date(raw: &RawValue) -> Option<DateTime<Utc>> {
    match raw {
        RawValue::Number(ms) => Utc.timestamp_millis_opt(*ms as i64).single(),
        RawValue::Text(text) => {
            let text = text.trim();
            if let Ok(date) = DateTime::parse_from_rfc3339(text) {
                return Some(date.with_timezone(&Utc));
            }
            if let Ok(date) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
                return Some(date.and_utc());
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        }
    }
}

/// Epoch milliseconds of a raw date value
pub fn date_millis(raw: &RawValue) -> Option<f64> {
    parse_date(raw).map(|d| d.timestamp_millis() as f64)
}

//! Creation timestamps
//!
//! Sales carry their creation instant as a string so that lookups by date can
//! be exact string matches against the stored attribute. Every timestamp the
//! service writes or queries goes through [`format_timestamp`], which yields
//! UTC with millisecond precision and a `Z` suffix
//! (`2024-08-24T00:00:00.000Z`).

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Source of the current instant
///
/// Injected into the service so tests can pin the creation time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Render an instant in the canonical stored form
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a date supplied by a client
///
/// Accepts a full RFC 3339 timestamp in any offset, or a bare `YYYY-MM-DD`
/// date which is read as midnight UTC. Returns `None` for anything else.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Some(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

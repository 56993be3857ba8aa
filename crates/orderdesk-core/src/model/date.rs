//! Canonical date handling.
//!
//! Free-text search and the date-range filter must agree on what "the date of
//! a record" is, so both go through this module:
//!
//! - A record's date renders as `YYYY-MM-DD` in UTC ([`render_date`]).
//! - A date-only bound covers the whole UTC day: `from` starts at midnight,
//!   `to` ends one nanosecond before the next midnight ([`parse_bound`]).
//! - Full RFC 3339 bounds are taken as exact instants.
//!
//! A record whose rendered date equals a date-only bound therefore always
//! passes that bound, whichever side it is on.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `strftime` pattern of the canonical rendering.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Render an instant using the canonical date rule.
#[must_use]
pub fn render_date(ts: DateTime<Utc>) -> String {
    ts.format(CANONICAL_DATE_FORMAT).to_string()
}

/// A date as supplied by a form or request: a calendar day or a full instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

impl DateInput {
    /// Convert to the canonical record timestamp. Calendar days map to
    /// midnight UTC.
    #[must_use]
    pub fn to_timestamp(self) -> DateTime<Utc> {
        match self {
            Self::Day(day) => start_of_day(day),
            Self::Instant(ts) => ts,
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(day: NaiveDate) -> Self {
        Self::Day(day)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Instant(ts)
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day(day) => write!(f, "{}", day.format(CANONICAL_DATE_FORMAT)),
            Self::Instant(ts) => f.write_str(&ts.to_rfc3339()),
        }
    }
}

/// Error returned when text is neither a `YYYY-MM-DD` day nor an RFC 3339 instant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date '{got}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
pub struct DateParseError {
    pub got: String,
}

impl FromStr for DateInput {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(day) = NaiveDate::parse_from_str(trimmed, CANONICAL_DATE_FORMAT) {
            return Ok(Self::Day(day));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|ts| Self::Instant(ts.with_timezone(&Utc)))
            .map_err(|_| DateParseError { got: s.to_string() })
    }
}

/// Which end of a date range a bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    From,
    To,
}

/// Parse a range bound into an inclusive instant.
///
/// Blank input is "no bound" and yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`DateParseError`] when the text is not a recognizable date.
pub fn parse_bound(raw: &str, side: BoundSide) -> Result<Option<DateTime<Utc>>, DateParseError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let bound = match (raw.parse::<DateInput>()?, side) {
        (DateInput::Instant(ts), _) => ts,
        (DateInput::Day(day), BoundSide::From) => start_of_day(day),
        (DateInput::Day(day), BoundSide::To) => end_of_day(day),
    };
    Ok(Some(bound))
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    start_of_day(day)
        .checked_add_signed(TimeDelta::days(1))
        .map_or(DateTime::<Utc>::MAX_UTC, |next| next - TimeDelta::nanoseconds(1))
}

//! Expense record types
//!
//! `RawRecord` is what the store persists: loosely typed, fields may be
//! missing or malformed. `ExpenseRecord` is the validated form the engine
//! consumes, with the amount coerced and the timestamp resolved once.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::types::SpendtrackError;

/// Category label used when a record carries none
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Expense row as persisted by the record store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    pub id: String,
    /// Any JSON value; coerced to a number at ingestion
    #[serde(default)]
    pub amount: serde_json::Value,
    /// Explicit expense date, preferred over `created_at` when parseable
    #[serde(default)]
    pub date: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Validated expense record
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub id: String,
    pub amount: f64,
    /// Resolved timestamp: `date` if present and parseable, else `created_at`
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub category: String,
    pub text: Option<String>,
}

impl ExpenseRecord {
    /// UTC calendar day of the resolved timestamp
    pub fn day_key(&self) -> DayKey {
        DayKey::from_timestamp(&self.timestamp)
    }
}

impl From<RawRecord> for ExpenseRecord {
    fn from(raw: RawRecord) -> Self {
        let amount = coerce_amount(&raw.amount);

        let timestamp = match raw.date.as_deref() {
            None => raw.created_at,
            Some(s) => parse_record_date(s).unwrap_or_else(|| {
                tracing::warn!(
                    record_id = %raw.id,
                    date = s,
                    "unparseable record date, falling back to created_at"
                );
                raw.created_at
            }),
        };

        let category = raw
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        Self {
            id: raw.id,
            amount,
            timestamp,
            created_at: raw.created_at,
            category,
            text: raw.text,
        }
    }
}

/// Input for creating a record
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub amount: f64,
    pub category: Option<String>,
    pub date: Option<String>,
    pub text: Option<String>,
}

/// Coerce a loosely typed amount to a finite number.
///
/// Numbers pass through, numeric strings are parsed, anything else
/// (null, bool, garbage, NaN, infinities) counts as 0.
pub fn coerce_amount(value: &serde_json::Value) -> f64 {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Parse a record date string into a UTC timestamp.
///
/// Accepts RFC 3339 with any offset, `YYYY-MM-DD` (UTC midnight) and naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC).
pub fn parse_record_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}

/// UTC calendar day bucket.
///
/// Ordering follows the calendar date, which for the `YYYY-MM-DD` display
/// form coincides with string order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Day of a timestamp, taken from its UTC fields only
    pub fn from_timestamp(ts: &DateTime<Utc>) -> Self {
        Self(ts.date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DayKey {
    type Err = SpendtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| SpendtrackError::Parse(format!("invalid day key {:?}: {}", s, e)))
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

//! Domain primitives: TimeMs, RecordId.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: i64 = 86_400_000;

/// Time in milliseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeMs(pub i64);

impl TimeMs {
    /// Create a TimeMs from milliseconds.
    pub fn new(ms: i64) -> Self {
        TimeMs(ms)
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        TimeMs(Utc::now().timestamp_millis())
    }

    /// Get the underlying milliseconds value.
    pub fn as_ms(&self) -> i64 {
        self.0
    }

    /// Shift by whole days, saturating at the i64 range.
    pub fn plus_days(&self, days: i64) -> Self {
        TimeMs(self.0.saturating_add(days.saturating_mul(MS_PER_DAY)))
    }

    /// Local calendar date of this instant in the given offset.
    pub fn local_date(&self, offset: FixedOffset) -> NaiveDate {
        self.to_local(offset).date_naive()
    }

    pub fn to_local(&self, offset: FixedOffset) -> DateTime<FixedOffset> {
        let utc = DateTime::<Utc>::from_timestamp_millis(self.0).unwrap_or_default();
        utc.with_timezone(&offset)
    }

    /// Start of a local calendar day.
    pub fn start_of_day(date: NaiveDate, offset: FixedOffset) -> Self {
        let midnight = date.and_time(NaiveTime::MIN);
        match offset.from_local_datetime(&midnight).single() {
            Some(dt) => TimeMs(dt.timestamp_millis()),
            None => TimeMs(midnight.and_utc().timestamp_millis()),
        }
    }
}

/// Stable identifier of a stored record (UUID v4 text).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        RecordId(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: String) -> Self {
        RecordId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

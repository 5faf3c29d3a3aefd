//! Reporting windows.
//!
//! Which transactions reach the accumulator is decided by an explicit
//! [`DateRange`], resolved from a [`Period`] preset against a caller-supplied
//! `now`.

use chrono::{Datelike, Duration, FixedOffset, NaiveDate};
use serde::Serialize;
use std::str::FromStr;

use crate::domain::{Expense, TimeMs, Transaction};

/// Inclusive time range; a missing bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub from: Option<TimeMs>,
    pub to: Option<TimeMs>,
}

impl DateRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(from: Option<TimeMs>, to: Option<TimeMs>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, t: TimeMs) -> bool {
        self.from.map_or(true, |f| t >= f) && self.to.map_or(true, |to| t <= to)
    }

    pub fn includes(&self, tx: &Transaction) -> bool {
        self.contains(tx.effective_date())
    }

    pub fn includes_expense(&self, e: &Expense) -> bool {
        self.contains(e.spent_at)
    }

    /// Bounds as raw milliseconds, open ends widened to the i64 range.
    pub fn bounds_ms(&self) -> (i64, i64) {
        (
            self.from.map_or(i64::MIN, |t| t.as_ms()),
            self.to.map_or(i64::MAX, |t| t.as_ms()),
        )
    }
}

/// Dashboard period presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    All,
    Today,
    /// The last 7 local days, today included.
    Week,
    Month,
    Year,
}

impl Period {
    /// Resolve to a concrete range ending at `now`.
    pub fn resolve(&self, now: TimeMs, offset: FixedOffset) -> DateRange {
        let today = now.local_date(offset);
        let start = match self {
            Period::All => return DateRange::all(),
            Period::Today => today,
            Period::Week => today - Duration::days(6),
            Period::Month => first_of_month(today),
            Period::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
        };
        DateRange::new(Some(TimeMs::start_of_day(start, offset)), Some(now))
    }
}

fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Period::All),
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(format!("unknown period: {}", other)),
        }
    }
}

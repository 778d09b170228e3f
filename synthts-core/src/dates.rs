//! Daily date axis.
//!
//! Position `0..n` on the axis is the coordinate system every generator works
//! in. Dates themselves are only consulted for holiday membership.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Contiguous, daily, immutable sequence of calendar dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateAxis {
    dates: Vec<NaiveDate>,
}

impl DateAxis {
    /// `n_periods` consecutive days starting at `start` (inclusive).
    pub fn build(start: NaiveDate, n_periods: usize) -> Self {
        Self {
            dates: build_period(start, n_periods),
        }
    }

    /// Every day from `start` to `end`, both inclusive. Empty when `end < start`.
    pub fn build_range(start: NaiveDate, end: NaiveDate) -> Self {
        let dates = start.iter_days().take_while(|d| *d <= end).collect();
        Self { dates }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Offset of `date` on the axis, if it falls inside it.
    pub fn offset_of(&self, date: NaiveDate) -> Option<usize> {
        let start = self.start()?;
        let offset = usize::try_from((date - start).num_days()).ok()?;
        (offset < self.dates.len()).then_some(offset)
    }

    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn into_vec(self) -> Vec<NaiveDate> {
        self.dates
    }
}

impl AsRef<[NaiveDate]> for DateAxis {
    fn as_ref(&self) -> &[NaiveDate] {
        &self.dates
    }
}

/// `periods` consecutive days starting at `start`; expands a holiday anchor
/// into its observed span.
pub fn build_period(start: NaiveDate, periods: usize) -> Vec<NaiveDate> {
    start.iter_days().take(periods).collect()
}

/// A calendar date as a config document may spell it: a TOML date literal
/// or an ISO `YYYY-MM-DD` string.
#[derive(Deserialize)]
#[serde(untagged)]
enum DateRepr {
    Toml(toml::value::Datetime),
    Text(String),
}

/// Deserialize a `NaiveDate` from a TOML local date (`2025-04-18`) or a
/// quoted ISO string. Datetimes carrying a time or offset are rejected.
pub fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    match DateRepr::deserialize(deserializer)? {
        DateRepr::Toml(datetime) => toml_local_date(&datetime).map_err(D::Error::custom),
        DateRepr::Text(text) => text.parse::<NaiveDate>().map_err(D::Error::custom),
    }
}

fn toml_local_date(datetime: &toml::value::Datetime) -> std::result::Result<NaiveDate, String> {
    match (datetime.date, datetime.time, datetime.offset) {
        (Some(date), None, None) => {
            NaiveDate::from_ymd_opt(i32::from(date.year), u32::from(date.month), u32::from(date.day))
                .ok_or_else(|| format!("{datetime} is not a calendar date"))
        }
        _ => Err(format!("expected a local date, found {datetime}")),
    }
}

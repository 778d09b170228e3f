//! Holiday indicator: marks dates that fall inside any holiday span.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::build_period;

/// `span` consecutive days starting at `anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidaySpan {
    pub anchor: NaiveDate,
    pub span: usize,
}

impl HolidaySpan {
    pub fn new(anchor: NaiveDate, span: usize) -> Self {
        Self { anchor, span }
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        build_period(self.anchor, self.span)
    }
}

/// 1.0 where `dates[i]` lies in the union of all spans, 0.0 elsewhere.
pub fn holiday_index(dates: &[NaiveDate], spans: &[HolidaySpan]) -> Vec<f64> {
    let observed: HashSet<NaiveDate> = spans.iter().flat_map(HolidaySpan::days).collect();
    dates
        .iter()
        .map(|d| if observed.contains(d) { 1.0 } else { 0.0 })
        .collect()
}

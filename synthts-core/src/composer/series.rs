//! The generated artifact: one `(date, value)` pair per axis position.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Immutable generated series, ordered by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedSeries {
    points: Vec<SeriesPoint>,
}

impl GeneratedSeries {
    pub(crate) fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn get(&self, offset: usize) -> Option<&SeriesPoint> {
        self.points.get(offset)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeriesPoint> {
        self.points.iter()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Value on `date`, if the date is on the axis.
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        let start = self.points.first()?.date;
        let offset = usize::try_from((date - start).num_days()).ok()?;
        self.points.get(offset).map(|p| p.value)
    }
}

impl<'a> IntoIterator for &'a GeneratedSeries {
    type Item = &'a SeriesPoint;
    type IntoIter = std::slice::Iter<'a, SeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

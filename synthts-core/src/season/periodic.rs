//! Event-based indicators: jittered fixed grid and semi-Markov renewal.
//!
//! Both produce event offsets first and then mark them on the axis. Offsets
//! outside `0..n_periods` are dropped; an offset hit twice is still just 1.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::rng::{check_scale, RandomSource};

/// Parameters shared by the fixed+error and semi-markov styles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodicParams {
    pub period_length: usize,
    pub period_sd: f64,
    pub start_index: i64,
}

impl PeriodicParams {
    pub fn new(period_length: usize, period_sd: f64, start_index: i64) -> Result<Self> {
        let params = Self {
            period_length,
            period_sd,
            start_index,
        };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<()> {
        if self.period_length == 0 {
            return Err(GenerateError::invalid("period_length", "must be at least 1"));
        }
        check_scale("period_sd", self.period_sd)
    }
}

/// Event offsets of the jittered grid `start, start + p, start + 2p, ...`.
///
/// The grid has `n_periods / p + 1` points; each is shifted by an independent
/// N(0, period_sd) draw rounded to the nearest integer. Shifted offsets
/// outside the axis, or not representable as `i64`, are dropped. The result
/// is neither sorted nor deduplicated.
pub fn fixed_error_events(
    n_periods: usize,
    params: &PeriodicParams,
    rng: &mut RandomSource,
) -> Result<Vec<i64>> {
    params.validate()?;
    let period = params.period_length as i64;
    let count = n_periods / params.period_length + 1;
    let disturbance: Vec<i64> = rng
        .normal_vec(0.0, params.period_sd, count)?
        .into_iter()
        .map(|d| d.round() as i64)
        .collect();

    let events: Vec<i64> = disturbance
        .iter()
        .enumerate()
        .filter_map(|(k, &d)| {
            (k as i64)
                .checked_mul(period)?
                .checked_add(params.start_index)?
                .checked_add(d)
        })
        .filter(|&offset| in_axis(offset, n_periods))
        .collect();

    log::debug!("fixed+error disturbance: {disturbance:?}");
    log_events("fixed+error", &events, params.period_length);
    Ok(events)
}

/// Event offsets of a renewal process starting at `start_index`.
///
/// Each gap is a fresh N(period_length, period_sd) draw rounded to the nearest
/// integer and floored at 1, so events strictly increase. A negative start is
/// first folded onto the axis by whole periods (`start_index mod period_length`),
/// which keeps the walk within `n_periods` steps whatever the start. It halts
/// once the next event would reach or pass the end of the axis.
pub fn semi_markov_events(
    n_periods: usize,
    params: &PeriodicParams,
    rng: &mut RandomSource,
) -> Result<Vec<i64>> {
    params.validate()?;
    let end = i64::try_from(n_periods).unwrap_or(i64::MAX);
    let mut events = Vec::new();
    let period = i64::try_from(params.period_length).unwrap_or(i64::MAX);
    let mut current = if params.start_index < 0 {
        params.start_index.rem_euclid(period)
    } else {
        params.start_index
    };

    while current < end {
        events.push(current);
        let gap = rng
            .normal(params.period_length as f64, params.period_sd)?
            .round()
            .max(1.0) as i64;
        current = current.saturating_add(gap);
    }

    log_events("semi-markov", &events, params.period_length);
    Ok(events)
}

pub fn fixed_error_index(
    dates: &[NaiveDate],
    params: &PeriodicParams,
    rng: &mut RandomSource,
) -> Result<Vec<f64>> {
    let events = fixed_error_events(dates.len(), params, rng)?;
    Ok(mark_events(dates.len(), &events))
}

pub fn semi_markov_index(
    dates: &[NaiveDate],
    params: &PeriodicParams,
    rng: &mut RandomSource,
) -> Result<Vec<f64>> {
    let events = semi_markov_events(dates.len(), params, rng)?;
    Ok(mark_events(dates.len(), &events))
}

/// Count of events per phase `offset mod period_length`.
///
/// With a weekly period on a daily axis this is the weekday histogram.
pub fn event_phase_histogram(events: &[i64], period_length: usize) -> Vec<usize> {
    let mut counts = vec![0; period_length];
    if period_length == 0 {
        return counts;
    }
    for &offset in events {
        counts[offset.rem_euclid(period_length as i64) as usize] += 1;
    }
    counts
}

fn in_axis(offset: i64, n_periods: usize) -> bool {
    usize::try_from(offset).map_or(false, |o| o < n_periods)
}

fn mark_events(n_periods: usize, events: &[i64]) -> Vec<f64> {
    let mut index = vec![0.0; n_periods];
    for &offset in events {
        if let Ok(o) = usize::try_from(offset) {
            if let Some(slot) = index.get_mut(o) {
                *slot = 1.0;
            }
        }
    }
    index
}

fn log_events(style: &str, events: &[i64], period_length: usize) {
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("{style} events: {events:?}");
        log::debug!(
            "{style} phase histogram: {:?}",
            event_phase_histogram(events, period_length)
        );
    }
}

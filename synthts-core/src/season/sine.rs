//! Deterministic wave indices. No randomness, no seed dependency.

use std::f64::consts::PI;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Step size applied to the covariate wave before the cumulative sum.
pub const COVAR_STEP: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveParams {
    pub period_length: usize,
    pub start_index: i64,
}

impl WaveParams {
    pub fn new(period_length: usize, start_index: i64) -> Self {
        Self {
            period_length,
            start_index,
        }
    }

    fn phase(&self, i: usize) -> f64 {
        (i as f64 - self.start_index as f64) / self.period_length as f64
    }
}

/// `(sin(2π (i - start) / period) + 1) / 2`, in [0, 1].
pub fn sin_index(dates: &[NaiveDate], params: &WaveParams) -> Vec<f64> {
    (0..dates.len())
        .map(|i| ((2.0 * PI * params.phase(i)).sin() + 1.0) / 2.0)
        .collect()
}

/// Sine of the running sum of a slow covariate wave.
///
/// `covar[i] = (sin(π (i - start) / (6 period)) + 2) / 2` lies in [0.5, 1.5];
/// the output is `sin(Σ_{j<=i} COVAR_STEP * covar[j])`, an oscillation whose
/// frequency drifts with the covariate.
pub fn sin_covar_index(dates: &[NaiveDate], params: &WaveParams) -> Vec<f64> {
    let mut running = 0.0;
    (0..dates.len())
        .map(|i| {
            let covar = ((PI * params.phase(i) / 6.0).sin() + 2.0) / 2.0;
            running += covar * COVAR_STEP;
            running.sin()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx;
    use crate::dates::DateAxis;

    fn axis(n: usize) -> DateAxis {
        DateAxis::build(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), n)
    }

    #[test]
    fn sin_has_the_requested_period_and_phase() {
        let dates = axis(15);
        let index = sin_index(dates.as_slice(), &WaveParams::new(4, 1));
        // Phase zero at the start index, peak a quarter period later.
        assert_approx(index[1], 0.5, 1e-12);
        assert_approx(index[2], 1.0, 1e-12);
        assert_approx(index[3], 0.5, 1e-12);
        assert_approx(index[4], 0.0, 1e-12);
        for i in 0..11 {
            assert_approx(index[i], index[i + 4], 1e-12);
        }
    }

    #[test]
    fn sin_stays_in_unit_range() {
        let dates = axis(200);
        let index = sin_index(dates.as_slice(), &WaveParams::new(7, 4));
        assert!(index.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn sin_covar_matches_running_sum() {
        let dates = axis(5);
        let params = WaveParams::new(7, 4);
        let index = sin_covar_index(dates.as_slice(), &params);

        let mut sum = 0.0;
        for (i, v) in index.iter().enumerate() {
            let covar = ((PI * (i as f64 - 4.0) / 7.0 / 6.0).sin() + 2.0) / 2.0;
            sum += 0.4 * covar;
            assert_approx(*v, sum.sin(), 1e-12);
        }
    }

    #[test]
    fn sin_covar_differs_from_sin() {
        let dates = axis(50);
        let params = WaveParams::new(7, 4);
        assert_ne!(
            sin_index(dates.as_slice(), &params),
            sin_covar_index(dates.as_slice(), &params)
        );
        assert!(sin_covar_index(dates.as_slice(), &params)
            .iter()
            .all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn empty_axis() {
        let dates = axis(0);
        assert!(sin_index(dates.as_slice(), &WaveParams::new(7, 0)).is_empty());
        assert!(sin_covar_index(dates.as_slice(), &WaveParams::new(7, 0)).is_empty());
    }
}

//! ARMA walk with exogenous regressors.
//!
//! Direct left-to-right evaluation of
//!
//! ```text
//! ts[i] = Σ_{k < min(p, i)} ar[k] · ts[i-1-k]
//!       + u[i]
//!       − Σ_{k < min(q, i)} u[i-1-k]
//!       + Σ_regressors Σ_{k < len(coeff), k <= i} coeff[k] · exog[i-k]
//! ```
//!
//! with `u ~ N(0, scale)` drawn up front, one per position. Lags that would
//! reach before position 0 are skipped. The MA list contributes its order
//! only: each of the `q` most recent innovations is subtracted unweighted.
//! Cost is O(n · (p + q + Σ len(coeff))), fine for fixture-sized series.

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::rng::{check_scale, RandomSource};

/// External series entering the walk through a weighted lag sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExogenousRegressor {
    /// `coeff[k]` weights `ts[i - k]`.
    pub coeff: Vec<f64>,
    /// Must cover at least the generated length.
    pub ts: Vec<f64>,
}

impl ExogenousRegressor {
    pub fn new(coeff: Vec<f64>, ts: Vec<f64>) -> Self {
        Self { coeff, ts }
    }

    fn contribution(&self, i: usize) -> f64 {
        self.coeff
            .iter()
            .take(i + 1)
            .enumerate()
            .map(|(k, c)| c * self.ts[i - k])
            .sum()
    }
}

/// ARMA walk configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmaWalk {
    pub ar: Vec<f64>,
    pub ma: Vec<f64>,
    pub scale: f64,
    #[serde(default)]
    pub exogenous: Vec<ExogenousRegressor>,
}

impl ArmaWalk {
    pub fn new(ar: Vec<f64>, ma: Vec<f64>, scale: f64) -> Self {
        Self {
            ar,
            ma,
            scale,
            exogenous: Vec::new(),
        }
    }

    /// Pure random walk: `ts[i] = ts[i-1] + u[i]`.
    pub fn random_walk(scale: f64) -> Self {
        Self::new(vec![1.0], Vec::new(), scale)
    }

    pub fn with_exogenous(mut self, regressor: ExogenousRegressor) -> Self {
        self.exogenous.push(regressor);
        self
    }

    /// Check the configuration against a target length. Draws nothing.
    pub fn validate(&self, n_periods: usize) -> Result<()> {
        check_scale("randomwalk_scale", self.scale)?;
        for (j, reg) in self.exogenous.iter().enumerate() {
            if reg.ts.len() < n_periods {
                return Err(GenerateError::invalid(
                    format!("exogenous[{j}].ts"),
                    format!(
                        "has {} values but {n_periods} periods are generated",
                        reg.ts.len()
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Generate `n_periods` values, drawing innovations from `rng`.
    pub fn generate(&self, n_periods: usize, rng: &mut RandomSource) -> Result<Vec<f64>> {
        self.validate(n_periods)?;
        let u = rng.normal_vec(0.0, self.scale, n_periods)?;
        let mut ts = vec![0.0; n_periods];

        for i in 0..n_periods {
            let mut value = 0.0;
            for (k, a) in self.ar.iter().take(i).enumerate() {
                value += a * ts[i - 1 - k];
            }
            value += u[i];
            for k in 0..self.ma.len().min(i) {
                value -= u[i - 1 - k];
            }
            for reg in &self.exogenous {
                value += reg.contribution(i);
            }
            ts[i] = value;
        }

        Ok(ts)
    }
}

/// One-shot form: build the walk and draw from a stream seeded with `seed`.
pub fn generate_arma(
    ar: &[f64],
    ma: &[f64],
    scale: f64,
    n_periods: usize,
    exogenous: &[ExogenousRegressor],
    seed: Option<u64>,
) -> Result<Vec<f64>> {
    let walk = ArmaWalk {
        ar: ar.to_vec(),
        ma: ma.to_vec(),
        scale,
        exogenous: exogenous.to_vec(),
    };
    walk.generate(n_periods, &mut RandomSource::new(seed))
}

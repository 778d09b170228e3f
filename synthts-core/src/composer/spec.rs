//! Serializable parameter set for one generated series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::arma::{ArmaWalk, ExogenousRegressor};
use crate::error::{GenerateError, Result};
use crate::season::SeasonSpec;
use crate::trend::{InterpolationNode, LevelBreak};

use super::manifest::SeriesManifest;

/// Absolute value written at `offset` after everything else. Serialized as `[offset, value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(usize, f64)", into = "(usize, f64)")]
pub struct ManualOutlier {
    pub offset: usize,
    pub value: f64,
}

impl ManualOutlier {
    pub fn new(offset: usize, value: f64) -> Self {
        Self { offset, value }
    }
}

impl From<(usize, f64)> for ManualOutlier {
    fn from((offset, value): (usize, f64)) -> Self {
        Self { offset, value }
    }
}

impl From<ManualOutlier> for (usize, f64) {
    fn from(o: ManualOutlier) -> Self {
        (o.offset, o.value)
    }
}

/// Everything `compose` needs to build a series.
///
/// Fields missing from a config document take their `Default` value.
/// `ar`, `ma` and `exogenous` distinguish "not given" (`None`, use the
/// default) from "given empty" (`Some(vec![])`, disable the term).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesSpec {
    #[serde(deserialize_with = "crate::dates::deserialize_date")]
    pub start_date: NaiveDate,
    pub n_periods: usize,
    pub interpolation_nodes: Vec<InterpolationNode>,
    pub level_breaks: Vec<LevelBreak>,
    pub ar: Option<Vec<f64>>,
    pub ma: Option<Vec<f64>>,
    pub randomwalk_scale: f64,
    pub exogenous: Option<Vec<ExogenousRegressor>>,
    pub season: Option<SeasonSpec>,
    pub season_effect: f64,
    pub manual_outliers: Vec<ManualOutlier>,
    pub noise_scale: f64,
    pub seed: Option<u64>,
}

/// AR coefficients used when none are given: a pure random walk.
pub const DEFAULT_AR: [f64; 1] = [1.0];

impl Default for SeriesSpec {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap_or_default(),
            n_periods: 1096,
            interpolation_nodes: vec![
                InterpolationNode::new(0, 98.0),
                InterpolationNode::new(300, 92.0),
                InterpolationNode::new(700, 190.0),
                InterpolationNode::new(1096, 213.0),
            ],
            level_breaks: vec![LevelBreak::new(250, 100.0), LevelBreak::new(650, -50.0)],
            ar: None,
            ma: None,
            randomwalk_scale: 2.0,
            exogenous: None,
            season: None,
            season_effect: 0.15,
            manual_outliers: Vec::new(),
            noise_scale: 10.0,
            seed: None,
        }
    }
}

impl SeriesSpec {
    /// Defaults with the axis replaced.
    pub fn new(start_date: NaiveDate, n_periods: usize) -> Self {
        Self {
            start_date,
            n_periods,
            ..Self::default()
        }
    }

    pub fn from_toml_str(document: &str) -> Result<Self> {
        toml::from_str(document).map_err(|e| GenerateError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| GenerateError::Config(e.to_string()))
    }

    /// The ARMA walk this spec describes, with defaults filled in.
    pub fn arma_walk(&self) -> ArmaWalk {
        ArmaWalk {
            ar: self.ar.clone().unwrap_or_else(|| DEFAULT_AR.to_vec()),
            ma: self.ma.clone().unwrap_or_default(),
            scale: self.randomwalk_scale,
            exogenous: self.exogenous.clone().unwrap_or_default(),
        }
    }

    /// Deterministic BLAKE3 identity of this parameter set.
    pub fn fingerprint(&self) -> Result<String> {
        Ok(SeriesManifest::from_spec(self)?.fingerprint)
    }

    /// Checks that need no generator state: outlier offsets and scalar ranges.
    pub(crate) fn validate_scalars(&self) -> Result<()> {
        if !self.season_effect.is_finite() {
            return Err(GenerateError::invalid(
                "season_effect",
                format!("must be finite, got {}", self.season_effect),
            ));
        }
        for (i, outlier) in self.manual_outliers.iter().enumerate() {
            if outlier.offset >= self.n_periods {
                return Err(GenerateError::invalid(
                    format!("manual_outliers[{i}]"),
                    format!(
                        "offset {} is outside 0..{}",
                        outlier.offset, self.n_periods
                    ),
                ));
            }
        }
        for (i, b) in self.level_breaks.iter().enumerate() {
            if !b.delta.is_finite() {
                return Err(GenerateError::invalid(
                    format!("level_breaks[{i}]"),
                    format!("delta must be finite, got {}", b.delta),
                ));
            }
        }
        Ok(())
    }
}

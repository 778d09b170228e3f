//! synthts core: seeded synthetic time series for test fixtures.
//!
//! A series is the sum of independent components on a daily axis:
//! - Polynomial trend through up to four interpolation nodes, plus level breaks
//! - ARMA walk with optional exogenous regressors
//! - Multiplicative seasonality (holiday, fixed+error, semi-markov, sin, sin_covar)
//! - Gaussian observation noise
//! - Manual outliers written over the final values
//!
//! Every random draw goes through a `RandomSource` derived from one master
//! seed, so a seeded spec reproduces its series exactly.

pub mod arma;
pub mod batch;
pub mod composer;
pub mod dates;
pub mod error;
pub mod linalg;
pub mod rng;
pub mod season;
pub mod trend;

pub use arma::{generate_arma, ArmaWalk, ExogenousRegressor};
pub use batch::compose_batch;
pub use composer::{
    compose, compose_components, GeneratedSeries, ManualOutlier, SeriesComponents,
    SeriesManifest, SeriesPoint, SeriesSpec,
};
pub use dates::DateAxis;
pub use error::{GenerateError, Result};
pub use rng::{RandomSource, SeedLineage};
pub use season::{
    generate_season_index, season_index, HolidaySpan, SeasonConfig, SeasonSpec, SeasonStyle,
};
pub use trend::{fit_and_evaluate, level_break_effect, InterpolationNode, LevelBreak};

#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

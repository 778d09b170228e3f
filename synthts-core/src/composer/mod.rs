//! Series composer: assembles every component into one series.
//!
//! Stage order is fixed:
//! 1. date axis from `start_date`
//! 2. polynomial trend through the interpolation nodes
//! 3. cumulative level-break effect
//! 4. ARMA walk (`"arma"` stream)
//! 5. seasonality index (`"season"` stream), blended toward 1 by `season_effect`
//! 6. observation noise (`"noise"` stream)
//! 7. `(trend + breaks + walk + noise) * season`
//! 8. manual outliers overwrite their positions
//!
//! All validation runs before the first draw, so a failing spec consumes no
//! randomness and returns no partial series.

pub mod manifest;
pub mod series;
pub mod spec;

pub use manifest::SeriesManifest;
pub use series::{GeneratedSeries, SeriesPoint};
pub use spec::{ManualOutlier, SeriesSpec, DEFAULT_AR};

use crate::dates::DateAxis;
use crate::error::{GenerateError, Result};
use crate::rng::{check_scale, SeedLineage, ARMA_STREAM, NOISE_STREAM, SEASON_STREAM};
use crate::season::{generate_season_index, SeasonConfig};
use crate::trend::{fit_and_evaluate, level_break_effect};

/// Per-stage arrays of one composition, each `n_periods` long.
///
/// `season` is the blended multiplier, not the raw index.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesComponents {
    pub axis: DateAxis,
    pub trend: Vec<f64>,
    pub break_effect: Vec<f64>,
    pub random_walk: Vec<f64>,
    pub season: Vec<f64>,
    pub noise: Vec<f64>,
}

impl SeriesComponents {
    /// Combine the stages and apply `outliers` last.
    pub fn assemble(&self, outliers: &[ManualOutlier]) -> GeneratedSeries {
        let mut points: Vec<SeriesPoint> = self
            .axis
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, &date)| SeriesPoint {
                date,
                value: (self.trend[i] + self.break_effect[i] + self.random_walk[i] + self.noise[i])
                    * self.season[i],
            })
            .collect();

        for outlier in outliers {
            if let Some(point) = points.get_mut(outlier.offset) {
                point.value = outlier.value;
            }
        }

        GeneratedSeries::new(points)
    }
}

/// Blend a raw index toward the neutral multiplier:
/// `index * effect + (1 - index)`.
///
/// `effect = 1` leaves the index unchanged; `effect = 0` zeroes the series
/// wherever the index is 1.
pub fn blend_season(index: &[f64], effect: f64) -> Vec<f64> {
    index.iter().map(|s| s * effect + (1.0 - s)).collect()
}

/// Generate every stage of `spec` without assembling it.
pub fn compose_components(spec: &SeriesSpec) -> Result<SeriesComponents> {
    let n = spec.n_periods;

    spec.validate_scalars()?;
    check_scale("noise_scale", spec.noise_scale)?;
    let walk = spec.arma_walk();
    walk.validate(n)?;
    let season_config = spec
        .season
        .as_ref()
        .map(SeasonConfig::from_spec)
        .transpose()?;

    let axis = DateAxis::build(spec.start_date, n);
    if axis.len() != n {
        return Err(GenerateError::invalid(
            "n_periods",
            format!(
                "{n} days from {} run past the last representable date",
                spec.start_date
            ),
        ));
    }
    let trend = fit_and_evaluate(&spec.interpolation_nodes, n)?;
    let break_effect = level_break_effect(&spec.level_breaks, n);

    let lineage = SeedLineage::new(spec.seed);
    let random_walk = walk.generate(n, &mut lineage.source_for(ARMA_STREAM))?;

    let season = match &season_config {
        Some(config) => {
            let index = generate_season_index(
                axis.as_slice(),
                config,
                &mut lineage.source_for(SEASON_STREAM),
            )?;
            blend_season(&index, spec.season_effect)
        }
        None => vec![1.0; n],
    };

    let noise = lineage
        .source_for(NOISE_STREAM)
        .normal_vec(0.0, spec.noise_scale, n)?;

    log::debug!(
        "composed {n} periods from {} (season: {:?}, seed: {:?})",
        spec.start_date,
        season_config.as_ref().and_then(SeasonConfig::style),
        spec.seed
    );

    Ok(SeriesComponents {
        axis,
        trend,
        break_effect,
        random_walk,
        season,
        noise,
    })
}

/// Build the final series for `spec`.
pub fn compose(spec: &SeriesSpec) -> Result<GeneratedSeries> {
    let components = compose_components(spec)?;
    Ok(components.assemble(&spec.manual_outliers))
}

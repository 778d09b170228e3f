//! Parallel composition of independent specs.
//!
//! Each spec owns its seed lineage, so no generator state is shared between
//! workers and the output does not depend on thread count or scheduling.

use rayon::prelude::*;

use crate::composer::{compose, GeneratedSeries, SeriesSpec};
use crate::error::Result;

/// Compose every spec on rayon's pool. Results keep input order; one failing
/// spec does not affect the others.
pub fn compose_batch(specs: &[SeriesSpec]) -> Vec<Result<GeneratedSeries>> {
    specs.par_iter().map(compose).collect()
}

/// Sequential equivalent of [`compose_batch`].
pub fn compose_sequential(specs: &[SeriesSpec]) -> Vec<Result<GeneratedSeries>> {
    specs.iter().map(compose).collect()
}

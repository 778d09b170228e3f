//! Series manifest: deterministic identity and seed lineage of a spec.
//!
//! The fingerprint is a BLAKE3 hash of the spec's canonical JSON, usable as a
//! cache key for stored fixtures. The manifest also records the sub-seed each
//! component stream was derived from, so any draw can be traced back to the
//! master seed.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::rng::{SeedLineage, ARMA_STREAM, NOISE_STREAM, SEASON_STREAM};

use super::spec::SeriesSpec;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesManifest {
    pub start_date: NaiveDate,
    pub n_periods: usize,
    pub season_style: Option<String>,
    pub master_seed: Option<u64>,
    /// Component stream label → derived sub-seed. Empty when unseeded.
    pub sub_seeds: BTreeMap<String, u64>,
    pub fingerprint: String,
}

impl SeriesManifest {
    pub fn from_spec(spec: &SeriesSpec) -> Result<Self> {
        let lineage = SeedLineage::new(spec.seed);
        let sub_seeds = [ARMA_STREAM, SEASON_STREAM, NOISE_STREAM]
            .into_iter()
            .filter_map(|label| lineage.sub_seed(label).map(|s| (label.to_string(), s)))
            .collect();

        Ok(Self {
            start_date: spec.start_date,
            n_periods: spec.n_periods,
            season_style: spec.season.as_ref().map(|s| s.style.clone()),
            master_seed: spec.seed,
            sub_seeds,
            fingerprint: compute_hash(spec)?,
        })
    }

    /// Recompute the fingerprint against `spec`.
    pub fn verify(&self, spec: &SeriesSpec) -> bool {
        compute_hash(spec).map_or(false, |h| h == self.fingerprint)
    }
}

fn compute_hash(spec: &SeriesSpec) -> Result<String> {
    // Round-trip through serde_json::Value: its map is key-sorted, which keeps
    // the canonical text independent of field declaration order.
    let canonical =
        serde_json::to_value(spec).map_err(|e| GenerateError::Config(e.to_string()))?;
    let hash = blake3::hash(canonical.to_string().as_bytes());
    Ok(hash.to_hex().to_string())
}

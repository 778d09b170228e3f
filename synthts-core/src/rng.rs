//! Seed-scoped random streams.
//!
//! `RandomSource` owns the generator state; every draw a generator makes goes
//! through one. `SeedLineage` expands a master seed into per-component
//! sub-seeds via BLAKE3, so the ARMA innovations, the seasonality jitter and
//! the observation noise each get their own stream. Reconfiguring one
//! component never shifts the draws seen by another.
//!
//! A single `RandomSource` is sequential: reusing it across calls without
//! reseeding makes results order-dependent, and it must not be shared between
//! logical series without external synchronization.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::error::{GenerateError, Result};

/// Stream label for ARMA innovations.
pub const ARMA_STREAM: &str = "arma";
/// Stream label for seasonality jitter / renewal gaps.
pub const SEASON_STREAM: &str = "season";
/// Stream label for observation noise.
pub const NOISE_STREAM: &str = "noise";

/// A pseudo-random stream, deterministic when seeded.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Seeded stream when `seed` is given, entropy-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// One draw from N(mean, sd).
    pub fn normal(&mut self, mean: f64, sd: f64) -> Result<f64> {
        let dist = normal_dist(mean, sd)?;
        Ok(dist.sample(&mut self.rng))
    }

    /// `n` independent draws from N(mean, sd).
    pub fn normal_vec(&mut self, mean: f64, sd: f64, n: usize) -> Result<Vec<f64>> {
        let dist = normal_dist(mean, sd)?;
        Ok((0..n).map(|_| dist.sample(&mut self.rng)).collect())
    }
}

/// Reject scales that `Normal` cannot sample from.
///
/// Generators call this on their named parameters before touching the stream,
/// so the error identifies the offending argument.
pub fn check_scale(param: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(GenerateError::invalid(param, format!("must be finite, got {value}")));
    }
    if value < 0.0 {
        return Err(GenerateError::invalid(
            param,
            format!("must be non-negative, got {value}"),
        ));
    }
    Ok(())
}

fn normal_dist(mean: f64, sd: f64) -> Result<Normal<f64>> {
    check_scale("sd", sd)?;
    if !mean.is_finite() {
        return Err(GenerateError::invalid("mean", format!("must be finite, got {mean}")));
    }
    Normal::new(mean, sd).map_err(|e| GenerateError::invalid("sd", e.to_string()))
}

/// Deterministic seed hierarchy for one generated series.
///
/// Sub-seeds are derived by hashing `(master_seed, component)`, independent
/// of the order in which components ask for their stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedLineage {
    master_seed: Option<u64>,
}

impl SeedLineage {
    pub fn new(master_seed: Option<u64>) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> Option<u64> {
        self.master_seed
    }

    /// Sub-seed for a component, or `None` when the lineage is unseeded.
    pub fn sub_seed(&self, component: &str) -> Option<u64> {
        self.master_seed.map(|master| {
            let mut hasher = blake3::Hasher::new();
            hasher.update(&master.to_le_bytes());
            hasher.update(component.as_bytes());
            let hash = hasher.finalize();
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(&hash.as_bytes()[..8]);
            u64::from_le_bytes(bytes)
        })
    }

    /// A fresh stream for `component`.
    pub fn source_for(&self, component: &str) -> RandomSource {
        RandomSource::new(self.sub_seed(component))
    }
}

//! Polynomial trend through interpolation nodes, plus level breaks.
//!
//! The node count picks the degree: one node gives a constant, two a line,
//! three a quadratic, four a cubic. The polynomial is solved exactly from a
//! Vandermonde system and evaluated on the full integer grid `0..n_periods`,
//! wherever the nodes happen to sit.

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::linalg::solve_linear_system;

/// Highest supported node count (cubic).
pub const MAX_NODES: usize = 4;

/// An `(x, y)` pair the trend must pass through. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(i64, f64)", into = "(i64, f64)")]
pub struct InterpolationNode {
    pub x: i64,
    pub y: f64,
}

impl InterpolationNode {
    pub fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, f64)> for InterpolationNode {
    fn from((x, y): (i64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<InterpolationNode> for (i64, f64) {
    fn from(node: InterpolationNode) -> Self {
        (node.x, node.y)
    }
}

/// Permanent step of `delta` applied from `offset` onward. Serialized as `[offset, delta]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(usize, f64)", into = "(usize, f64)")]
pub struct LevelBreak {
    pub offset: usize,
    pub delta: f64,
}

impl LevelBreak {
    pub fn new(offset: usize, delta: f64) -> Self {
        Self { offset, delta }
    }
}

impl From<(usize, f64)> for LevelBreak {
    fn from((offset, delta): (usize, f64)) -> Self {
        Self { offset, delta }
    }
}

impl From<LevelBreak> for (usize, f64) {
    fn from(b: LevelBreak) -> Self {
        (b.offset, b.delta)
    }
}

/// Fit the exact polynomial through `nodes` and evaluate it at `0..n_periods`.
///
/// More than [`MAX_NODES`] nodes is accepted and yields a zero trend.
/// Duplicate x-values make the system singular and fail with `InvalidInput`.
pub fn fit_and_evaluate(nodes: &[InterpolationNode], n_periods: usize) -> Result<Vec<f64>> {
    match nodes.len() {
        0 => Ok(vec![0.0; n_periods]),
        1 => Ok(vec![nodes[0].y; n_periods]),
        count if count <= MAX_NODES => {
            let coeffs = fit_coefficients(nodes)?;
            Ok((0..n_periods).map(|i| evaluate(&coeffs, i as f64)).collect())
        }
        count => {
            log::warn!(
                "{count} interpolation nodes exceed the cubic limit of {MAX_NODES}; using a zero trend"
            );
            Ok(vec![0.0; n_periods])
        }
    }
}

/// Coefficients of the interpolating polynomial, highest power first.
pub fn fit_coefficients(nodes: &[InterpolationNode]) -> Result<Vec<f64>> {
    if nodes.is_empty() || nodes.len() > MAX_NODES {
        return Err(GenerateError::invalid(
            "interpolation_nodes",
            format!("expected 1 to {MAX_NODES} nodes, got {}", nodes.len()),
        ));
    }

    for (i, a) in nodes.iter().enumerate() {
        if !a.y.is_finite() {
            return Err(GenerateError::invalid(
                format!("interpolation_nodes[{i}]"),
                format!("y must be finite, got {}", a.y),
            ));
        }
        if let Some(j) = nodes[i + 1..].iter().position(|b| b.x == a.x) {
            return Err(GenerateError::invalid(
                "interpolation_nodes",
                format!(
                    "nodes {i} and {} share x = {}; the system is singular",
                    i + 1 + j,
                    a.x
                ),
            ));
        }
    }

    let degree = nodes.len() - 1;
    let matrix: Vec<Vec<f64>> = nodes
        .iter()
        .map(|node| {
            let x = node.x as f64;
            (0..=degree).rev().map(|p| x.powi(p as i32)).collect()
        })
        .collect();
    let rhs: Vec<f64> = nodes.iter().map(|node| node.y).collect();

    solve_linear_system(&matrix, &rhs).ok_or_else(|| {
        GenerateError::invalid("interpolation_nodes", "interpolation system is singular")
    })
}

/// Horner evaluation, coefficients highest power first.
fn evaluate(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, c| acc * x + c)
}

/// Cumulative step effect of `breaks` over `0..n_periods`.
///
/// Each break adds its delta to every position at or after its offset;
/// breaks past the end of the axis have no effect.
pub fn level_break_effect(breaks: &[LevelBreak], n_periods: usize) -> Vec<f64> {
    let mut effect = vec![0.0; n_periods];
    for b in breaks {
        for value in effect.iter_mut().skip(b.offset) {
            *value += b.delta;
        }
    }
    effect
}

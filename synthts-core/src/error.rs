//! Error taxonomy for the generators.
//!
//! Validation happens at the generator boundary, before any random draw, so a
//! failed call leaves no partial state behind. Degenerate inputs that are
//! accepted on purpose (more than four trend nodes, an unrecognized seasonality
//! style) are not errors and never show up here.

use thiserror::Error;

/// Errors raised while validating generator inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// A parameter failed a constraint: wrong arity, singular interpolation
    /// system, missing style parameter, out-of-range offset.
    #[error("invalid input for `{param}`: {reason}")]
    InvalidInput { param: String, reason: String },

    /// A value had the wrong shape, e.g. a holiday span that is not an integer.
    #[error("type mismatch for `{param}`: expected {expected}, found {found}")]
    TypeMismatch {
        param: String,
        expected: String,
        found: String,
    },

    /// The TOML document could not be parsed into a `SeriesSpec`.
    #[error("config error: {0}")]
    Config(String),
}

impl GenerateError {
    pub fn invalid(param: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            param: param.into(),
            reason: reason.into(),
        }
    }

    pub fn mismatch(
        param: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            param: param.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;

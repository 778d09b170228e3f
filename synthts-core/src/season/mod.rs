//! Seasonality indices.
//!
//! Five styles, each producing one value per axis position:
//! - `holiday`: 1 on dates covered by a holiday span, else 0
//! - `fixed+error`: fixed period grid, each event jittered by a rounded normal draw
//! - `semi-markov`: renewal process, each gap resampled around the period length
//! - `sin`: `(sin(2π(i - start)/period) + 1) / 2`
//! - `sin_covar`: sine of a cumulative sum driven by a slow covariate wave
//!
//! Style tags are matched tolerantly: any tag containing both `fixed` and
//! `error` selects fixed+error, both `semi` and `markov` selects semi-markov,
//! both `sin` and `covar` selects sin_covar. `holiday` and `sin` must match
//! exactly. An unrecognized tag yields an all-zero index rather than an error.

pub mod holiday;
pub mod periodic;
pub mod sine;

pub use holiday::{holiday_index, HolidaySpan};
pub use periodic::{
    event_phase_histogram, fixed_error_events, fixed_error_index, semi_markov_events,
    semi_markov_index, PeriodicParams,
};
pub use sine::{sin_covar_index, sin_index, WaveParams, COVAR_STEP};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Result};
use crate::rng::RandomSource;

/// Closed set of seasonality styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonStyle {
    FixedError,
    SemiMarkov,
    Holiday,
    Sin,
    SinCovar,
}

impl SeasonStyle {
    /// Resolve a style tag, or `None` if it matches no style.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.contains("fixed") && tag.contains("error") {
            Some(Self::FixedError)
        } else if tag.contains("semi") && tag.contains("markov") {
            Some(Self::SemiMarkov)
        } else if tag == "holiday" {
            Some(Self::Holiday)
        } else if tag.contains("sin") && tag.contains("covar") {
            Some(Self::SinCovar)
        } else if tag == "sin" {
            Some(Self::Sin)
        } else {
            None
        }
    }

    /// Canonical tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::FixedError => "fixed+error",
            Self::SemiMarkov => "semi-markov",
            Self::Holiday => "holiday",
            Self::Sin => "sin",
            Self::SinCovar => "sin_covar",
        }
    }

    /// True for styles whose index is an indicator in {0, 1}.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::FixedError | Self::SemiMarkov | Self::Holiday)
    }
}

/// One untyped scalar of a holiday entry, as read from a config document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HolidayField {
    Integer(i64),
    Real(f64),
    Date(#[serde(deserialize_with = "crate::dates::deserialize_date")] NaiveDate),
    Text(String),
    Flag(bool),
}

impl HolidayField {
    fn describe(&self) -> String {
        match self {
            Self::Integer(v) => format!("integer {v}"),
            Self::Real(v) => format!("real {v}"),
            Self::Date(d) => format!("date {d}"),
            Self::Text(s) => format!("string {s:?}"),
            Self::Flag(b) => format!("boolean {b}"),
        }
    }
}

/// Raw seasonality section: a style tag plus whatever parameters were given.
///
/// Converted into a validated [`SeasonConfig`] with [`SeasonConfig::from_spec`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonSpec {
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_dates: Option<Vec<Vec<HolidayField>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_sd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i64>,
}

impl SeasonSpec {
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            ..Self::default()
        }
    }

    pub fn with_holidays(mut self, spans: &[HolidaySpan]) -> Self {
        self.season_dates = Some(
            spans
                .iter()
                .map(|s| {
                    vec![
                        HolidayField::Date(s.anchor),
                        HolidayField::Integer(s.span as i64),
                    ]
                })
                .collect(),
        );
        self
    }

    pub fn with_period_length(mut self, period_length: i64) -> Self {
        self.period_length = Some(period_length);
        self
    }

    pub fn with_period_sd(mut self, period_sd: f64) -> Self {
        self.period_sd = Some(period_sd);
        self
    }

    pub fn with_start_index(mut self, start_index: i64) -> Self {
        self.start_index = Some(start_index);
        self
    }
}

/// A validated seasonality configuration; exactly one style per series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeasonConfig {
    Holiday { spans: Vec<HolidaySpan> },
    FixedError(PeriodicParams),
    SemiMarkov(PeriodicParams),
    Sin(WaveParams),
    SinCovar(WaveParams),
    /// Tag that matched no style; generates an all-zero index.
    Unrecognized { style: String },
}

impl SeasonConfig {
    /// Resolve the style tag and check that the style's parameters are present
    /// and well-formed.
    pub fn from_spec(spec: &SeasonSpec) -> Result<Self> {
        let Some(style) = SeasonStyle::from_tag(&spec.style) else {
            return Ok(Self::Unrecognized {
                style: spec.style.clone(),
            });
        };

        match style {
            SeasonStyle::Holiday => {
                let entries = spec.season_dates.as_ref().ok_or_else(|| {
                    GenerateError::invalid("season_dates", "required for the holiday style")
                })?;
                let spans = entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| parse_holiday_entry(i, entry))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Holiday { spans })
            }
            SeasonStyle::FixedError | SeasonStyle::SemiMarkov => {
                let params = PeriodicParams::new(
                    period_length(spec, style)?,
                    spec.period_sd.ok_or_else(|| missing("period_sd", style))?,
                    spec.start_index.ok_or_else(|| missing("start_index", style))?,
                )?;
                Ok(if style == SeasonStyle::FixedError {
                    Self::FixedError(params)
                } else {
                    Self::SemiMarkov(params)
                })
            }
            SeasonStyle::Sin | SeasonStyle::SinCovar => {
                let params = WaveParams::new(
                    period_length(spec, style)?,
                    spec.start_index.ok_or_else(|| missing("start_index", style))?,
                );
                Ok(if style == SeasonStyle::Sin {
                    Self::Sin(params)
                } else {
                    Self::SinCovar(params)
                })
            }
        }
    }

    pub fn style(&self) -> Option<SeasonStyle> {
        match self {
            Self::Holiday { .. } => Some(SeasonStyle::Holiday),
            Self::FixedError(_) => Some(SeasonStyle::FixedError),
            Self::SemiMarkov(_) => Some(SeasonStyle::SemiMarkov),
            Self::Sin(_) => Some(SeasonStyle::Sin),
            Self::SinCovar(_) => Some(SeasonStyle::SinCovar),
            Self::Unrecognized { .. } => None,
        }
    }
}

fn missing(param: &str, style: SeasonStyle) -> GenerateError {
    GenerateError::invalid(param, format!("required for the {} style", style.tag()))
}

fn period_length(spec: &SeasonSpec, style: SeasonStyle) -> Result<usize> {
    let value = spec
        .period_length
        .ok_or_else(|| missing("period_length", style))?;
    usize::try_from(value)
        .ok()
        .filter(|&p| p >= 1)
        .ok_or_else(|| {
            GenerateError::invalid("period_length", format!("must be at least 1, got {value}"))
        })
}

fn parse_holiday_entry(i: usize, entry: &[HolidayField]) -> Result<HolidaySpan> {
    let [anchor, span] = entry else {
        return Err(GenerateError::invalid(
            format!("season_dates[{i}]"),
            format!("expected [date, span], got {} elements", entry.len()),
        ));
    };

    let anchor = match anchor {
        HolidayField::Date(d) => *d,
        other => {
            return Err(GenerateError::mismatch(
                format!("season_dates[{i}][0]"),
                "date",
                other.describe(),
            ))
        }
    };
    let span = match span {
        HolidayField::Integer(n) => usize::try_from(*n).map_err(|_| {
            GenerateError::invalid(
                format!("season_dates[{i}][1]"),
                format!("span must be non-negative, got {n}"),
            )
        })?,
        other => {
            return Err(GenerateError::mismatch(
                format!("season_dates[{i}][1]"),
                "integer span",
                other.describe(),
            ))
        }
    };

    Ok(HolidaySpan::new(anchor, span))
}

/// Generate the index for a validated configuration.
///
/// Only the fixed+error and semi-markov styles draw from `rng`.
pub fn generate_season_index(
    dates: &[NaiveDate],
    config: &SeasonConfig,
    rng: &mut RandomSource,
) -> Result<Vec<f64>> {
    match config {
        SeasonConfig::Holiday { spans } => Ok(holiday_index(dates, spans)),
        SeasonConfig::FixedError(params) => fixed_error_index(dates, params, rng),
        SeasonConfig::SemiMarkov(params) => semi_markov_index(dates, params, rng),
        SeasonConfig::Sin(params) => Ok(sin_index(dates, params)),
        SeasonConfig::SinCovar(params) => Ok(sin_covar_index(dates, params)),
        SeasonConfig::Unrecognized { style } => {
            log::warn!("unrecognized seasonality style {style:?}; using a zero index");
            Ok(vec![0.0; dates.len()])
        }
    }
}

/// Validate `spec` and generate its index in one step.
pub fn season_index(
    dates: &[NaiveDate],
    spec: &SeasonSpec,
    rng: &mut RandomSource,
) -> Result<Vec<f64>> {
    let config = SeasonConfig::from_spec(spec)?;
    generate_season_index(dates, &config, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateAxis;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tolerant_tag_matching() {
        assert_eq!(SeasonStyle::from_tag("fixed+error"), Some(SeasonStyle::FixedError));
        assert_eq!(SeasonStyle::from_tag("error_fixed"), Some(SeasonStyle::FixedError));
        assert_eq!(SeasonStyle::from_tag("semi-markov"), Some(SeasonStyle::SemiMarkov));
        assert_eq!(SeasonStyle::from_tag("markov semi"), Some(SeasonStyle::SemiMarkov));
        assert_eq!(SeasonStyle::from_tag("sin_covar"), Some(SeasonStyle::SinCovar));
        assert_eq!(SeasonStyle::from_tag("covariate sine"), Some(SeasonStyle::SinCovar));
        assert_eq!(SeasonStyle::from_tag("sin"), Some(SeasonStyle::Sin));
        assert_eq!(SeasonStyle::from_tag("holiday"), Some(SeasonStyle::Holiday));
    }

    #[test]
    fn exact_tags_stay_exact() {
        assert_eq!(SeasonStyle::from_tag("holidays"), None);
        assert_eq!(SeasonStyle::from_tag("sine"), None);
        assert_eq!(SeasonStyle::from_tag("fixed"), None);
        assert_eq!(SeasonStyle::from_tag(""), None);
    }

    #[test]
    fn canonical_tags_round_trip() {
        for style in [
            SeasonStyle::FixedError,
            SeasonStyle::SemiMarkov,
            SeasonStyle::Holiday,
            SeasonStyle::Sin,
            SeasonStyle::SinCovar,
        ] {
            assert_eq!(SeasonStyle::from_tag(style.tag()), Some(style));
        }
    }

    #[test]
    fn unrecognized_style_gives_zeros() {
        let axis = DateAxis::build(ymd(2025, 1, 1), 12);
        let mut rng = RandomSource::seeded(1);
        let index = season_index(axis.as_slice(), &SeasonSpec::new("weekly"), &mut rng).unwrap();
        assert_eq!(index, vec![0.0; 12]);
    }

    #[test]
    fn holiday_requires_dates() {
        let err = SeasonConfig::from_spec(&SeasonSpec::new("holiday")).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidInput { ref param, .. } if param == "season_dates"));
    }

    #[test]
    fn sin_requires_period_length() {
        let spec = SeasonSpec::new("sin").with_start_index(0);
        let err = SeasonConfig::from_spec(&spec).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidInput { ref param, .. } if param == "period_length"));
    }

    #[test]
    fn periodic_requires_sd_and_start() {
        let spec = SeasonSpec::new("semi-markov").with_period_length(7).with_start_index(4);
        assert!(SeasonConfig::from_spec(&spec).is_err());
        let spec = SeasonSpec::new("fixed+error").with_period_length(7).with_period_sd(0.5);
        assert!(SeasonConfig::from_spec(&spec).is_err());
    }

    #[test]
    fn non_positive_period_is_invalid() {
        let spec = SeasonSpec::new("sin").with_period_length(0).with_start_index(0);
        assert!(SeasonConfig::from_spec(&spec).is_err());
    }

    #[test]
    fn holiday_entry_arity_is_checked() {
        let mut spec = SeasonSpec::new("holiday");
        spec.season_dates = Some(vec![vec![HolidayField::Date(ymd(2025, 4, 18))]]);
        let err = SeasonConfig::from_spec(&spec).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidInput { .. }));
    }

    #[test]
    fn holiday_entry_types_are_checked() {
        let mut spec = SeasonSpec::new("holiday");
        spec.season_dates = Some(vec![vec![
            HolidayField::Text("easter".into()),
            HolidayField::Integer(4),
        ]]);
        let err = SeasonConfig::from_spec(&spec).unwrap_err();
        assert!(matches!(err, GenerateError::TypeMismatch { .. }));

        spec.season_dates = Some(vec![vec![
            HolidayField::Date(ymd(2025, 4, 18)),
            HolidayField::Real(4.5),
        ]]);
        let err = SeasonConfig::from_spec(&spec).unwrap_err();
        assert!(matches!(err, GenerateError::TypeMismatch { ref found, .. } if found == "real 4.5"));
    }

    #[test]
    fn holiday_fields_parse_from_json() {
        let entry: Vec<HolidayField> = serde_json::from_str(r#"["2025-04-18", 4]"#).unwrap();
        assert_eq!(
            entry,
            vec![HolidayField::Date(ymd(2025, 4, 18)), HolidayField::Integer(4)]
        );
        let entry: Vec<HolidayField> = serde_json::from_str(r#"["Easter", 4.0]"#).unwrap();
        assert_eq!(
            entry,
            vec![HolidayField::Text("Easter".into()), HolidayField::Real(4.0)]
        );
    }

    #[test]
    fn builder_produces_a_valid_holiday_config() {
        let spec = SeasonSpec::new("holiday")
            .with_holidays(&[HolidaySpan::new(ymd(2025, 4, 18), 4)]);
        let config = SeasonConfig::from_spec(&spec).unwrap();
        assert_eq!(
            config,
            SeasonConfig::Holiday {
                spans: vec![HolidaySpan::new(ymd(2025, 4, 18), 4)]
            }
        );
        assert_eq!(config.style(), Some(SeasonStyle::Holiday));
    }
}

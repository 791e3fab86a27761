//! Configuration errors raised before any label is produced.

use thiserror::Error;

/// Everything that can be wrong with a formatting configuration.
///
/// Malformed *data* (missing or infinite values) never produces an error; those
/// are handled per element by the formatter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid {field} style `{value}` (expected one of: {expected})")]
    InvalidStyle {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("scale cut table is empty")]
    EmptyScaleCut,

    #[error("smallest scale cut threshold must be 0, found {smallest}")]
    ScaleCutMissingZero { smallest: f64 },

    #[error("scale cut threshold for label `{label}` is missing")]
    MissingThreshold { label: String },

    #[error("scale cut threshold for label `{label}` must be finite and non-negative, found {value}")]
    InvalidThreshold { label: String, value: f64 },

    #[error("scale cut threshold {value} appears more than once")]
    DuplicateThreshold { value: f64 },

    #[error("scale cut table must label every threshold")]
    UnlabeledScaleCut,

    #[error("scale cut threshold for label `{label}` is not a number")]
    NonNumericThreshold { label: String },

    #[error("unknown scale cut table `{0}` (expected short, long, short_space, long_space or si:<unit>)")]
    UnknownScaleCut(String),

    #[error("accuracy must be a positive finite number, found {0}")]
    InvalidAccuracy(f64),

    #[error("scale must be a positive finite number, found {0}")]
    InvalidScale(f64),

    #[error("invalid separator `{mark}`: {reason}")]
    InvalidSeparator { mark: String, reason: String },

    #[error("unknown locale `{0}`")]
    UnknownLocale(String),
}

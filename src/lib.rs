//! numlabel
//!
//! A small Rust library for turning numeric axis breaks and legend values into
//! human-readable labels. Pairs with the `numlabel` CLI.
//!
//! ### Features
//! - Minimal decimal precision inferred from the gaps between values
//! - Thousands grouping and decimal marks (custom or from a locale)
//! - Magnitude suffixes: short scale (`K`, `M`, `B`, `T`), long scale, SI prefixes,
//!   or any labelled threshold table
//! - Sign styles: hyphen, Unicode minus, accounting parentheses, explicit `+`
//! - Missing values stay missing; infinities render as `Inf`
//!
//! ### Example
//! ```
//! use numlabel::{NumberFormat, ScaleCut, precision};
//!
//! assert_eq!(precision(&[1.0, 1.1, 1.2]), 0.1);
//!
//! let fmt = NumberFormat::builder()
//!     .scale_cut(ScaleCut::short_scale(false))
//!     .build()?;
//! assert_eq!(fmt.format(&[0.0, 1e6]), [Some("0".into()), Some("1M".into())]);
//!
//! let labels = numlabel::comma(&[1234.0, f64::NAN]);
//! assert_eq!(labels, [Some("1,234".into()), None]);
//! # Ok::<(), numlabel::ConfigError>(())
//! ```
//!
//! Every function is pure: no shared state, no I/O (apart from
//! [`config::from_path`]), safe to call from any thread.

pub mod config;
pub mod error;
pub mod number;
pub mod precision;
pub mod render;
pub mod scale_cut;
pub mod style;

pub use error::ConfigError;
pub use number::{Accuracy, NumberFormat, NumberFormatBuilder, comma, number};
pub use precision::{display_digits, precision, round_any};
pub use scale_cut::{CutPlan, ScaleCut, cut_long_scale, cut_short_scale, cut_si, scale_cut};
pub use style::{NegativeStyle, PositiveStyle};

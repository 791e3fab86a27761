//! Sign styling for rendered labels.
//!
//! Both styles are closed enums. String forms (`"plus"`, `"parens"`, …) are
//! parsed once when a configuration is built, never per element.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unicode minus sign (U+2212), typographically matched to `+`.
pub const MINUS_SIGN: char = '\u{2212}';

/// Figure space (U+2007): same width as a digit.
pub const FIGURE_SPACE: char = '\u{2007}';

/// How strictly positive values are decorated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositiveStyle {
    /// No decoration (default).
    #[default]
    None,
    /// Prepend `+`.
    Plus,
    /// Prepend a figure space so positives line up with hyphenated negatives.
    Space,
}

/// How strictly negative values are decorated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegativeStyle {
    /// ASCII hyphen-minus `-` (default).
    #[default]
    Hyphen,
    /// Unicode minus sign `−`.
    Minus,
    /// Accounting style: wrap the whole label in parentheses.
    Parens,
}

impl PositiveStyle {
    const EXPECTED: &'static str = "none, plus, space";

    fn as_str(self) -> &'static str {
        match self {
            PositiveStyle::None => "none",
            PositiveStyle::Plus => "plus",
            PositiveStyle::Space => "space",
        }
    }
}

impl NegativeStyle {
    const EXPECTED: &'static str = "hyphen, minus, parens";

    fn as_str(self) -> &'static str {
        match self {
            NegativeStyle::Hyphen => "hyphen",
            NegativeStyle::Minus => "minus",
            NegativeStyle::Parens => "parens",
        }
    }
}

impl FromStr for PositiveStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(PositiveStyle::None),
            "plus" => Ok(PositiveStyle::Plus),
            "space" => Ok(PositiveStyle::Space),
            _ => Err(ConfigError::InvalidStyle {
                field: "positive",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl FromStr for NegativeStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hyphen" => Ok(NegativeStyle::Hyphen),
            "minus" => Ok(NegativeStyle::Minus),
            "parens" => Ok(NegativeStyle::Parens),
            _ => Err(ConfigError::InvalidStyle {
                field: "negative",
                value: s.to_string(),
                expected: Self::EXPECTED,
            }),
        }
    }
}

impl fmt::Display for PositiveStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NegativeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sign of a rounded value: NaN and both zeros count as unsigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub(crate) fn of(v: f64) -> Self {
        if v > 0.0 {
            Sign::Positive
        } else if v < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }
}

/// Decorate an already composed label according to its sign.
pub(crate) fn apply_sign(
    label: String,
    sign: Sign,
    positive: PositiveStyle,
    negative: NegativeStyle,
) -> String {
    match sign {
        Sign::Zero => label,
        Sign::Negative => match negative {
            NegativeStyle::Hyphen => format!("-{label}"),
            NegativeStyle::Minus => format!("{MINUS_SIGN}{label}"),
            NegativeStyle::Parens => format!("({label})"),
        },
        Sign::Positive => match positive {
            PositiveStyle::None => label,
            PositiveStyle::Plus => format!("+{label}"),
            PositiveStyle::Space => format!("{FIGURE_SPACE}{label}"),
        },
    }
}

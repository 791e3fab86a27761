//! Load a [`NumberFormat`] from a JSON document.
//!
//! Every field is optional; missing fields keep the builder defaults.
//!
//! ```
//! let fmt = numlabel::config::from_json_str(r#"{
//!     "accuracy": "auto",
//!     "prefix": "$",
//!     "style_negative": "parens",
//!     "scale_cut": "short"
//! }"#)?;
//! assert_eq!(fmt.format(&[-2e6, 3e6])[0].as_deref(), Some("($2M)"));
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::error::ConfigError;
use crate::number::{Accuracy, NumberFormat, NumberFormatBuilder};
use crate::scale_cut::ScaleCut;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// On-disk shape of a formatting configuration.
///
/// Styles and scale cuts stay loosely typed here so that validation errors
/// come out as [`ConfigError`] rather than serde messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    #[serde(deserialize_with = "de_accuracy")]
    pub accuracy: Option<f64>,
    pub scale: Option<f64>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub big_mark: Option<String>,
    pub decimal_mark: Option<String>,
    pub locale: Option<String>,
    pub style_positive: Option<String>,
    pub style_negative: Option<String>,
    pub scale_cut: Option<Value>,
    pub trim: Option<bool>,
}

/// Serde helper: accuracy as a number, a numeric string, or `"auto"` (→ `None`).
fn de_accuracy<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct AccuracyVisitor;

    impl<'de> Visitor<'de> for AccuracyVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a positive number or \"auto\"")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if s.trim().eq_ignore_ascii_case("auto") {
                return Ok(None);
            }
            s.trim().parse::<f64>().map(Some).map_err(E::custom)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(AccuracyVisitor)
}

/// Interpret a JSON `scale_cut` value.
///
/// Accepted shapes: a table name (`"short"`, `"si:g"`, …), an object
/// `{"label": threshold}`, or an array of `[label, threshold]` pairs.
pub fn scale_cut_from_json(value: &Value) -> Result<ScaleCut, ConfigError> {
    match value {
        Value::String(name) => name.parse(),
        Value::Object(map) => {
            let pairs = map
                .iter()
                .map(|(label, t)| threshold(label, t).map(|t| (label.clone(), t)))
                .collect::<Result<Vec<_>, _>>()?;
            ScaleCut::new(pairs)
        }
        Value::Array(items) => {
            let pairs = items
                .iter()
                .map(|item| match item {
                    Value::Array(pair) if pair.len() == 2 => {
                        let label = pair[0]
                            .as_str()
                            .ok_or(ConfigError::UnlabeledScaleCut)?;
                        Ok((label.to_string(), threshold(label, &pair[1])?))
                    }
                    _ => Err(ConfigError::UnlabeledScaleCut),
                })
                .collect::<Result<Vec<_>, _>>()?;
            ScaleCut::new(pairs)
        }
        Value::Number(_) => Err(ConfigError::UnlabeledScaleCut),
        _ => Err(ConfigError::NonNumericThreshold {
            label: String::new(),
        }),
    }
}

fn threshold(label: &str, value: &Value) -> Result<f64, ConfigError> {
    match value {
        Value::Null => Err(ConfigError::MissingThreshold {
            label: label.to_string(),
        }),
        Value::Number(n) => n.as_f64().ok_or_else(|| ConfigError::NonNumericThreshold {
            label: label.to_string(),
        }),
        _ => Err(ConfigError::NonNumericThreshold {
            label: label.to_string(),
        }),
    }
}

impl RawConfig {
    /// Apply the fields that are present on top of `builder`.
    pub fn apply(self, mut builder: NumberFormatBuilder) -> Result<NumberFormatBuilder, ConfigError> {
        if let Some(a) = self.accuracy {
            builder = builder.accuracy(Accuracy::Fixed(a));
        }
        if let Some(s) = self.scale {
            builder = builder.scale(s);
        }
        if let Some(p) = self.prefix {
            builder = builder.prefix(p);
        }
        if let Some(s) = self.suffix {
            builder = builder.suffix(s);
        }
        // locale first, explicit marks override it
        if let Some(tag) = self.locale.as_deref() {
            builder = builder.locale(tag);
        }
        if let Some(m) = self.big_mark {
            builder = builder.big_mark(m);
        }
        if let Some(m) = self.decimal_mark {
            builder = builder.decimal_mark(m);
        }
        if let Some(s) = self.style_positive.as_deref() {
            builder = builder.style_positive(s.parse()?);
        }
        if let Some(s) = self.style_negative.as_deref() {
            builder = builder.style_negative(s.parse()?);
        }
        if let Some(v) = self.scale_cut.as_ref() {
            builder = match v {
                Value::Null => builder.no_scale_cut(),
                v => builder.scale_cut(scale_cut_from_json(v)?),
            };
        }
        if let Some(t) = self.trim {
            builder = builder.trim(t);
        }
        Ok(builder)
    }
}

/// Parse a raw configuration without validating it.
pub fn raw_from_json_str(s: &str) -> Result<RawConfig> {
    serde_json::from_str(s).context("parsing number format configuration")
}

/// Parse and validate a configuration document.
pub fn from_json_str(s: &str) -> Result<NumberFormat> {
    let raw = raw_from_json_str(s)?;
    Ok(raw.apply(NumberFormat::builder())?.build()?)
}

/// Read, parse and validate a configuration file.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<NumberFormat> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading configuration {}", path.display()))?;
    from_json_str(&text).with_context(|| format!("invalid configuration {}", path.display()))
}

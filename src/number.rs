//! Number labels: rounding, rescaling, grouping and sign styling.
//!
//! [`NumberFormat`] is an immutable, validated configuration. Build it with
//! [`NumberFormat::builder`] (or load it with [`crate::config`]) and call
//! [`NumberFormat::format`] on a slice of values.
//!
//! ```
//! use numlabel::{NumberFormat, ScaleCut};
//!
//! let fmt = NumberFormat::builder()
//!     .scale_cut(ScaleCut::short_scale(false))
//!     .prefix("$")
//!     .build()?;
//! let labels = fmt.format(&[0.0, 1500.0, 2500.0, 3e6]);
//! assert_eq!(labels, [Some("$0".into()), Some("$1.5K".into()), Some("$2.5K".into()), Some("$3M".into())]);
//! # Ok::<(), numlabel::ConfigError>(())
//! ```

use crate::error::ConfigError;
use crate::precision::{display_digits, precision, round_any};
use crate::render::{Separators, map_locale};
use crate::scale_cut::{ScaleCut, scale_cut};
use crate::style::{NegativeStyle, PositiveStyle, Sign, apply_sign};
use log::debug;
use std::borrow::Cow;
use std::collections::HashMap;

/// Token used for infinite values.
pub const INFINITY_LABEL: &str = "Inf";

/// Rounding accuracy: a fixed step, or inferred from the data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Accuracy {
    #[default]
    Auto,
    Fixed(f64),
}

impl Accuracy {
    pub fn fixed(self) -> Option<f64> {
        match self {
            Accuracy::Auto => None,
            Accuracy::Fixed(a) => Some(a),
        }
    }
}

impl From<f64> for Accuracy {
    fn from(a: f64) -> Self {
        Accuracy::Fixed(a)
    }
}

impl From<Option<f64>> for Accuracy {
    fn from(a: Option<f64>) -> Self {
        a.map_or(Accuracy::Auto, Accuracy::Fixed)
    }
}

/// Validated formatting configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat {
    accuracy: Accuracy,
    scale: f64,
    prefix: String,
    suffix: String,
    separators: Separators,
    style_positive: PositiveStyle,
    style_negative: NegativeStyle,
    scale_cut: Option<ScaleCut>,
    trim: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::Auto,
            scale: 1.0,
            prefix: String::new(),
            suffix: String::new(),
            separators: Separators::default(),
            style_positive: PositiveStyle::None,
            style_negative: NegativeStyle::Hyphen,
            scale_cut: None,
            trim: true,
        }
    }
}

/// Builder for [`NumberFormat`]; all checks happen in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct NumberFormatBuilder {
    accuracy: Accuracy,
    scale: f64,
    prefix: String,
    suffix: String,
    big_mark: String,
    decimal_mark: String,
    style_positive: Result<PositiveStyle, ConfigError>,
    style_negative: Result<NegativeStyle, ConfigError>,
    scale_cut: Option<ScaleCut>,
    trim: bool,
    locale_error: Option<ConfigError>,
}

impl Default for NumberFormatBuilder {
    fn default() -> Self {
        Self {
            accuracy: Accuracy::Auto,
            scale: 1.0,
            prefix: String::new(),
            suffix: String::new(),
            big_mark: " ".into(),
            decimal_mark: ".".into(),
            style_positive: Ok(PositiveStyle::None),
            style_negative: Ok(NegativeStyle::Hyphen),
            scale_cut: None,
            trim: true,
            locale_error: None,
        }
    }
}

impl NumberFormatBuilder {
    pub fn accuracy(mut self, accuracy: impl Into<Accuracy>) -> Self {
        self.accuracy = accuracy.into();
        self
    }

    /// Multiplier applied before formatting (e.g. `1e-3` to show thousands).
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn big_mark(mut self, mark: impl Into<String>) -> Self {
        self.big_mark = mark.into();
        self
    }

    pub fn decimal_mark(mut self, mark: impl Into<String>) -> Self {
        self.decimal_mark = mark.into();
        self
    }

    /// Take both marks from a locale tag such as `de` or `fr`.
    pub fn locale(mut self, tag: &str) -> Self {
        match map_locale(tag) {
            Ok(locale) => {
                self.big_mark = locale.separator().to_string();
                self.decimal_mark = locale.decimal().to_string();
            }
            Err(e) => self.locale_error = Some(e),
        }
        self
    }

    pub fn style_positive(mut self, style: PositiveStyle) -> Self {
        self.style_positive = Ok(style);
        self
    }

    pub fn style_negative(mut self, style: NegativeStyle) -> Self {
        self.style_negative = Ok(style);
        self
    }

    /// String form of [`style_positive`](Self::style_positive); an unknown
    /// value surfaces as an error from [`build`](Self::build).
    pub fn style_positive_str(mut self, style: &str) -> Self {
        self.style_positive = style.parse();
        self
    }

    /// String form of [`style_negative`](Self::style_negative).
    pub fn style_negative_str(mut self, style: &str) -> Self {
        self.style_negative = style.parse();
        self
    }

    pub fn scale_cut(mut self, cut: ScaleCut) -> Self {
        self.scale_cut = Some(cut);
        self
    }

    pub fn no_scale_cut(mut self) -> Self {
        self.scale_cut = None;
        self
    }

    /// `false` pads numbers sharing a digit count to a common width.
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// ### Errors
    /// Any [`ConfigError`] collected while setting fields, plus
    /// [`ConfigError::InvalidAccuracy`], [`ConfigError::InvalidScale`] and
    /// [`ConfigError::InvalidSeparator`].
    pub fn build(self) -> Result<NumberFormat, ConfigError> {
        if let Some(e) = self.locale_error {
            return Err(e);
        }
        let style_positive = self.style_positive?;
        let style_negative = self.style_negative?;
        if let Accuracy::Fixed(a) = self.accuracy
            && !(a.is_finite() && a > 0.0)
        {
            return Err(ConfigError::InvalidAccuracy(a));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        let separators = Separators::new(&self.big_mark, &self.decimal_mark)?;
        Ok(NumberFormat {
            accuracy: self.accuracy,
            scale: self.scale,
            prefix: self.prefix,
            suffix: self.suffix,
            separators,
            style_positive,
            style_negative,
            scale_cut: self.scale_cut,
            trim: self.trim,
        })
    }
}

/// Per-element scale, suffix and accuracy resolved for one call.
struct LabelPlan<'a> {
    scale: Vec<f64>,
    suffix: Vec<Cow<'a, str>>,
    accuracy: Vec<f64>,
}

impl NumberFormat {
    pub fn builder() -> NumberFormatBuilder {
        NumberFormatBuilder::default()
    }

    /// Preset with `,` as the thousands mark.
    pub fn comma() -> NumberFormatBuilder {
        NumberFormatBuilder::default().big_mark(",")
    }

    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn big_mark(&self) -> &str {
        self.separators.big_mark()
    }

    pub fn decimal_mark(&self) -> &str {
        self.separators.decimal_mark()
    }

    pub fn style_positive(&self) -> PositiveStyle {
        self.style_positive
    }

    pub fn style_negative(&self) -> NegativeStyle {
        self.style_negative
    }

    pub fn scale_cut(&self) -> Option<&ScaleCut> {
        self.scale_cut.as_ref()
    }

    pub fn trim(&self) -> bool {
        self.trim
    }

    /// Turn a builder back on from this configuration.
    pub fn to_builder(&self) -> NumberFormatBuilder {
        NumberFormatBuilder {
            accuracy: self.accuracy,
            scale: self.scale,
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            big_mark: self.big_mark().to_string(),
            decimal_mark: self.decimal_mark().to_string(),
            style_positive: Ok(self.style_positive),
            style_negative: Ok(self.style_negative),
            scale_cut: self.scale_cut.clone(),
            trim: self.trim,
            locale_error: None,
        }
    }

    fn plan<'a>(&'a self, x: &[f64]) -> LabelPlan<'a> {
        let n = x.len();
        match &self.scale_cut {
            Some(cut) => {
                let plan = scale_cut(x, cut, self.scale, self.accuracy.fixed(), &self.suffix);
                LabelPlan {
                    scale: plan.scale,
                    suffix: plan.suffix.into_iter().map(Cow::Owned).collect(),
                    accuracy: plan.accuracy,
                }
            }
            None => {
                let accuracy = self.accuracy.fixed().unwrap_or_else(|| {
                    let scaled: Vec<f64> = x.iter().map(|v| v * self.scale).collect();
                    precision(&scaled)
                });
                debug!("resolved accuracy {accuracy} for {n} value(s)");
                LabelPlan {
                    scale: vec![self.scale; n],
                    suffix: vec![Cow::Borrowed(self.suffix.as_str()); n],
                    accuracy: vec![accuracy; n],
                }
            }
        }
    }

    /// Format `x` into labels, one per value.
    ///
    /// - `NaN` (missing) → `None`
    /// - `±inf` → `"Inf"` with sign styling, no prefix/suffix
    /// - empty input → empty output
    ///
    /// ```
    /// use numlabel::{NegativeStyle, NumberFormat, PositiveStyle};
    ///
    /// let fmt = NumberFormat::builder()
    ///     .style_positive(PositiveStyle::Plus)
    ///     .style_negative(NegativeStyle::Minus)
    ///     .build()?;
    /// assert_eq!(
    ///     fmt.format(&[-1000.0, 1000.0]),
    ///     [Some("\u{2212}1 000".to_string()), Some("+1 000".to_string())]
    /// );
    /// # Ok::<(), numlabel::ConfigError>(())
    /// ```
    pub fn format(&self, x: &[f64]) -> Vec<Option<String>> {
        if x.is_empty() {
            return Vec::new();
        }
        let plan = self.plan(x);

        // Pass 1: round and render the magnitudes.
        let mut rendered: Vec<Option<(Sign, usize, String)>> = Vec::with_capacity(x.len());
        for (i, &v) in x.iter().enumerate() {
            if v.is_nan() {
                rendered.push(None);
                continue;
            }
            let scale = plan.scale[i];
            let accuracy = plan.accuracy[i];
            let rounded = round_any(v, accuracy / scale);
            let sign = Sign::of(rounded);
            let digits = display_digits(accuracy);
            let body = if rounded.is_finite() {
                self.separators.render(rounded.abs() * scale, digits)
            } else {
                INFINITY_LABEL.to_string()
            };
            rendered.push(Some((sign, digits, body)));
        }

        if !self.trim {
            pad_to_common_width(&mut rendered, x);
        }

        // Pass 2: compose and decorate.
        rendered
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.map(|(sign, _, body)| {
                    let label = if x[i].is_infinite() {
                        body
                    } else {
                        format!("{}{}{}", self.prefix, body, plan.suffix[i])
                    };
                    apply_sign(label, sign, self.style_positive, self.style_negative)
                })
            })
            .collect()
    }

    /// Like [`format`](Self::format) but keeps a name next to every value.
    pub fn format_named<S: AsRef<str>>(&self, x: &[(S, f64)]) -> Vec<(String, Option<String>)> {
        let values: Vec<f64> = x.iter().map(|(_, v)| *v).collect();
        x.iter()
            .map(|(name, _)| name.as_ref().to_string())
            .zip(self.format(&values))
            .collect()
    }
}

/// Left-pad finite renderings that share a digit count to the widest among them.
fn pad_to_common_width(rendered: &mut [Option<(Sign, usize, String)>], x: &[f64]) {
    let mut widths: HashMap<usize, usize> = HashMap::new();
    for (slot, v) in rendered.iter().zip(x) {
        if let Some((_, digits, body)) = slot
            && v.is_finite()
        {
            let w = widths.entry(*digits).or_default();
            *w = (*w).max(body.chars().count());
        }
    }
    for (slot, v) in rendered.iter_mut().zip(x) {
        if let Some((_, digits, body)) = slot
            && v.is_finite()
        {
            let width = widths.get(&*digits).copied().unwrap_or(0);
            let pad = width.saturating_sub(body.chars().count());
            if pad > 0 {
                body.insert_str(0, &" ".repeat(pad));
            }
        }
    }
}

/// Format `x` with `config`.
pub fn number(x: &[f64], config: &NumberFormat) -> Vec<Option<String>> {
    config.format(x)
}

/// Format `x` with default settings and `,` as the thousands mark.
pub fn comma(x: &[f64]) -> Vec<Option<String>> {
    let config = NumberFormat {
        separators: Separators::new(",", ".").unwrap_or_default(),
        ..NumberFormat::default()
    };
    config.format(x)
}

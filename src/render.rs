//! Decimal rendering with configurable thousands and decimal separators.

use crate::error::ConfigError;
use num_format::{CustomFormat, Grouping, Locale, ToFormattedString};

/// Thousands ("big") and decimal marks used to render a magnitude.
#[derive(Debug, Clone, PartialEq)]
pub struct Separators {
    big_mark: String,
    decimal_mark: String,
    grouping: CustomFormat,
}

impl Default for Separators {
    fn default() -> Self {
        // A single space is always a valid separator.
        Self::new(" ", ".").unwrap_or_else(|_| unreachable!("space is a valid separator"))
    }
}

impl Separators {
    /// ### Errors
    /// [`ConfigError::InvalidSeparator`] if num-format rejects `big_mark`
    /// (longer than 8 bytes).
    pub fn new(big_mark: &str, decimal_mark: &str) -> Result<Self, ConfigError> {
        let grouping = if big_mark.is_empty() {
            Grouping::Posix
        } else {
            Grouping::Standard
        };
        let grouping = CustomFormat::builder()
            .grouping(grouping)
            .separator(big_mark)
            .build()
            .map_err(|e| ConfigError::InvalidSeparator {
                mark: big_mark.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            big_mark: big_mark.to_string(),
            decimal_mark: decimal_mark.to_string(),
            grouping,
        })
    }

    /// Separators of a num-format locale, e.g. `de` → `1.234,5`.
    pub fn from_locale(locale: &Locale) -> Result<Self, ConfigError> {
        Self::new(locale.separator(), locale.decimal())
    }

    pub fn big_mark(&self) -> &str {
        &self.big_mark
    }

    pub fn decimal_mark(&self) -> &str {
        &self.decimal_mark
    }

    /// Render a non-negative finite `value` with exactly `digits` fraction digits.
    pub fn render(&self, value: f64, digits: usize) -> String {
        let text = format!("{:.*}", digits, value.abs());
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (text.as_str(), None),
        };
        let mut out = self.group(int_part);
        if let Some(frac) = frac_part {
            out.push_str(&self.decimal_mark);
            out.push_str(frac);
        }
        out
    }

    fn group(&self, int_digits: &str) -> String {
        match int_digits.parse::<u128>() {
            Ok(n) => n.to_formatted_string(&self.grouping),
            // beyond u128 (~3.4e38): group the digit string directly
            Err(_) => group_digits(int_digits, &self.big_mark),
        }
    }
}

fn group_digits(digits: &str, mark: &str) -> String {
    if mark.is_empty() {
        return digits.to_string();
    }
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * mark.len());
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push_str(mark);
        }
        out.push(*b as char);
    }
    out
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Short tags (`en`, `us`, `de`, `german`, `fr`, `es`, `it`, `pt`, `nl`) and
/// their `xx_XX` forms are accepted case-insensitively; anything else is looked
/// up by name in num-format's locale table.
pub fn map_locale(tag: &str) -> Result<Locale, ConfigError> {
    let locale = match tag.trim().to_lowercase().as_str() {
        "en" | "us" | "en_us" | "english" => Locale::en,
        "de" | "de_de" | "german" => Locale::de,
        "fr" | "fr_fr" => Locale::fr,
        "es" | "es_es" => Locale::es,
        "it" | "it_it" => Locale::it,
        "pt" | "pt_pt" | "pt_br" => Locale::pt,
        "nl" | "nl_nl" => Locale::nl,
        _ => Locale::from_name(tag.trim())
            .map_err(|_| ConfigError::UnknownLocale(tag.to_string()))?,
    };
    Ok(locale)
}

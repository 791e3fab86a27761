//! Magnitude buckets ("scale cuts") for compact labels such as `1.5K` or `20 µg`.
//!
//! A [`ScaleCut`] is an ordered table of `(label, threshold)` pairs starting at 0.
//! Bucket `i` covers `[t_i, t_{i+1})`, the last one is open ended. Values in
//! bucket `i` are divided by `t_i` and get label `i` appended; the zero bucket
//! leaves values unscaled.

use crate::error::ConfigError;
use crate::precision::precision;
use log::{debug, trace};
use std::collections::BTreeMap;
use std::str::FromStr;

/// One row of a [`ScaleCut`] table.
#[derive(Debug, Clone, PartialEq)]
pub struct Cut {
    pub label: String,
    pub threshold: f64,
}

/// Validated bucket table: thresholds finite, strictly increasing, first one 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleCut {
    cuts: Vec<Cut>,
}

/// SI prefixes in steps of 10^3 (irregular c/d/da/h are left out).
const SI_PREFIXES: [(&str, f64); 16] = [
    ("y", 1e-24),
    ("z", 1e-21),
    ("a", 1e-18),
    ("f", 1e-15),
    ("p", 1e-12),
    ("n", 1e-9),
    ("\u{00b5}", 1e-6), // micro sign, not Greek mu
    ("m", 1e-3),
    ("k", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
    ("P", 1e15),
    ("E", 1e18),
    ("Z", 1e21),
    ("Y", 1e24),
];

impl ScaleCut {
    /// Build a table from `(label, threshold)` pairs in any order.
    ///
    /// ### Errors
    /// - [`ConfigError::EmptyScaleCut`] for no pairs
    /// - [`ConfigError::MissingThreshold`] for a NaN threshold
    /// - [`ConfigError::InvalidThreshold`] for an infinite threshold
    /// - [`ConfigError::ScaleCutMissingZero`] if the smallest threshold is not 0
    /// - [`ConfigError::DuplicateThreshold`] if two labels share a threshold
    ///
    /// ```
    /// use numlabel::ScaleCut;
    ///
    /// let cut = ScaleCut::new([("k", 1e3), ("", 0.0)])?;
    /// assert_eq!(cut.labels().collect::<Vec<_>>(), ["", "k"]);
    /// # Ok::<(), numlabel::ConfigError>(())
    /// ```
    pub fn new<I, L>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<String>,
    {
        let mut cuts: Vec<Cut> = pairs
            .into_iter()
            .map(|(label, threshold)| Cut {
                label: label.into(),
                threshold,
            })
            .collect();
        if cuts.is_empty() {
            return Err(ConfigError::EmptyScaleCut);
        }
        for c in &cuts {
            if c.threshold.is_nan() {
                return Err(ConfigError::MissingThreshold {
                    label: c.label.clone(),
                });
            }
            if c.threshold.is_infinite() {
                return Err(ConfigError::InvalidThreshold {
                    label: c.label.clone(),
                    value: c.threshold,
                });
            }
        }
        cuts.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));

        let smallest = cuts[0].threshold;
        if smallest != 0.0 {
            return Err(ConfigError::ScaleCutMissingZero { smallest });
        }
        if let Some(w) = cuts.windows(2).find(|w| w[0].threshold == w[1].threshold) {
            return Err(ConfigError::DuplicateThreshold {
                value: w[0].threshold,
            });
        }
        Ok(Self { cuts })
    }

    /// Short scale: K, M, B (10^9), T (10^12).
    pub fn short_scale(space: bool) -> Self {
        Self::builtin(&[("", 0.0), ("K", 1e3), ("M", 1e6), ("B", 1e9), ("T", 1e12)], space)
    }

    /// Long scale: K, M, B (10^12), T (10^18).
    pub fn long_scale(space: bool) -> Self {
        Self::builtin(&[("", 0.0), ("K", 1e3), ("M", 1e6), ("B", 1e12), ("T", 1e18)], space)
    }

    /// SI prefixes from yocto to yotta, each label being `" " + prefix + unit`.
    ///
    /// Values in `[1, 1000)` and below 10^-24 keep the bare `" " + unit` label.
    /// Labels already carry their leading space, so there is no `space` flag.
    pub fn si(unit: &str) -> Self {
        let mut cuts = Vec::with_capacity(SI_PREFIXES.len() + 2);
        cuts.push(Cut {
            label: format!(" {unit}"),
            threshold: 0.0,
        });
        for &(prefix, threshold) in &SI_PREFIXES {
            if threshold == 1e3 {
                cuts.push(Cut {
                    label: format!(" {unit}"),
                    threshold: 1.0,
                });
            }
            cuts.push(Cut {
                label: format!(" {prefix}{unit}"),
                threshold,
            });
        }
        Self { cuts }
    }

    fn builtin(table: &[(&str, f64)], space: bool) -> Self {
        let cuts = table
            .iter()
            .map(|&(label, threshold)| Cut {
                label: if space {
                    format!(" {label}")
                } else {
                    label.to_string()
                },
                threshold,
            })
            .collect();
        Self { cuts }
    }

    /// Rows in ascending threshold order.
    pub fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cuts.iter().map(|c| c.label.as_str())
    }

    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.cuts.iter().map(|c| c.threshold)
    }

    /// Index of the bucket containing `magnitude` (already `abs`'d).
    ///
    /// Values no bucket matches (NaN, infinity) land in the zero bucket.
    pub fn bucket_of(&self, magnitude: f64) -> usize {
        if !magnitude.is_finite() || magnitude < 0.0 {
            return 0;
        }
        self.cuts
            .partition_point(|c| c.threshold <= magnitude)
            .saturating_sub(1)
    }
}

/// Named tables: `short`, `long`, `short_space`, `long_space`, `si:<unit>`.
impl FromStr for ScaleCut {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(unit) = name.strip_prefix("si:") {
            return Ok(ScaleCut::si(unit));
        }
        match name.to_ascii_lowercase().as_str() {
            "short" => Ok(ScaleCut::short_scale(false)),
            "short_space" => Ok(ScaleCut::short_scale(true)),
            "long" => Ok(ScaleCut::long_scale(false)),
            "long_space" => Ok(ScaleCut::long_scale(true)),
            "si" => Ok(ScaleCut::si("")),
            _ => Err(ConfigError::UnknownScaleCut(name.to_string())),
        }
    }
}

/// Short-scale table (`K`, `M`, `B`, `T`).
pub fn cut_short_scale(space: bool) -> ScaleCut {
    ScaleCut::short_scale(space)
}

/// Long-scale table (`B` = 10^12, `T` = 10^18).
pub fn cut_long_scale(space: bool) -> ScaleCut {
    ScaleCut::long_scale(space)
}

/// SI-prefix table for `unit`.
pub fn cut_si(unit: &str) -> ScaleCut {
    ScaleCut::si(unit)
}

/// Per-element outcome of bucketing, consumed by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct CutPlan {
    /// Effective multiplier (`scale / divisor`).
    pub scale: Vec<f64>,
    /// Bucket label followed by the configured suffix.
    pub suffix: Vec<String>,
    /// Explicit accuracy, or the one inferred for the element's bucket.
    pub accuracy: Vec<f64>,
    /// Bucket index into [`ScaleCut::cuts`].
    pub bucket: Vec<usize>,
}

/// Assign each value of `x` to a bucket of `breaks`.
///
/// `scale` is applied before bucketing and folded into the returned
/// per-element scale. Without an explicit `accuracy`, precision is inferred
/// separately for every distinct effective scale.
///
/// ```
/// use numlabel::{ScaleCut, scale_cut};
///
/// let plan = scale_cut(&[0.0, 1500.0, 2e6], &ScaleCut::short_scale(false), 1.0, None, "");
/// assert_eq!(plan.suffix, ["", "K", "M"]);
/// assert_eq!(plan.scale, [1.0, 1e-3, 1e-6]);
/// ```
pub fn scale_cut(
    x: &[f64],
    breaks: &ScaleCut,
    scale: f64,
    accuracy: Option<f64>,
    suffix: &str,
) -> CutPlan {
    let cuts = breaks.cuts();
    let mut plan = CutPlan {
        scale: Vec::with_capacity(x.len()),
        suffix: Vec::with_capacity(x.len()),
        accuracy: Vec::with_capacity(x.len()),
        bucket: Vec::with_capacity(x.len()),
    };

    for &v in x {
        let bucket = breaks.bucket_of((v * scale).abs());
        let divisor = cuts[bucket].threshold;
        let effective = if bucket == 0 || v == 0.0 {
            scale
        } else {
            let s = scale / divisor;
            if s.is_finite() { s } else { scale }
        };
        plan.bucket.push(bucket);
        plan.scale.push(effective);
        plan.suffix.push(format!("{}{}", cuts[bucket].label, suffix));
    }

    match accuracy {
        Some(a) => plan.accuracy = vec![a; x.len()],
        None => {
            // Group rescaled values by effective scale and infer once per group.
            let mut groups: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
            for (&v, &s) in x.iter().zip(&plan.scale) {
                groups.entry(s.to_bits()).or_default().push(v * s);
            }
            let per_group: BTreeMap<u64, f64> = groups
                .into_iter()
                .map(|(key, vals)| {
                    let acc = precision(&vals);
                    trace!("scale {} -> accuracy {acc}", f64::from_bits(key));
                    (key, acc)
                })
                .collect();
            plan.accuracy = plan
                .scale
                .iter()
                .map(|s| per_group.get(&s.to_bits()).copied().unwrap_or(1.0))
                .collect();
        }
    }

    debug!(
        "scale cut: {} value(s) over {} bucket(s)",
        x.len(),
        cuts.len()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_on_construction() {
        let cut = ScaleCut::new([("M", 1e6), ("", 0.0), ("K", 1e3)]).unwrap();
        assert_eq!(cut.thresholds().collect::<Vec<_>>(), [0.0, 1e3, 1e6]);
        assert_eq!(cut.labels().collect::<Vec<_>>(), ["", "K", "M"]);
    }

    #[test]
    fn malformed_tables_are_rejected() {
        let empty: [(&str, f64); 0] = [];
        assert_eq!(ScaleCut::new(empty), Err(ConfigError::EmptyScaleCut));
        assert_eq!(
            ScaleCut::new([("K", 1e3), ("M", 1e6)]),
            Err(ConfigError::ScaleCutMissingZero { smallest: 1e3 })
        );
        assert!(matches!(
            ScaleCut::new([("", 0.0), ("K", f64::NAN)]),
            Err(ConfigError::MissingThreshold { label }) if label == "K"
        ));
        assert!(matches!(
            ScaleCut::new([("", 0.0), ("X", f64::INFINITY)]),
            Err(ConfigError::InvalidThreshold { .. })
        ));
        assert_eq!(
            ScaleCut::new([("", 0.0), ("a", 10.0), ("b", 10.0)]),
            Err(ConfigError::DuplicateThreshold { value: 10.0 })
        );
        assert!(matches!(
            ScaleCut::new([("neg", -1.0), ("", 0.0)]),
            Err(ConfigError::ScaleCutMissingZero { .. })
        ));
    }

    #[test]
    fn builtin_tables() {
        assert_eq!(
            ScaleCut::short_scale(false).thresholds().collect::<Vec<_>>(),
            [0.0, 1e3, 1e6, 1e9, 1e12]
        );
        assert_eq!(
            ScaleCut::long_scale(false).thresholds().collect::<Vec<_>>(),
            [0.0, 1e3, 1e6, 1e12, 1e18]
        );
        assert_eq!(
            ScaleCut::short_scale(true).labels().collect::<Vec<_>>(),
            [" ", " K", " M", " B", " T"]
        );
    }

    #[test]
    fn si_table_is_ordered_and_uses_micro_sign() {
        let si = ScaleCut::si("g");
        let t: Vec<f64> = si.thresholds().collect();
        assert!(t.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(t.len(), 18);
        assert_eq!(t[0], 0.0);
        assert!(si.labels().any(|l| l == " \u{00b5}g"));
        assert!(si.labels().all(|l| l.starts_with(' ') && l.ends_with('g')));
        // revalidating the builtin table must succeed
        assert!(ScaleCut::new(si.cuts().iter().map(|c| (c.label.clone(), c.threshold))).is_ok());
    }

    #[test]
    fn bucket_boundaries_are_half_open() {
        let cut = ScaleCut::short_scale(false);
        assert_eq!(cut.bucket_of(0.0), 0);
        assert_eq!(cut.bucket_of(999.999), 0);
        assert_eq!(cut.bucket_of(1000.0), 1);
        assert_eq!(cut.bucket_of(1e6), 2);
        assert_eq!(cut.bucket_of(5e15), 4);
        assert_eq!(cut.bucket_of(f64::NAN), 0);
        assert_eq!(cut.bucket_of(f64::INFINITY), 0);
    }

    #[test]
    fn named_tables() {
        assert_eq!("short".parse::<ScaleCut>(), Ok(ScaleCut::short_scale(false)));
        assert_eq!("long_space".parse::<ScaleCut>(), Ok(ScaleCut::long_scale(true)));
        assert_eq!("si:B".parse::<ScaleCut>(), Ok(ScaleCut::si("B")));
        assert!(matches!(
            "huge".parse::<ScaleCut>(),
            Err(ConfigError::UnknownScaleCut(_))
        ));
    }

    #[test]
    fn plan_assigns_scale_suffix_and_accuracy() {
        let x = [0.0, 1500.0, 2500.0, 3e6, f64::NAN];
        let plan = scale_cut(&x, &ScaleCut::short_scale(false), 1.0, None, "$");
        assert_eq!(plan.bucket, [0, 1, 1, 2, 0]);
        assert_eq!(plan.suffix, ["$", "K$", "K$", "M$", "$"]);
        assert_eq!(plan.scale, [1.0, 1e-3, 1e-3, 1e-6, 1.0]);
        // K bucket sees 1.5 and 2.5 -> one decimal
        assert_eq!(plan.accuracy[1], 0.1);
        assert_eq!(plan.accuracy[2], 0.1);
        assert_eq!(plan.accuracy[3], 1.0);
    }

    #[test]
    fn explicit_accuracy_is_used_everywhere() {
        let plan = scale_cut(&[1.0, 2e3], &ScaleCut::short_scale(false), 1.0, Some(0.5), "");
        assert_eq!(plan.accuracy, [0.5, 0.5]);
    }

    #[test]
    fn global_scale_is_folded_in() {
        // 2 * 600 = 1200 -> K bucket, effective 2 / 1000
        let plan = scale_cut(&[600.0], &ScaleCut::short_scale(false), 2.0, None, "");
        assert_eq!(plan.suffix, ["K"]);
        assert_eq!(plan.scale, [0.002]);
    }
}

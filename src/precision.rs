//! Precision inference and rounding helpers.

use std::collections::BTreeSet;

/// Largest number of fraction digits ever displayed.
pub const MAX_DISPLAY_DIGITS: i32 = 20;

/// A `log10` this close to an integer is treated as that integer.
/// Absorbs float noise in gaps such as `1.2 - 1.1 = 0.09999999999999987`.
const LOG_TOLERANCE: f64 = 1e-9;

/// Exact-as-possible `10^k` (10^k is representable for |k| <= 22).
pub(crate) fn pow10(k: i32) -> f64 {
    if k >= 0 {
        10f64.powi(k)
    } else {
        1.0 / 10f64.powi(-k)
    }
}

/// `floor(log10(v))` for positive finite `v`, snapping values within
/// [`LOG_TOLERANCE`] of an integer.
pub(crate) fn magnitude(v: f64) -> i32 {
    let l = v.log10();
    let nearest = l.round();
    if (l - nearest).abs() < LOG_TOLERANCE {
        nearest as i32
    } else {
        l.floor() as i32
    }
}

/// Infer the coarsest decimal accuracy that keeps all distinct finite values apart.
///
/// - Non-finite values and duplicates are ignored; fewer than two distinct
///   values give `1.0`.
/// - The smallest adjacent gap sets the order of magnitude; the accuracy is one
///   order finer than that gap.
/// - If that extra digit would always be `0`, the accuracy is coarsened by ten.
/// - Never coarser than whole units.
///
/// ```
/// use numlabel::precision;
///
/// assert_eq!(precision(&[1.0, 2.0, 3.0]), 1.0);
/// assert_eq!(precision(&[1.0, 1.1, 1.2]), 0.1);
/// assert_eq!(precision(&[0.25, 0.5]), 0.01);
/// ```
pub fn precision(values: &[f64]) -> f64 {
    let distinct: BTreeSet<u64> = values
        .iter()
        .filter(|v| v.is_finite())
        // -0.0 and 0.0 are the same value
        .map(|v| (if *v == 0.0 { 0.0f64 } else { *v }).to_bits())
        .collect();
    let mut sorted: Vec<f64> = distinct.into_iter().map(f64::from_bits).collect();
    if sorted.len() <= 1 {
        return 1.0;
    }
    sorted.sort_by(f64::total_cmp);

    let smallest_gap = sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min);

    if smallest_gap < f64::EPSILON.sqrt() {
        return 1.0;
    }

    let mut exponent = magnitude(smallest_gap) - 1;
    let step = pow10(exponent);
    if sorted.iter().all(|v| (v / step).round() % 10.0 == 0.0) {
        exponent += 1;
    }
    pow10(exponent).min(1.0)
}

/// Round `v` to the nearest multiple of `step`, ties away from zero.
///
/// Non-finite values pass through unchanged.
pub fn round_any(v: f64, step: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    (v / step).round() * step
}

/// Number of fraction digits needed to show a value rounded to `accuracy`,
/// clamped to `0..=20`.
pub fn display_digits(accuracy: f64) -> usize {
    (-magnitude(accuracy)).clamp(0, MAX_DISPLAY_DIGITS) as usize
}

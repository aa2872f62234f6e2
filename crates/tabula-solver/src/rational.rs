//! Snapping of floating point round-off back to nearby small rationals.
//!
//! Every sign or zero test that decides control flow in the engine goes
//! through [`correct`], so `2.9999999999` compares as `3` and `1e-13` as `0`.

/// Largest denominator considered when looking for a nearby rational.
pub const MAX_DENOMINATOR: i64 = 10_000;

/// Relative distance under which a value is replaced by its rational.
pub const EPSILON: f64 = 1e-9;

/// Cap on the absolute snapping distance, so large magnitudes are only
/// moved by round-off and never by a real amount.
pub const MAX_TOLERANCE: f64 = 1e-6;

/// Values beyond this magnitude are returned untouched.
const MAX_MAGNITUDE: f64 = 1e15;

/// Replace `value` by the closest rational with denominator at most
/// [`MAX_DENOMINATOR`] when it lies within [`EPSILON`] of it, relative to
/// its magnitude and never further than [`MAX_TOLERANCE`].
///
/// Infinite and NaN values are returned unchanged.
pub fn correct(value: f64) -> f64 {
    if !value.is_finite() || value.abs() > MAX_MAGNITUDE {
        return value;
    }

    let (numerator, denominator) = approximate(value, MAX_DENOMINATOR);
    let snapped = numerator as f64 / denominator as f64;
    let tolerance = (EPSILON * value.abs().max(1.0)).min(MAX_TOLERANCE);
    if (value - snapped).abs() <= tolerance {
        snapped
    } else {
        value
    }
}

pub fn is_zero(value: f64) -> bool {
    correct(value) == 0.0
}

pub fn is_negative(value: f64) -> bool {
    correct(value) < 0.0
}

pub fn is_positive(value: f64) -> bool {
    correct(value) > 0.0
}

/// Whether `value` is an integer once round-off is removed.
pub fn is_integer(value: f64) -> bool {
    let corrected = correct(value);
    corrected.is_finite() && corrected.fract() == 0.0
}

/// Best continued-fraction approximation of `value` with a bounded
/// denominator, as `(numerator, denominator)`.
fn approximate(value: f64, max_denominator: i64) -> (i64, i64) {
    let negative = value < 0.0;
    let mut remainder = value.abs();

    // Convergents h/k, seeded with h(-2)/k(-2) = 0/1 and h(-1)/k(-1) = 1/0.
    let (mut h_prev, mut h) = (0i64, 1i64);
    let (mut k_prev, mut k) = (1i64, 0i64);

    for _ in 0..64 {
        let whole = remainder.floor();
        let term = whole as i64;

        let Some(h_next) = term.checked_mul(h).and_then(|v| v.checked_add(h_prev)) else {
            break;
        };
        let Some(k_next) = term.checked_mul(k).and_then(|v| v.checked_add(k_prev)) else {
            break;
        };
        if k_next > max_denominator {
            break;
        }

        h_prev = h;
        h = h_next;
        k_prev = k;
        k = k_next;

        let fraction = remainder - whole;
        if fraction < f64::EPSILON {
            break;
        }
        remainder = 1.0 / fraction;
    }

    if k == 0 {
        // Unreachable for finite inputs below MAX_MAGNITUDE; fall back to
        // the integer part.
        let whole = value.trunc() as i64;
        return (whole, 1);
    }

    if negative { (-h, k) } else { (h, k) }
}

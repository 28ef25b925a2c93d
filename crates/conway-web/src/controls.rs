//! Numeric coercion for the resize inputs.
//!
//! `<input type="number">` hands back an `f64` that may be `NaN` (empty or
//! non-numeric text), negative, fractional, or absurdly large. The driver
//! forwards whatever it reads; these helpers are how the universe turns that
//! into a grid extent.

/// Largest accepted grid extent along either axis.
pub const MAX_DIMENSION: u32 = 1024;

/// Convert an input value to a grid extent: non-finite and non-positive
/// values become `0`, fractions truncate, huge values saturate.
#[must_use]
pub fn coerce_dimension(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.trunc() as u32
}

/// Clamp a requested extent into `0..=MAX_DIMENSION`.
#[must_use]
pub const fn clamp_dimension(value: u32) -> u32 {
    if value > MAX_DIMENSION {
        MAX_DIMENSION
    } else {
        value
    }
}

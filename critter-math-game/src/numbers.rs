//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Widen a usize, saturating on exotic targets where it exceeds u64.
#[must_use]
pub fn usize_to_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Round a f64 and clamp it into the u64 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    cast::<f64, u64>(value.round()).unwrap_or(u64::MAX)
}

/// `part / whole` capped to `[0, 1]`; an empty whole counts as complete.
#[must_use]
pub fn capped_ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 1.0;
    }
    (u64_to_f64(part) / u64_to_f64(whole)).clamp(0.0, 1.0)
}

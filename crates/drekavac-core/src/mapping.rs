//! Stateless mappings between normalized control values and engineering units.
//!
//! Controls are stored in their declared ranges (for example `cutoff` in
//! `[0, 1]`). The functions here turn those values into what the DSP needs
//! (Hz, shelf gain factors) and into what a display shows (percent, bipolar
//! percent). Every function is total: out-of-domain input is clamped to the
//! nearest boundary instead of producing NaN.

use libm::{logf, powf};

/// Power-skewed logarithmic frequency mapping.
///
/// ```text
/// hz   = min_hz * (max_hz / min_hz) ^ (norm ^ exponent)
/// norm = (ln(hz / min_hz) / ln(max_hz / min_hz)) ^ (1 / exponent)
/// ```
///
/// An exponent below 1.0 spends more of the control travel in the upper
/// part of the frequency range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogFrequencyMap {
    /// Frequency at `norm = 0`.
    pub min_hz: f32,
    /// Frequency at `norm = 1`.
    pub max_hz: f32,
    /// Skew exponent applied to the normalized value.
    pub exponent: f32,
}

/// Mapping used by the distortion cutoff control: 100 Hz to 8 kHz, skew 0.7.
pub const CUTOFF_MAP: LogFrequencyMap = LogFrequencyMap::new(100.0, 8000.0, 0.7);

impl LogFrequencyMap {
    /// Create a mapping. `min_hz` must be positive and below `max_hz`.
    pub const fn new(min_hz: f32, max_hz: f32, exponent: f32) -> Self {
        Self {
            min_hz,
            max_hz,
            exponent,
        }
    }

    /// Map a normalized value in `[0, 1]` to Hz.
    ///
    /// # Example
    ///
    /// ```rust
    /// use drekavac_core::mapping::CUTOFF_MAP;
    ///
    /// assert!((CUTOFF_MAP.to_hz(0.0) - 100.0).abs() < 1e-3);
    /// assert!((CUTOFF_MAP.to_hz(1.0) - 8000.0).abs() < 0.5);
    /// ```
    #[inline]
    pub fn to_hz(&self, norm: f32) -> f32 {
        let norm = if norm.is_nan() { 0.0 } else { norm.clamp(0.0, 1.0) };
        let skewed = powf(norm, self.exponent);
        self.min_hz * powf(self.max_hz / self.min_hz, skewed)
    }

    /// Map Hz back to a normalized value in `[0, 1]`.
    ///
    /// Anything at or below `min_hz` (including zero, negative and NaN input)
    /// maps to `0.0` without evaluating the logarithm.
    #[inline]
    pub fn to_normalized(&self, hz: f32) -> f32 {
        if hz.is_nan() || hz <= self.min_hz {
            return 0.0;
        }
        let ratio = logf(hz / self.min_hz) / logf(self.max_hz / self.min_hz);
        powf(ratio, 1.0 / self.exponent).clamp(0.0, 1.0)
    }
}

/// Normalized `[0, 1]` value to a percentage.
#[inline]
pub fn to_percent(value: f32) -> f32 {
    value * 100.0
}

/// Percentage back to a normalized value.
#[inline]
pub fn from_percent(percent: f32) -> f32 {
    percent / 100.0
}

/// Normalized `[0, 1]` value to a bipolar percentage in `[-100, 100]`.
///
/// Used by the flavor control, where the center is an even blend.
#[inline]
pub fn to_bipolar_percent(value: f32) -> f32 {
    value * 200.0 - 100.0
}

/// Bipolar percentage back to a normalized value.
#[inline]
pub fn from_bipolar_percent(percent: f32) -> f32 {
    (percent + 100.0) / 200.0
}

/// Maximum extra gain applied by either tone shelf.
pub const SHELF_GAIN_RANGE: f32 = 1.5;

/// Linear gain factors for the low and high shelves at a given balance.
///
/// Returns `(low, high)` where `low = 1 + (1 - balance) * 1.5` and
/// `high = 1 + balance * 1.5`. Balance is clamped to `[0, 1]`.
#[inline]
pub fn shelf_gains(balance: f32) -> (f32, f32) {
    let balance = balance.clamp(0.0, 1.0);
    (
        1.0 + (1.0 - balance) * SHELF_GAIN_RANGE,
        1.0 + balance * SHELF_GAIN_RANGE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_map_strictly_increasing() {
        let mut last = 0.0;
        for step in 0..=10 {
            let hz = CUTOFF_MAP.to_hz(step as f32 / 10.0);
            assert!(hz > last, "step {step}: {hz} <= {last}");
            last = hz;
        }
    }

    #[test]
    fn cutoff_map_roundtrip() {
        for norm in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let back = CUTOFF_MAP.to_normalized(CUTOFF_MAP.to_hz(norm));
            assert!((back - norm).abs() < 1e-4, "{norm} came back as {back}");
        }
    }

    #[test]
    fn cutoff_inverse_guards_domain() {
        assert_eq!(CUTOFF_MAP.to_normalized(0.0), 0.0);
        assert_eq!(CUTOFF_MAP.to_normalized(-50.0), 0.0);
        assert_eq!(CUTOFF_MAP.to_normalized(f32::NAN), 0.0);
        assert_eq!(CUTOFF_MAP.to_normalized(100.0), 0.0);
        assert_eq!(CUTOFF_MAP.to_normalized(1.0e6), 1.0);
    }

    #[test]
    fn cutoff_forward_clamps() {
        assert_eq!(CUTOFF_MAP.to_hz(-1.0), CUTOFF_MAP.to_hz(0.0));
        assert_eq!(CUTOFF_MAP.to_hz(2.0), CUTOFF_MAP.to_hz(1.0));
        assert!(CUTOFF_MAP.to_hz(f32::NAN).is_finite());
    }

    #[test]
    fn percent_mappings() {
        assert_eq!(to_percent(0.42), 42.0);
        assert!((from_percent(42.0) - 0.42).abs() < 1e-6);
        assert_eq!(to_bipolar_percent(0.0), -100.0);
        assert_eq!(to_bipolar_percent(0.5), 0.0);
        assert_eq!(to_bipolar_percent(1.0), 100.0);
        assert_eq!(from_bipolar_percent(-100.0), 0.0);
        assert_eq!(from_bipolar_percent(100.0), 1.0);
    }

    #[test]
    fn shelf_gain_endpoints() {
        assert_eq!(shelf_gains(0.0), (2.5, 1.0));
        assert_eq!(shelf_gains(1.0), (1.0, 2.5));
        assert_eq!(shelf_gains(0.5), (1.75, 1.75));
    }
}

//! Biquad (bi-quadratic) filter structure.
//!
//! Provides a generic second-order IIR filter plus the coefficient designs the
//! chain needs: a low-pass for the distortion stage and the two shelves of the
//! tone filter.
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas. Shelf
//! gains are given as *linear* gain factors; the cookbook amplitude is
//! `A = sqrt(gain)`.

use crate::flush_denormal;
use core::f32::consts::PI;
use libm::{cosf, sinf, sqrtf};

/// Coefficient tuple `(b0, b1, b2, a0, a1, a2)` before normalization.
pub type Coefficients = (f32, f32, f32, f32, f32, f32);

/// Generic biquad filter coefficients and state.
///
/// Implements the Direct Form I biquad structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    /// Feedforward coefficients
    b0: f32,
    b1: f32,
    b2: f32,

    /// Feedback coefficients
    a1: f32,
    a2: f32,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the biquad coefficients, normalizing by `a0`.
    ///
    /// Filter state is preserved so coefficient changes between blocks do not
    /// restart the filter.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Sets coefficients from a [`Coefficients`] tuple.
    pub fn set_coefficient_tuple(&mut self, coefficients: Coefficients) {
        let (b0, b1, b2, a0, a1, a2) = coefficients;
        self.set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    /// Processes a single sample through the biquad filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        #[rustfmt::skip]
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
                                     - self.a1 * self.y1 - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = flush_denormal(output);

        output
    }

    /// Clears the filter state (delay lines) without touching coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Highest design frequency as a fraction of the sample rate.
///
/// Cookbook designs degenerate as the frequency approaches Nyquist (poles
/// land on the unit circle), so designs are clamped just below it.
pub const MAX_DESIGN_RATIO: f32 = 0.49;

#[inline]
fn design_omega(frequency: f32, sample_rate: f32) -> f32 {
    // NaN and sub-hertz rates design at 1 Hz so the clamp bounds stay ordered.
    let sample_rate = if sample_rate.is_finite() {
        sample_rate.max(1.0)
    } else {
        1.0
    };
    let max_freq = (sample_rate * MAX_DESIGN_RATIO).max(1.0);
    2.0 * PI * frequency.clamp(1.0, max_freq) / sample_rate
}

/// Calculates low-pass filter coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (typically 0.707 for Butterworth response)
/// * `sample_rate` - Sample rate in Hz
pub fn lowpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> Coefficients {
    let omega = design_omega(frequency, sample_rate);
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q.max(0.01));

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Shared terms of the cookbook shelf designs.
struct ShelfTerms {
    a: f32,
    a_plus_1: f32,
    a_minus_1: f32,
    cos_omega: f32,
    beta: f32,
}

fn shelf_terms(frequency: f32, q: f32, gain: f32, sample_rate: f32) -> ShelfTerms {
    let a = sqrtf(gain.max(0.0));
    let omega = design_omega(frequency, sample_rate);
    ShelfTerms {
        a,
        a_plus_1: a + 1.0,
        a_minus_1: a - 1.0,
        cos_omega: cosf(omega),
        beta: sinf(omega) * sqrtf(a) / q.max(0.01),
    }
}

/// Calculates low-shelf coefficients.
///
/// `gain` is the linear gain applied below `frequency` (DC gain equals
/// `gain`, Nyquist gain is unity).
pub fn low_shelf_coefficients(frequency: f32, q: f32, gain: f32, sample_rate: f32) -> Coefficients {
    let ShelfTerms {
        a,
        a_plus_1,
        a_minus_1,
        cos_omega,
        beta,
    } = shelf_terms(frequency, q, gain, sample_rate);
    let a_minus_1_cos = a_minus_1 * cos_omega;

    let b0 = a * (a_plus_1 - a_minus_1_cos + beta);
    let b1 = a * 2.0 * (a_minus_1 - a_plus_1 * cos_omega);
    let b2 = a * (a_plus_1 - a_minus_1_cos - beta);
    let a0 = a_plus_1 + a_minus_1_cos + beta;
    let a1 = -2.0 * (a_minus_1 + a_plus_1 * cos_omega);
    let a2 = a_plus_1 + a_minus_1_cos - beta;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates high-shelf coefficients.
///
/// `gain` is the linear gain applied above `frequency` (Nyquist gain equals
/// `gain`, DC gain is unity).
pub fn high_shelf_coefficients(frequency: f32, q: f32, gain: f32, sample_rate: f32) -> Coefficients {
    let ShelfTerms {
        a,
        a_plus_1,
        a_minus_1,
        cos_omega,
        beta,
    } = shelf_terms(frequency, q, gain, sample_rate);
    let a_minus_1_cos = a_minus_1 * cos_omega;

    let b0 = a * (a_plus_1 + a_minus_1_cos + beta);
    let b1 = -2.0 * a * (a_minus_1 + a_plus_1 * cos_omega);
    let b2 = a * (a_plus_1 + a_minus_1_cos - beta);
    let a0 = a_plus_1 - a_minus_1_cos + beta;
    let a1 = 2.0 * (a_minus_1 - a_plus_1 * cos_omega);
    let a2 = a_plus_1 - a_minus_1_cos - beta;

    (b0, b1, b2, a0, a1, a2)
}

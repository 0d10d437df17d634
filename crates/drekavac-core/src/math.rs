//! Mathematical utility functions for DSP.
//!
//! Allocation-free helpers shared by every stage of the chain. All functions
//! are `no_std` compatible and rely on `libm` for transcendental math.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Shaping and Blending
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`soft_clip`] | `tanh` saturation, the chain's only clipping curve |
//! | [`smoothstep`] | Cubic S-curve used by the compressor knee |
//! | [`lerp`] | Linear interpolation (tone balance, wavefolder depth) |
//! | [`sqrt_law_mix`] | Dry/wet blend with square-root weighting |
//!
//! # Numeric Hygiene
//!
//! - [`flush_denormal`] - Zero out subnormal filter state
//! - [`sanitize`] - Replace non-finite samples with silence

use libm::{expf, logf, sqrtf, tanhf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use drekavac_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Input is floored at `1e-10` (-200 dB) so silence never produces `-inf`.
///
/// # Example
/// ```rust
/// use drekavac_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// assert!(linear_to_db(0.0).is_finite());
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Soft clip using hyperbolic tangent.
///
/// Smooth saturation that approaches ±1 asymptotically. Every nonlinearity in
/// the chain (overdrive, distortion pre/post clip, fold limiter, output
/// safety clip) uses this curve.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Linear interpolation between `a` and `b`.
///
/// `t = 0.0` returns `a`, `t = 1.0` returns `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic Hermite S-curve `x²(3 - 2x)` over `[0, 1]`.
///
/// Input is clamped to `[0, 1]` first, so the output is always in `[0, 1]`.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Blend dry and wet signals with square-root weighting.
///
/// `w = sqrt(mix)`; `out = dry * (1 - w) + wet * w`. The square-root law keeps
/// the perceived level closer to constant than a linear crossfade through the
/// middle of the range.
///
/// `mix` is clamped to `[0, 1]`.
///
/// # Example
/// ```rust
/// use drekavac_core::sqrt_law_mix;
///
/// assert_eq!(sqrt_law_mix(0.3, 0.9, 0.0), 0.3);
/// assert_eq!(sqrt_law_mix(0.3, 0.9, 1.0), 0.9);
/// ```
#[inline]
pub fn sqrt_law_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    let w = sqrtf(mix.clamp(0.0, 1.0));
    dry * (1.0 - w) + wet * w
}

/// Flush denormal (subnormal) values to zero.
///
/// Recursive filters decaying toward silence can drift into the subnormal
/// range, where many CPUs slow down by orders of magnitude.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Replace NaN and infinities with silence.
#[inline]
pub fn sanitize(x: f32) -> f32 {
    if x.is_finite() { x } else { 0.0 }
}

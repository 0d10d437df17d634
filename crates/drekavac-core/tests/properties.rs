//! Property-based tests for drekavac-core DSP primitives.
//!
//! Tests filter stability, mapping invertibility and oversampler integrity
//! using proptest for randomized input generation.

use proptest::prelude::*;
use drekavac_core::mapping::{from_bipolar_percent, to_bipolar_percent};
use drekavac_core::{
    Biquad, CUTOFF_MAP, OnePole, Oversampler, OversamplingFactor, high_shelf_coefficients,
    low_shelf_coefficients, lowpass_coefficients, shelf_gains,
};

/// Coefficient generators indexed 0..3 (LP, low shelf, high shelf).
fn configure_biquad(biquad: &mut Biquad, variant: usize, freq: f32, q: f32, gain: f32, sr: f32) {
    let coefficients = match variant % 3 {
        0 => lowpass_coefficients(freq, q, sr),
        1 => low_shelf_coefficients(freq, q, gain, sr),
        2 => high_shelf_coefficients(freq, q, gain, sr),
        _ => unreachable!(),
    };
    biquad.set_coefficient_tuple(coefficients);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Any design frequency (including above Nyquist) gives a stable filter.
    #[test]
    fn biquad_stability(
        freq in 20.0f32..60000.0f32,
        q in 0.5f32..2.0f32,
        gain in 1.0f32..2.5f32,
        variant in 0usize..3,
        sr in prop::sample::select(vec![44100.0f32, 48000.0, 88200.0, 96000.0, 192000.0]),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut biquad = Biquad::new();
        configure_biquad(&mut biquad, variant, freq, q, gain, sr);

        for _ in 0..32 {
            for &sample in &input {
                let out = biquad.process(sample);
                prop_assert!(
                    out.is_finite() && out.abs() < 100.0,
                    "variant {} (freq={}, q={}, sr={}) produced {}",
                    variant, freq, q, sr, out
                );
            }
        }
    }

    /// `to_normalized(to_hz(n))` recovers `n`.
    #[test]
    fn cutoff_map_roundtrip(norm in 0.0f32..=1.0f32) {
        let back = CUTOFF_MAP.to_normalized(CUTOFF_MAP.to_hz(norm));
        prop_assert!((back - norm).abs() < 1e-3, "{} came back as {}", norm, back);
    }

    /// The forward map never leaves its frequency range.
    #[test]
    fn cutoff_map_bounded(norm in -10.0f32..10.0f32) {
        let hz = CUTOFF_MAP.to_hz(norm);
        prop_assert!((99.99..=8000.5).contains(&hz), "{} -> {}", norm, hz);
    }

    /// The inverse map is total over arbitrary input.
    #[test]
    fn cutoff_inverse_total(hz in prop::num::f32::ANY) {
        let norm = CUTOFF_MAP.to_normalized(hz);
        prop_assert!((0.0..=1.0).contains(&norm), "{} -> {}", hz, norm);
    }

    #[test]
    fn bipolar_roundtrip(value in 0.0f32..=1.0f32) {
        let back = from_bipolar_percent(to_bipolar_percent(value));
        prop_assert!((back - value).abs() < 1e-5);
    }

    /// Shelf gains stay within `[1, 2.5]` and always sum to 3.5.
    #[test]
    fn shelf_gains_bounded(balance in -1.0f32..2.0f32) {
        let (low, high) = shelf_gains(balance);
        prop_assert!((1.0..=2.5).contains(&low));
        prop_assert!((1.0..=2.5).contains(&high));
        prop_assert!((low + high - 3.5).abs() < 1e-5);
    }

    /// A one-pole low-pass never overshoots its input range.
    #[test]
    fn one_pole_bounded(
        freq in 1.0f32..100000.0f32,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut lp = OnePole::matched(96000.0, freq);
        for &sample in &input {
            let out = lp.process(sample);
            prop_assert!(out.abs() <= 1.0 + 1e-5, "freq {} produced {}", freq, out);
        }
        let mut rc = OnePole::rc(96000.0, freq);
        for &sample in &input {
            let out = rc.process(sample);
            prop_assert!(out.abs() <= 1.0 + 1e-5, "freq {} produced {}", freq, out);
        }
    }

    /// Oversampling round trips keep arbitrary blocks finite. The bound is the
    /// L1 norm of the round-trip allpass response, with margin.
    #[test]
    fn oversampler_bounded(
        x4 in any::<bool>(),
        input in prop::collection::vec(-1.0f32..=1.0f32, 1..256),
    ) {
        let factor = if x4 { OversamplingFactor::X4 } else { OversamplingFactor::X2 };
        let mut os = Oversampler::new(factor);
        os.prepare(256);
        let mut block = input.clone();
        os.process(&mut block, |_| {});
        for &s in &block {
            prop_assert!(s.is_finite() && s.abs() < 16.0, "got {}", s);
        }
    }
}

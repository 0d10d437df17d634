//! Sine wavefolder.
//!
//! ```text
//! depth  = clamp(fold^1.5, 0, 1)
//! scaled = x * (1 + 9 * depth)
//! folded = tanh(sin(scaled * π/2))
//! out    = x * (1 - depth) + folded * depth
//! ```
//!
//! Stateless. `fold = 0` passes the input through unchanged.

use core::f32::consts::FRAC_PI_2;
use drekavac_core::{Effect, ParamDescriptor, ParameterInfo, lerp, soft_clip};
use libm::{powf, sinf};

use crate::params::DESCRIPTORS;

/// Input gain added at full depth.
pub const MAX_FOLD_GAIN: f32 = 9.0;
/// Exponent shaping the fold control into depth.
pub const DEPTH_CURVE: f32 = 1.5;

const FOLD: usize = 4;

/// Wavefolder stage.
///
/// # Example
///
/// ```rust
/// use drekavac_core::Effect;
/// use drekavac_effects::Wavefolder;
///
/// let mut fold = Wavefolder::new();
/// fold.set_fold(0.0);
/// assert_eq!(fold.process(0.3), 0.3);
/// ```
#[derive(Debug, Clone)]
pub struct Wavefolder {
    fold: f32,
    depth: f32,
}

impl Wavefolder {
    /// Create with the default fold amount.
    pub fn new() -> Self {
        let mut folder = Self {
            fold: 0.0,
            depth: 0.0,
        };
        folder.set_fold(DESCRIPTORS[FOLD].default);
        folder
    }

    /// Set the fold control, clamped to 0–1.
    pub fn set_fold(&mut self, fold: f32) {
        self.fold = DESCRIPTORS[FOLD].clamp(fold);
        self.depth = fold_depth(self.fold);
    }

    /// Current fold control.
    pub fn fold(&self) -> f32 {
        self.fold
    }

    /// Effective depth after the 1.5 curve.
    pub fn depth(&self) -> f32 {
        self.depth
    }
}

impl Default for Wavefolder {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth for a fold control value.
#[inline]
pub fn fold_depth(fold: f32) -> f32 {
    powf(fold.clamp(0.0, 1.0), DEPTH_CURVE).clamp(0.0, 1.0)
}

impl Effect for Wavefolder {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        if self.depth == 0.0 {
            return input;
        }
        let scaled = input * (1.0 + self.depth * MAX_FOLD_GAIN);
        let folded = soft_clip(sinf(scaled * FRAC_PI_2));
        lerp(input, folded, self.depth)
    }

    fn set_sample_rate(&mut self, _sample_rate: f32) {}

    fn reset(&mut self) {}
}

impl ParameterInfo for Wavefolder {
    fn param_count(&self) -> usize {
        1
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        (index == 0).then_some(DESCRIPTORS[FOLD])
    }

    fn get_param(&self, index: usize) -> f32 {
        if index == 0 { self.fold } else { 0.0 }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        if index == 0 {
            self.set_fold(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_follows_curve() {
        let mut folder = Wavefolder::new();
        folder.set_fold(0.25);
        assert!((folder.depth() - 0.125).abs() < 1e-6);
        folder.set_fold(1.0);
        assert_eq!(folder.depth(), 1.0);
        folder.set_fold(-1.0);
        assert_eq!(folder.depth(), 0.0);
    }

    #[test]
    fn full_depth_is_pure_fold() {
        let mut folder = Wavefolder::new();
        folder.set_fold(1.0);
        let x = 0.3;
        let expected = libm::tanhf(libm::sinf(x * 10.0 * FRAC_PI_2));
        assert!((folder.process(x) - expected).abs() < 1e-6);
    }

    #[test]
    fn folding_grows_with_depth() {
        // RMS deviation from the input over a full-scale sweep.
        let deviation = |fold: f32| {
            let mut folder = Wavefolder::new();
            folder.set_fold(fold);
            let sum: f32 = (-100..=100)
                .map(|i| {
                    let x = i as f32 / 100.0;
                    let d = folder.process(x) - x;
                    d * d
                })
                .sum();
            libm::sqrtf(sum / 201.0)
        };
        let mut last = 0.0;
        for fold in [0.1, 0.4, 0.7, 1.0] {
            let current = deviation(fold);
            assert!(current > last, "fold {fold}: {current} <= {last}");
            last = current;
        }
    }

    #[test]
    fn bounded_for_bounded_input() {
        let mut folder = Wavefolder::new();
        folder.set_fold(0.6);
        for i in -100..=100 {
            let x = i as f32 / 100.0;
            assert!(folder.process(x).abs() <= 1.0);
        }
    }
}

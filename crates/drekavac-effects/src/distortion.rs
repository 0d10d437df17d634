//! Cutoff-controlled distortion.
//!
//! # Signal Flow
//!
//! ```text
//! tanh(x * amount) → LP biquad → LP biquad → one-pole 10 kHz → tanh
//!                     └──── shared coefficients ────┘
//! ```
//!
//! The two cascaded Butterworth sections give a four-pole low-pass whose
//! cutoff follows the normalized `cutoff` control through
//! [`CUTOFF_MAP`](drekavac_core::CUTOFF_MAP). The fixed post filter tames the
//! fizz the pre-clip leaves near the top of the band.

use drekavac_core::{
    Biquad, CUTOFF_MAP, Effect, OnePole, ParamDescriptor, ParameterInfo, lowpass_coefficients,
    soft_clip,
};

use crate::params::DESCRIPTORS;

/// Q of each low-pass section.
pub const SECTION_Q: f32 = 0.707;
/// Fixed post low-pass frequency.
pub const POST_LOWPASS_HZ: f32 = 10_000.0;

const AMOUNT: usize = 2;
const CUTOFF: usize = 3;

/// Distortion stage.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Distortion | 0–10 | 1.0 |
/// | 1 | Cutoff | 0–1 (100–8000 Hz) | 0.75 |
///
/// # Example
///
/// ```rust
/// use drekavac_core::Effect;
/// use drekavac_effects::Distortion;
///
/// let mut dist = Distortion::new(96000.0);
/// dist.set_amount(4.0);
/// dist.set_cutoff(0.5);
/// assert!((dist.cutoff_hz() - 1485.0).abs() < 5.0);
/// let out = dist.process(0.25);
/// assert!(out.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Distortion {
    amount: f32,
    cutoff: f32,
    cutoff_hz: f32,
    sections: [Biquad; 2],
    post: OnePole,
    sample_rate: f32,
}

impl Distortion {
    /// Create with default amount and cutoff.
    pub fn new(sample_rate: f32) -> Self {
        let cutoff = DESCRIPTORS[CUTOFF].default;
        let mut dist = Self {
            amount: DESCRIPTORS[AMOUNT].default,
            cutoff,
            cutoff_hz: CUTOFF_MAP.to_hz(cutoff),
            sections: [Biquad::new(), Biquad::new()],
            post: OnePole::matched(sample_rate, POST_LOWPASS_HZ),
            sample_rate,
        };
        dist.recalculate_coefficients();
        dist
    }

    /// Set the pre-gain, clamped to 0–10.
    pub fn set_amount(&mut self, amount: f32) {
        self.amount = DESCRIPTORS[AMOUNT].clamp(amount).max(0.0);
    }

    /// Current pre-gain.
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Set the normalized cutoff, clamped to 0–1.
    ///
    /// Coefficients are only redesigned when the value changes.
    pub fn set_cutoff(&mut self, cutoff: f32) {
        let cutoff = DESCRIPTORS[CUTOFF].clamp(cutoff);
        if cutoff != self.cutoff {
            self.cutoff = cutoff;
            self.cutoff_hz = CUTOFF_MAP.to_hz(cutoff);
            self.recalculate_coefficients();
        }
    }

    /// Current normalized cutoff.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Current cutoff in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    fn recalculate_coefficients(&mut self) {
        let coefficients = lowpass_coefficients(self.cutoff_hz, SECTION_Q, self.sample_rate);
        for section in &mut self.sections {
            section.set_coefficient_tuple(coefficients);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            cutoff_hz = self.cutoff_hz,
            sample_rate = self.sample_rate,
            "distortion low-pass redesigned"
        );
    }
}

impl Effect for Distortion {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let mut y = soft_clip(input * self.amount);
        for section in &mut self.sections {
            y = section.process(y);
        }
        soft_clip(self.post.process(y))
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.post.set_sample_rate(sample_rate);
        self.recalculate_coefficients();
    }

    fn reset(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
        self.post.reset();
    }
}

impl ParameterInfo for Distortion {
    fn param_count(&self) -> usize {
        2
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(DESCRIPTORS[AMOUNT]),
            1 => Some(DESCRIPTORS[CUTOFF]),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.amount,
            1 => self.cutoff,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_amount(value),
            1 => self.set_cutoff(value),
            _ => {}
        }
    }
}

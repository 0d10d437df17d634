//! Overdrive: gain, tanh saturation and a tone-controlled one-pole smoother.
//!
//! ```text
//! x = input * (1 + drive²)
//! y = tanh(x)
//! out = OnePole(y)        cutoff = 200 + tone * 8000 Hz
//! ```
//!
//! This is always the first nonlinearity in the chain. Its output feeds
//! both parallel branches and is also summed into the blend directly.

use drekavac_core::{Effect, OnePole, ParamDescriptor, ParameterInfo, soft_clip};

use crate::params::DESCRIPTORS;

/// Smoothing cutoff at `tone = 0`.
pub const MIN_SMOOTHING_HZ: f32 = 200.0;
/// Cutoff added across the tone range.
pub const SMOOTHING_RANGE_HZ: f32 = 8000.0;

/// Overdrive stage.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Drive | 0–10 | 1.0 |
/// | 1 | Tone | 0–1 | 0.5 |
///
/// # Example
///
/// ```rust
/// use drekavac_core::Effect;
/// use drekavac_effects::Overdrive;
///
/// let mut od = Overdrive::new(96000.0);
/// od.set_drive(3.0);
/// od.set_tone(0.2);
/// let out = od.process(0.5);
/// assert!(out.abs() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Overdrive {
    drive: f32,
    /// Cached `1 + drive²`.
    input_gain: f32,
    tone: f32,
    smoother: OnePole,
}

impl Overdrive {
    /// Create with default drive and tone.
    pub fn new(sample_rate: f32) -> Self {
        let tone = DESCRIPTORS[1].default;
        let mut od = Self {
            drive: 0.0,
            input_gain: 1.0,
            tone,
            smoother: OnePole::rc(sample_rate, smoothing_hz(tone)),
        };
        od.set_drive(DESCRIPTORS[0].default);
        od
    }

    /// Set drive, clamped to 0–10.
    pub fn set_drive(&mut self, drive: f32) {
        self.drive = DESCRIPTORS[0].clamp(drive);
        self.input_gain = 1.0 + self.drive * self.drive;
    }

    /// Current drive.
    pub fn drive(&self) -> f32 {
        self.drive
    }

    /// Set tone, clamped to 0–1. Moves the smoothing cutoff.
    pub fn set_tone(&mut self, tone: f32) {
        self.tone = DESCRIPTORS[1].clamp(tone);
        self.smoother.set_frequency(smoothing_hz(self.tone));
    }

    /// Current tone.
    pub fn tone(&self) -> f32 {
        self.tone
    }

    /// Current smoothing cutoff in Hz.
    pub fn smoothing_hz(&self) -> f32 {
        self.smoother.frequency()
    }
}

/// Smoothing cutoff for a tone value.
#[inline]
pub fn smoothing_hz(tone: f32) -> f32 {
    MIN_SMOOTHING_HZ + tone.clamp(0.0, 1.0) * SMOOTHING_RANGE_HZ
}

impl Effect for Overdrive {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.smoother.process(soft_clip(input * self.input_gain))
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.smoother.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.smoother.reset();
    }
}

impl ParameterInfo for Overdrive {
    fn param_count(&self) -> usize {
        2
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(DESCRIPTORS[0]),
            1 => Some(DESCRIPTORS[1]),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.drive,
            1 => self.tone,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_drive(value),
            1 => self.set_tone(value),
            _ => {}
        }
    }
}

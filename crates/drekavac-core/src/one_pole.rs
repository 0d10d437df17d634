//! One-pole lowpass smoother.
//!
//! A single-state exponential follower:
//!
//! ```text
//! y[n] = y[n-1] + g * (x[n] - y[n-1])
//! ```
//!
//! Two coefficient designs are available, because the chain uses both:
//!
//! | Design | Gain `g` | Used by |
//! |--------|----------|---------|
//! | [`OnePoleDesign::Rc`] | `dt / (RC + dt)`, `RC = 1/(2πf)`, `dt = 1/fs` | Overdrive tone smoothing |
//! | [`OnePoleDesign::Matched`] | `1 - exp(-2πf/fs)` | Distortion 10 kHz post filter |
//!
//! Both give a 6 dB/octave rolloff with unity DC gain. They differ slightly
//! near Nyquist, which matters for reproducing the chain's exact response.
//!
//! # Usage
//!
//! ```rust
//! use drekavac_core::OnePole;
//!
//! let mut lp = OnePole::rc(96000.0, 4200.0);
//! let filtered = lp.process(1.0);
//! assert!(filtered < 1.0);
//! ```

use crate::flush_denormal;
use core::f32::consts::TAU;
use libm::expf;

/// Coefficient design for [`OnePole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnePoleDesign {
    /// Analog RC prototype discretized with backward Euler.
    #[default]
    Rc,
    /// Impulse-invariant (matched-z) pole placement.
    Matched,
}

/// One-pole (6 dB/oct) lowpass filter.
///
/// # Invariants
///
/// - `gain` is always in (0, 1] for stable operation
/// - `state` is flushed to zero when below 1e-20 (denormal protection)
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    gain: f32,
    sample_rate: f32,
    freq: f32,
    design: OnePoleDesign,
}

impl OnePole {
    /// Create a filter with the given coefficient design.
    pub fn new(design: OnePoleDesign, sample_rate: f32, freq_hz: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            gain: 1.0,
            sample_rate,
            freq: freq_hz,
            design,
        };
        filter.recalculate_gain();
        filter
    }

    /// Create an RC-prototype filter.
    pub fn rc(sample_rate: f32, freq_hz: f32) -> Self {
        Self::new(OnePoleDesign::Rc, sample_rate, freq_hz)
    }

    /// Create a matched-z filter.
    pub fn matched(sample_rate: f32, freq_hz: f32) -> Self {
        Self::new(OnePoleDesign::Matched, sample_rate, freq_hz)
    }

    /// Set the cutoff frequency and recalculate the coefficient.
    ///
    /// Skips the recalculation when the frequency is unchanged.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        if freq_hz != self.freq {
            self.freq = freq_hz;
            self.recalculate_gain();
        }
    }

    /// Current cutoff frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.freq
    }

    /// Current smoothing gain `g`.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(self.state + self.gain * (input - self.state));
        self.state
    }

    /// Reset filter state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    /// Update sample rate and recalculate the coefficient.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_gain();
    }

    fn recalculate_gain(&mut self) {
        let freq = self.freq.max(1.0);
        let sample_rate = self.sample_rate.max(1.0);
        self.gain = match self.design {
            OnePoleDesign::Rc => {
                let rc = 1.0 / (TAU * freq);
                let dt = 1.0 / sample_rate;
                dt / (rc + dt)
            }
            OnePoleDesign::Matched => 1.0 - expf(-TAU * freq / sample_rate),
        };
    }
}

//! Peak envelope follower with separate attack and release.
//!
//! The envelope rises with the attack coefficient while the rectified input
//! exceeds it and falls with the release coefficient otherwise:
//!
//! ```text
//! coeff = |x| > env ? attack : release
//! env   = coeff * (env - |x|) + |x|
//! ```
//!
//! Coefficients are `exp(-1 / (t * fs))` with `t` in seconds.

use libm::expf;

/// Envelope follower for tracking signal amplitude.
///
/// # Example
///
/// ```rust
/// use drekavac_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::with_times(96000.0, 5.0, 50.0);
/// let level = env.process(0.5);
/// assert!(level > 0.0 && level < 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    /// Current envelope level (linear)
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
    attack_ms: f32,
    release_ms: f32,
}

impl EnvelopeFollower {
    /// Create a new envelope follower with 10 ms attack and 100 ms release.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_times(sample_rate, 10.0, 100.0)
    }

    /// Create with specified attack and release times in milliseconds.
    pub fn with_times(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        let mut follower = Self {
            envelope: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            attack_ms: attack_ms.max(0.01),
            release_ms: release_ms.max(0.01),
        };
        follower.recalculate_coefficients();
        follower
    }

    /// Set the attack time in milliseconds.
    pub fn set_attack_ms(&mut self, attack_ms: f32) {
        self.attack_ms = attack_ms.max(0.01);
        self.recalculate_coefficients();
    }

    /// Current attack time in milliseconds.
    pub fn attack_ms(&self) -> f32 {
        self.attack_ms
    }

    /// Set the release time in milliseconds.
    pub fn set_release_ms(&mut self, release_ms: f32) {
        self.release_ms = release_ms.max(0.01);
        self.recalculate_coefficients();
    }

    /// Current release time in milliseconds.
    pub fn release_ms(&self) -> f32 {
        self.release_ms
    }

    /// Update sample rate and recalculate coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Process a sample and return the current envelope level.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let level = input.abs();
        let coeff = if level > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = crate::flush_denormal(coeff * (self.envelope - level) + level);
        self.envelope
    }

    /// Current envelope level without processing new input.
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Reset the envelope to zero.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    fn recalculate_coefficients(&mut self) {
        let sample_rate = self.sample_rate.max(1.0);
        self.attack_coeff = expf(-1.0 / (self.attack_ms * 0.001 * sample_rate));
        self.release_coeff = expf(-1.0 / (self.release_ms * 0.001 * sample_rate));
    }
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

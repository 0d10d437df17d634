//! Fixed soft-knee compressor.
//!
//! A feed-forward peak compressor with constant settings. It is not a user
//! control; the chain decides where (or whether) to run it through
//! [`CompressorPlacement`](crate::CompressorPlacement).
//!
//! # Signal Flow
//!
//! ```text
//! Input → Envelope Follower → dB → Gain Computer → linear gain × Input
//! ```
//!
//! # Gain Computer
//!
//! With `over = level - threshold` and `full = threshold + over / ratio - level`:
//!
//! | Region | Gain (dB) |
//! |--------|-----------|
//! | `level <= threshold - knee/2` | 0 |
//! | inside the knee | `smoothstep((level - (threshold - knee/2)) / knee) * full` |
//! | `level > threshold + knee/2` | `full` |

use drekavac_core::{Effect, EnvelopeFollower, db_to_linear, linear_to_db, smoothstep};

/// Constant compressor settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressorSettings {
    /// Threshold in dBFS.
    pub threshold_db: f32,
    /// Compression ratio (input dB : output dB above threshold).
    pub ratio: f32,
    /// Knee width in dB, centred on the threshold.
    pub knee_db: f32,
    /// Attack time in milliseconds.
    pub attack_ms: f32,
    /// Release time in milliseconds.
    pub release_ms: f32,
}

impl CompressorSettings {
    /// Gentle limiting: -3 dB, 2:1, 2 dB knee, 5 ms / 50 ms.
    pub const GENTLE: Self = Self {
        threshold_db: -3.0,
        ratio: 2.0,
        knee_db: 2.0,
        attack_ms: 5.0,
        release_ms: 50.0,
    };
}

impl Default for CompressorSettings {
    fn default() -> Self {
        Self::GENTLE
    }
}

/// Gain computer for the soft-knee curve.
#[derive(Debug, Clone)]
struct GainComputer {
    threshold_db: f32,
    ratio: f32,
    knee_db: f32,
}

impl GainComputer {
    fn new(settings: &CompressorSettings) -> Self {
        Self {
            threshold_db: settings.threshold_db,
            ratio: settings.ratio.max(1.0),
            knee_db: settings.knee_db.max(0.0),
        }
    }

    #[inline]
    fn compute_gain_db(&self, level_db: f32) -> f32 {
        let half_knee = self.knee_db / 2.0;
        let full = self.threshold_db + (level_db - self.threshold_db) / self.ratio - level_db;

        if level_db > self.threshold_db + half_knee {
            full
        } else if level_db > self.threshold_db - half_knee {
            let position = (level_db - (self.threshold_db - half_knee)) / self.knee_db;
            smoothstep(position) * full
        } else {
            0.0
        }
    }
}

/// Compressor stage.
///
/// # Example
///
/// ```rust
/// use drekavac_core::Effect;
/// use drekavac_effects::Compressor;
///
/// let mut comp = Compressor::new(96000.0);
/// let mut out = 0.0;
/// for _ in 0..96_000 {
///     out = comp.process(1.0);
/// }
/// // 0 dBFS in, -3 dB threshold at 2:1 settles at -1.5 dBFS.
/// assert!((out - 0.841).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct Compressor {
    settings: CompressorSettings,
    envelope: EnvelopeFollower,
    gain_computer: GainComputer,
    /// Last computed gain in dB.
    last_gain_reduction_db: f32,
}

impl Compressor {
    /// Create with [`CompressorSettings::GENTLE`].
    pub fn new(sample_rate: f32) -> Self {
        Self::with_settings(sample_rate, CompressorSettings::GENTLE)
    }

    /// Create with custom settings.
    pub fn with_settings(sample_rate: f32, settings: CompressorSettings) -> Self {
        Self {
            settings,
            envelope: EnvelopeFollower::with_times(
                sample_rate,
                settings.attack_ms,
                settings.release_ms,
            ),
            gain_computer: GainComputer::new(&settings),
            last_gain_reduction_db: 0.0,
        }
    }

    /// Active settings.
    pub fn settings(&self) -> CompressorSettings {
        self.settings
    }

    /// Returns the last computed gain in dB.
    ///
    /// Non-positive except in the lower half of the knee, where the curve
    /// lifts the signal by a fraction of a dB.
    pub fn gain_reduction_db(&self) -> f32 {
        self.last_gain_reduction_db
    }

    /// Static curve: gain in dB for a steady input level in dBFS.
    pub fn static_gain_db(&self, level_db: f32) -> f32 {
        self.gain_computer.compute_gain_db(level_db)
    }
}

impl Effect for Compressor {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let level_db = linear_to_db(self.envelope.process(input));
        let gain_db = self.gain_computer.compute_gain_db(level_db);
        self.last_gain_reduction_db = gain_db;
        input * db_to_linear(gain_db)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.envelope.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.envelope.reset();
        self.last_gain_reduction_db = 0.0;
    }
}

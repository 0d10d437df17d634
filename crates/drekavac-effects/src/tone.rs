//! Balanced shelf tone filter.
//!
//! The input runs through a low shelf and a high shelf in parallel; the
//! output is a linear cross-fade between them weighted by `balance`:
//!
//! ```text
//! low gain  = 1 + (1 - balance) * 1.5
//! high gain = 1 + balance * 1.5
//! out       = lerp(low_shelf(x), high_shelf(x), balance)
//! ```
//!
//! Drive couples into the filter: the shelf pivot rises by 100 Hz and Q by
//! 0.05 per unit of drive (1 kHz / 0.707 at rest, 2 kHz / 1.207 at drive 10).
//!
//! Coefficients are marked dirty by the setters and redesigned on the next
//! processed sample, so several setter calls per block cost one redesign.

use drekavac_core::{
    Biquad, Effect, ParamDescriptor, ParameterInfo, high_shelf_coefficients, lerp,
    low_shelf_coefficients, shelf_gains,
};

use crate::params::DESCRIPTORS;

/// Shelf pivot at zero drive.
pub const BASE_PIVOT_HZ: f32 = 1000.0;
/// Pivot increase per unit of drive.
pub const PIVOT_HZ_PER_DRIVE: f32 = 100.0;
/// Shelf Q at zero drive.
pub const BASE_Q: f32 = 0.707;
/// Q increase per unit of drive.
pub const Q_PER_DRIVE: f32 = 0.05;

const DRIVE: usize = 0;
const TONE: usize = 1;

/// Tone filter stage.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Tone (balance) | 0–1 | 0.5 |
/// | 1 | Drive (pivot coupling) | 0–10 | 1.0 |
#[derive(Debug, Clone)]
pub struct ToneFilter {
    balance: f32,
    drive: f32,
    pivot_hz: f32,
    q: f32,
    low: Biquad,
    high: Biquad,
    sample_rate: f32,
    dirty: bool,
}

impl ToneFilter {
    /// Create with default balance and drive coupling.
    pub fn new(sample_rate: f32) -> Self {
        let mut filter = Self {
            balance: DESCRIPTORS[TONE].default,
            drive: 0.0,
            pivot_hz: BASE_PIVOT_HZ,
            q: BASE_Q,
            low: Biquad::new(),
            high: Biquad::new(),
            sample_rate,
            dirty: true,
        };
        filter.set_drive(DESCRIPTORS[DRIVE].default);
        filter.update_coefficients();
        filter
    }

    /// Set the balance, clamped to 0–1.
    pub fn set_balance(&mut self, balance: f32) {
        let balance = DESCRIPTORS[TONE].clamp(balance);
        if balance != self.balance {
            self.balance = balance;
            self.dirty = true;
        }
    }

    /// Current balance.
    pub fn balance(&self) -> f32 {
        self.balance
    }

    /// Set the drive coupling, clamped to 0–10. Moves pivot and Q.
    pub fn set_drive(&mut self, drive: f32) {
        let drive = DESCRIPTORS[DRIVE].clamp(drive);
        if drive != self.drive {
            self.drive = drive;
            self.pivot_hz = BASE_PIVOT_HZ + drive * PIVOT_HZ_PER_DRIVE;
            self.q = BASE_Q + drive * Q_PER_DRIVE;
            self.dirty = true;
        }
    }

    /// Current drive coupling.
    pub fn drive(&self) -> f32 {
        self.drive
    }

    /// Current shelf pivot in Hz.
    pub fn pivot_hz(&self) -> f32 {
        self.pivot_hz
    }

    /// Current shelf Q.
    pub fn q(&self) -> f32 {
        self.q
    }

    /// Whether a redesign is pending.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Redesign both shelves now if any parameter changed.
    pub fn update_coefficients(&mut self) {
        if !self.dirty {
            return;
        }
        let (low_gain, high_gain) = shelf_gains(self.balance);
        self.low.set_coefficient_tuple(low_shelf_coefficients(
            self.pivot_hz,
            self.q,
            low_gain,
            self.sample_rate,
        ));
        self.high.set_coefficient_tuple(high_shelf_coefficients(
            self.pivot_hz,
            self.q,
            high_gain,
            self.sample_rate,
        ));
        self.dirty = false;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            pivot_hz = self.pivot_hz,
            q = self.q,
            low_gain,
            high_gain,
            "tone shelves redesigned"
        );
    }
}

impl Effect for ToneFilter {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        self.update_coefficients();
        let low = self.low.process(input);
        let high = self.high.process(input);
        lerp(low, high, self.balance)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.dirty = true;
        self.update_coefficients();
    }

    fn reset(&mut self) {
        self.low.clear();
        self.high.clear();
    }
}

impl ParameterInfo for ToneFilter {
    fn param_count(&self) -> usize {
        2
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        match index {
            0 => Some(DESCRIPTORS[TONE]),
            1 => Some(DESCRIPTORS[DRIVE]),
            _ => None,
        }
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.balance,
            1 => self.drive,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.set_balance(value),
            1 => self.set_drive(value),
            _ => {}
        }
    }
}

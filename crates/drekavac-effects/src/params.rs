//! The eight user controls and their descriptors.
//!
//! | Index | ID | Range | Default | Display |
//! |-------|----|-------|---------|---------|
//! | 0 | `drive` | 0–10 | 1.0 | plain |
//! | 1 | `tone` | 0–1 | 0.5 | percent |
//! | 2 | `distortion` | 0–10 | 1.0 | plain |
//! | 3 | `cutoff` | 0–1 | 0.75 | Hz (100–8000, skew 0.7) |
//! | 4 | `fold` | 0–1 | 0.2 | percent |
//! | 5 | `flavor` | 0–1 | 0.5 | bipolar percent |
//! | 6 | `output` | 0–2 | 1.0 | plain |
//! | 7 | `drywet` | 0–1 | 0.5 | percent |
//!
//! String IDs double as keys in persisted snapshots and must never change.

use drekavac_core::{CUTOFF_MAP, ParamDescriptor, ParamDisplay, ParamId};

/// Stable string IDs.
pub mod ids {
    /// Overdrive input gain exponent.
    pub const DRIVE: &str = "drive";
    /// Shelf balance and overdrive smoothing.
    pub const TONE: &str = "tone";
    /// Distortion pre-gain.
    pub const DISTORTION: &str = "distortion";
    /// Distortion low-pass cutoff (normalized).
    pub const CUTOFF: &str = "cutoff";
    /// Wavefolder depth.
    pub const FOLD: &str = "fold";
    /// Distortion/fold cross-fade.
    pub const FLAVOR: &str = "flavor";
    /// Output gain.
    pub const OUTPUT: &str = "output";
    /// Dry/wet blend.
    pub const DRYWET: &str = "drywet";
}

/// Number of user controls.
pub const PARAM_COUNT: usize = 8;

/// Descriptors for every control, in index order.
pub static DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::new("Drive", "Drive", 0.0, 10.0, 1.0).with_id(ParamId(100), ids::DRIVE),
    ParamDescriptor::new("Tone", "Tone", 0.0, 1.0, 0.5)
        .with_id(ParamId(101), ids::TONE)
        .with_display(ParamDisplay::Percent),
    ParamDescriptor::new("Distortion", "Dist", 0.0, 10.0, 1.0)
        .with_id(ParamId(102), ids::DISTORTION),
    ParamDescriptor::new("Cutoff", "Cutoff", 0.0, 1.0, 0.75)
        .with_id(ParamId(103), ids::CUTOFF)
        .with_display(ParamDisplay::Frequency(CUTOFF_MAP)),
    ParamDescriptor::new("Fold", "Fold", 0.0, 1.0, 0.2)
        .with_id(ParamId(104), ids::FOLD)
        .with_display(ParamDisplay::Percent),
    ParamDescriptor::new("Flavor", "Flavor", 0.0, 1.0, 0.5)
        .with_id(ParamId(105), ids::FLAVOR)
        .with_display(ParamDisplay::BipolarPercent),
    ParamDescriptor::new("Output", "Output", 0.0, 2.0, 1.0)
        .with_id(ParamId(106), ids::OUTPUT)
        .with_display(ParamDisplay::Percent),
    ParamDescriptor::new("Dry/Wet", "Mix", 0.0, 1.0, 0.5)
        .with_id(ParamId(107), ids::DRYWET)
        .with_display(ParamDisplay::Percent),
];

/// Index of a control by string ID.
pub fn index_of(id: &str) -> Option<usize> {
    DESCRIPTORS.iter().position(|desc| desc.string_id == id)
}

/// Descriptor for a control by string ID.
pub fn descriptor(id: &str) -> Option<&'static ParamDescriptor> {
    DESCRIPTORS.iter().find(|desc| desc.string_id == id)
}

/// A complete, clamped set of control values.
///
/// Values are always inside their declared ranges: every setter clamps and
/// maps NaN to the control's default.
///
/// # Example
///
/// ```rust
/// use drekavac_effects::ControlParams;
///
/// let mut params = ControlParams::default();
/// params.set_by_id("drive", 42.0);
/// assert_eq!(params.drive, 10.0);
/// assert_eq!(params.get_by_id("cutoff"), Some(0.75));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlParams {
    /// Overdrive gain exponent, 0–10.
    pub drive: f32,
    /// Tone balance, 0–1.
    pub tone: f32,
    /// Distortion pre-gain, 0–10.
    pub distortion: f32,
    /// Normalized distortion cutoff, 0–1.
    pub cutoff: f32,
    /// Fold depth control, 0–1.
    pub fold: f32,
    /// Distortion/fold cross-fade, 0–1.
    pub flavor: f32,
    /// Output gain, 0–2.
    pub output: f32,
    /// Dry/wet blend, 0–1.
    pub drywet: f32,
}

impl Default for ControlParams {
    fn default() -> Self {
        Self::from_array(core::array::from_fn(|i| DESCRIPTORS[i].default))
    }
}

impl ControlParams {
    /// Build from values in index order, clamping each.
    pub fn from_array(values: [f32; PARAM_COUNT]) -> Self {
        let v: [f32; PARAM_COUNT] = core::array::from_fn(|i| DESCRIPTORS[i].clamp(values[i]));
        Self {
            drive: v[0],
            tone: v[1],
            distortion: v[2],
            cutoff: v[3],
            fold: v[4],
            flavor: v[5],
            output: v[6],
            drywet: v[7],
        }
    }

    /// Values in index order.
    pub fn to_array(&self) -> [f32; PARAM_COUNT] {
        [
            self.drive,
            self.tone,
            self.distortion,
            self.cutoff,
            self.fold,
            self.flavor,
            self.output,
            self.drywet,
        ]
    }

    /// Copy with every field clamped into range.
    ///
    /// Needed for values that bypassed the setters (public fields, serde).
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self::from_array(self.to_array())
    }

    /// Value at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.to_array().get(index).copied()
    }

    /// Set the value at `index`, clamped. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        let Some(desc) = DESCRIPTORS.get(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            0 => self.drive = value,
            1 => self.tone = value,
            2 => self.distortion = value,
            3 => self.cutoff = value,
            4 => self.fold = value,
            5 => self.flavor = value,
            6 => self.output = value,
            7 => self.drywet = value,
            _ => {}
        }
    }

    /// Value by string ID.
    pub fn get_by_id(&self, id: &str) -> Option<f32> {
        index_of(id).and_then(|i| self.get(i))
    }

    /// Set by string ID. Returns `false` for unknown IDs.
    pub fn set_by_id(&mut self, id: &str, value: f32) -> bool {
        match index_of(id) {
            Some(index) => {
                self.set(index, value);
                true
            }
            None => false,
        }
    }

    /// Iterate `(string_id, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> {
        let values = self.to_array();
        DESCRIPTORS
            .iter()
            .zip(values)
            .map(|(desc, value)| (desc.string_id, value))
    }
}

//! Parameter introspection for discoverable, displayable controls.
//!
//! Each control is described by a [`ParamDescriptor`] carrying its range,
//! default, stable identifiers and a [`ParamDisplay`] mapping that turns the
//! stored value into display text and back. Stages expose their controls
//! through the [`ParameterInfo`] trait using index-based access.
//!
//! # Example
//!
//! ```rust
//! use drekavac_core::{ParamDescriptor, ParamDisplay, ParamId};
//!
//! let fold = ParamDescriptor::new("Fold", "Fold", 0.0, 1.0, 0.2)
//!     .with_id(ParamId(4), "fold")
//!     .with_display(ParamDisplay::Percent);
//!
//! assert_eq!(fold.format_value(0.2), "20%");
//! assert_eq!(fold.parse_value("35 %"), Some(0.35));
//! ```

use alloc::format;
use alloc::string::String;

use crate::mapping::{
    LogFrequencyMap, from_bipolar_percent, from_percent, to_bipolar_percent, to_percent,
};

/// Stable parameter identifier that survives reordering.
///
/// Used by hosts for automation and by persisted state. Once assigned, a
/// `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz (Hz).
    Hertz,
    /// Percentage (%).
    Percent,
    /// Dimensionless.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use drekavac_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Percent => "%",
            ParamUnit::None => "",
        }
    }
}

/// How a stored value is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamDisplay {
    /// The stored value itself with a fixed number of decimals.
    Plain {
        /// Digits after the decimal point.
        decimals: u8,
    },
    /// `value * 100` as an integer percentage.
    Percent,
    /// `value * 200 - 100` as a signed integer percentage.
    BipolarPercent,
    /// The stored `[0, 1]` value mapped through a frequency curve, in Hz.
    Frequency(LogFrequencyMap),
}

impl ParamDisplay {
    /// Unit implied by this display mapping.
    pub const fn unit(&self) -> ParamUnit {
        match self {
            ParamDisplay::Plain { .. } => ParamUnit::None,
            ParamDisplay::Percent | ParamDisplay::BipolarPercent => ParamUnit::Percent,
            ParamDisplay::Frequency(_) => ParamUnit::Hertz,
        }
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display.
    pub name: &'static str,
    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value on construction and reset.
    pub default: f32,
    /// Recommended step increment for encoder-style control.
    pub step: f32,
    /// Stable numeric ID for host automation.
    pub id: ParamId,
    /// Stable string ID used as the key in persisted snapshots.
    pub string_id: &'static str,
    /// Display mapping.
    pub display: ParamDisplay,
}

impl ParamDescriptor {
    /// Create a linear descriptor with plain two-decimal display.
    pub const fn new(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            display: ParamDisplay::Plain { decimals: 2 },
        }
    }

    /// Set the stable identifiers.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Set the display mapping.
    pub const fn with_display(mut self, display: ParamDisplay) -> Self {
        self.display = display;
        self
    }

    /// Set the step size.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Unit implied by the display mapping.
    pub const fn unit(&self) -> ParamUnit {
        self.display.unit()
    }

    /// Clamp a value into range. NaN becomes the default.
    ///
    /// ```rust
    /// use drekavac_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::new("Drive", "Drive", 0.0, 10.0, 1.0);
    /// assert_eq!(desc.clamp(12.0), 10.0);
    /// assert_eq!(desc.clamp(-1.0), 0.0);
    /// assert_eq!(desc.clamp(f32::NAN), 1.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Converts a plain value to `[0, 1]`.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / range
    }

    /// Converts a `[0, 1]` value back to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.clamp(self.min + normalized * (self.max - self.min))
    }

    /// Display text for a stored value.
    pub fn format_value(&self, value: f32) -> String {
        let value = self.clamp(value);
        match self.display {
            ParamDisplay::Plain { decimals } => {
                format!("{:.*}", usize::from(decimals), value)
            }
            // Whole-number displays truncate toward zero: 0.999 shows as 99%.
            ParamDisplay::Percent => format!("{}%", to_percent(value) as i32),
            ParamDisplay::BipolarPercent => format!("{}%", to_bipolar_percent(value) as i32),
            ParamDisplay::Frequency(map) => format!("{} Hz", map.to_hz(value) as i32),
        }
    }

    /// Parse display text back to a stored value, clamped into range.
    ///
    /// Accepts an optional unit suffix (`%`, `Hz`, `kHz`). Returns `None` when
    /// no number can be read.
    pub fn parse_value(&self, text: &str) -> Option<f32> {
        let text = text.trim();
        let (number, scale) = split_unit(text);
        let parsed: f32 = number.trim().parse().ok()?;
        if !parsed.is_finite() {
            return None;
        }
        let plain = match self.display {
            ParamDisplay::Plain { .. } => parsed,
            ParamDisplay::Percent => from_percent(parsed),
            ParamDisplay::BipolarPercent => from_bipolar_percent(parsed),
            ParamDisplay::Frequency(map) => map.to_normalized(parsed * scale),
        };
        Some(self.clamp(plain))
    }
}

/// Strip a trailing unit, returning the numeric part and a multiplier.
fn split_unit(text: &str) -> (&str, f32) {
    let lower_ends = |suffix: &str| {
        text.len() >= suffix.len()
            && text
                .get(text.len() - suffix.len()..)
                .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
    };
    if lower_ends("khz") {
        (&text[..text.len() - 3], 1000.0)
    } else if lower_ends("hz") {
        (&text[..text.len() - 2], 1.0)
    } else if lower_ends("k") {
        (&text[..text.len() - 1], 1000.0)
    } else if let Some(stripped) = text.strip_suffix('%') {
        (stripped, 1.0)
    } else {
        (text, 1.0)
    }
}

/// Index-based access to an effect's parameters.
pub trait ParameterInfo {
    /// Number of parameters.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` when out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index` (0.0 when out of range).
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`, clamping into range. Out-of-range
    /// indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter by display name or string ID (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name) || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Stable ID of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|desc| desc.id)
    }

    /// Index of the parameter with the given stable ID.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_id(i) == Some(id))
    }
}

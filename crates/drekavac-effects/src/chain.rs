//! Per-channel processing chain.
//!
//! Runs at the oversampled rate, one instance per channel. For each sample:
//!
//! ```text
//!                      ┌─► Distortion ─┐
//! x ─► Overdrive ──────┤               ├─► blend(flavor) ─► Tone ─► [Compressor]
//!            │         └─► Wavefolder ─┘
//!            └──────────────────────────► (summed into the blend)
//!
//! ─► dry/wet(x) ─► × output ─► tanh
//! ```
//!
//! Both branches consume the overdrive output, and the overdrive output is
//! also summed into the blend. Flavor cross-fades the branches along a
//! quarter sine: `f = sin(flavor · π/2)`, `od + dist·(1-f) + fold·f`.
//!
//! Parameters are pushed once per block with [`ChannelChain::apply`]; nothing
//! changes inside a block.

use core::f32::consts::FRAC_PI_2;
use drekavac_core::{Effect, sanitize, soft_clip, sqrt_law_mix};
use libm::sinf;

use crate::{Compressor, ControlParams, Distortion, Overdrive, ToneFilter, Wavefolder};

/// Where the fixed compressor sits in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressorPlacement {
    /// Not run.
    Bypass,
    /// On the input, before the overdrive.
    PreChain,
    /// After the tone filter, before the dry/wet blend.
    #[default]
    PostChain,
}

impl CompressorPlacement {
    /// All placements, for CLI listings.
    pub const ALL: [Self; 3] = [Self::Bypass, Self::PreChain, Self::PostChain];

    /// Lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bypass => "bypass",
            Self::PreChain => "pre",
            Self::PostChain => "post",
        }
    }

    /// Parse a lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|placement| placement.name().eq_ignore_ascii_case(name))
    }
}

/// Flavor weight `f = sin(flavor · π/2)`.
#[inline]
pub fn flavor_weight(flavor: f32) -> f32 {
    sinf(flavor.clamp(0.0, 1.0) * FRAC_PI_2)
}

/// Sum the overdrive output with the cross-faded branches.
///
/// `weight` is the output of [`flavor_weight`]: `0` keeps only the
/// distortion branch, `1` only the fold branch.
#[inline]
pub fn blend_branches(overdrive: f32, distortion: f32, fold: f32, weight: f32) -> f32 {
    overdrive + distortion * (1.0 - weight) + fold * weight
}

/// Stage instances and per-block values for one channel.
///
/// # Example
///
/// ```rust
/// use drekavac_effects::{ChannelChain, ControlParams};
///
/// let mut chain = ChannelChain::new(96000.0);
/// chain.apply(&ControlParams::default());
/// let out = chain.process(0.25);
/// assert!(out.abs() <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ChannelChain {
    overdrive: Overdrive,
    distortion: Distortion,
    wavefolder: Wavefolder,
    tone: ToneFilter,
    compressor: Compressor,
    placement: CompressorPlacement,
    flavor_weight: f32,
    output_gain: f32,
    drywet: f32,
}

impl ChannelChain {
    /// Create a chain at the given (oversampled) rate with default controls.
    pub fn new(sample_rate: f32) -> Self {
        let mut chain = Self {
            overdrive: Overdrive::new(sample_rate),
            distortion: Distortion::new(sample_rate),
            wavefolder: Wavefolder::new(),
            tone: ToneFilter::new(sample_rate),
            compressor: Compressor::new(sample_rate),
            placement: CompressorPlacement::default(),
            flavor_weight: 0.0,
            output_gain: 1.0,
            drywet: 0.0,
        };
        chain.apply(&ControlParams::default());
        chain
    }

    /// Choose where the compressor runs.
    pub fn set_compressor_placement(&mut self, placement: CompressorPlacement) {
        self.placement = placement;
    }

    /// Current compressor placement.
    pub fn compressor_placement(&self) -> CompressorPlacement {
        self.placement
    }

    /// Push a block's control values into every stage.
    ///
    /// Drive reaches both the overdrive and the tone pivot; tone reaches both
    /// the shelf balance and the overdrive smoothing.
    pub fn apply(&mut self, params: &ControlParams) {
        let params = params.clamped();
        self.overdrive.set_drive(params.drive);
        self.overdrive.set_tone(params.tone);
        self.tone.set_balance(params.tone);
        self.tone.set_drive(params.drive);
        self.distortion.set_amount(params.distortion);
        self.distortion.set_cutoff(params.cutoff);
        self.wavefolder.set_fold(params.fold);
        self.flavor_weight = flavor_weight(params.flavor);
        self.output_gain = params.output;
        self.drywet = params.drywet;
    }

    /// Process one oversampled sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let input = sanitize(input);
        let driven = match self.placement {
            CompressorPlacement::PreChain => self.compressor.process(input),
            _ => input,
        };

        let od = self.overdrive.process(driven);
        let dist = self.distortion.process(od);
        let fold = self.wavefolder.process(od);
        let parallel = blend_branches(od, dist, fold, self.flavor_weight);

        let mut filtered = self.tone.process(parallel);
        if self.placement == CompressorPlacement::PostChain {
            filtered = self.compressor.process(filtered);
        }

        let mixed = sqrt_law_mix(input, filtered, self.drywet) * self.output_gain;
        sanitize(soft_clip(mixed))
    }

    /// Process a block in place.
    pub fn process_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update every stage for a new oversampled rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.overdrive.set_sample_rate(sample_rate);
        self.distortion.set_sample_rate(sample_rate);
        self.wavefolder.set_sample_rate(sample_rate);
        self.tone.set_sample_rate(sample_rate);
        self.compressor.set_sample_rate(sample_rate);
    }

    /// Clear every stage's filter memory and envelope.
    pub fn reset(&mut self) {
        self.overdrive.reset();
        self.distortion.reset();
        self.wavefolder.reset();
        self.tone.reset();
        self.compressor.reset();
    }

    /// Overdrive stage.
    pub fn overdrive(&self) -> &Overdrive {
        &self.overdrive
    }

    /// Distortion stage.
    pub fn distortion(&self) -> &Distortion {
        &self.distortion
    }

    /// Wavefolder stage.
    pub fn wavefolder(&self) -> &Wavefolder {
        &self.wavefolder
    }

    /// Tone filter stage.
    pub fn tone(&self) -> &ToneFilter {
        &self.tone
    }

    /// Compressor stage.
    pub fn compressor(&self) -> &Compressor {
        &self.compressor
    }
}

impl Effect for ChannelChain {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        ChannelChain::process(self, input)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        ChannelChain::set_sample_rate(self, sample_rate);
    }

    fn reset(&mut self) {
        ChannelChain::reset(self);
    }
}

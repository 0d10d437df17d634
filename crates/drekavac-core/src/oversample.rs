//! Half-band polyphase IIR oversampling.
//!
//! Nonlinear stages generate harmonics above Nyquist that alias back into the
//! audible band. The [`Oversampler`] raises the rate by a power of two with a
//! cascade of 2x half-band stages, hands the oversampled block to the caller,
//! then filters and decimates back:
//!
//! ```text
//! block ─► [2x up] ─► ( [2x up] ) ─► nonlinear chain ─► ( [2x down] ) ─► [2x down] ─► block
//! ```
//!
//! ## Polyphase allpass half-band
//!
//! Each 2x stage is the classic two-branch polyphase structure
//!
//! ```text
//! H(z) = ½ · (A0(z²) + z⁻¹ · A1(z²))
//! ```
//!
//! where `A0` and `A1` are cascades of first-order allpass sections
//! `(a + z⁻¹) / (1 + a·z⁻¹)` running at the lower rate. Upsampling feeds the
//! input to both branches and interleaves their outputs; downsampling feeds
//! the odd phase to `A0` and the even phase to `A1` and averages. A full
//! up/down round trip is therefore exactly the allpass `A0(z)·A1(z)`: flat
//! magnitude with a small, frequency-dependent delay.
//!
//! The allpass coefficients come from an elliptic half-band design (order and
//! transition bandwidth fixed per stage), computed once at construction.
//!
//! ## Latency
//!
//! IIR structures have no pure delay, so latency is reported as the group
//! delay at DC, `Σ (1 - a) / (1 + a)` over every allpass section, converted to
//! base-rate samples. [`Oversampler::latency_samples`] rounds it for hosts that
//! only accept whole samples.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::flush_denormal;
use core::f64::consts::PI;
use libm::{cos, pow, sin, sqrt, tan};

/// Allpass coefficients per half-band stage (split evenly across both branches).
pub const HALF_BAND_COEFFICIENTS: usize = 8;

/// Normalized transition bandwidth of each half-band stage.
///
/// With eight coefficients this gives roughly 100 dB of stopband rejection.
pub const HALF_BAND_TRANSITION: f64 = 0.05;

/// Maximum number of cascaded 2x stages.
pub const MAX_STAGES: usize = 2;

const BRANCH_LEN: usize = HALF_BAND_COEFFICIENTS / 2;

/// Supported oversampling ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OversamplingFactor {
    /// One 2x stage.
    #[default]
    X2,
    /// Two cascaded 2x stages.
    X4,
}

impl OversamplingFactor {
    /// Ratio between the oversampled and base rates.
    pub const fn ratio(self) -> usize {
        match self {
            Self::X2 => 2,
            Self::X4 => 4,
        }
    }

    /// Number of 2x stages.
    pub const fn stages(self) -> usize {
        match self {
            Self::X2 => 1,
            Self::X4 => 2,
        }
    }

    /// Parse from a ratio (`2` or `4`).
    pub const fn from_ratio(ratio: usize) -> Option<Self> {
        match ratio {
            2 => Some(Self::X2),
            4 => Some(Self::X4),
            _ => None,
        }
    }
}

/// Compute elliptic half-band allpass coefficients.
///
/// Coefficients are returned in ascending order; even indices belong to the
/// first branch, odd indices to the second. `transition` is the transition
/// bandwidth normalized to the higher sample rate, in `(0, 0.5)`.
pub fn design_half_band(transition: f64) -> [f32; HALF_BAND_COEFFICIENTS] {
    let transition = transition.clamp(1e-4, 0.49);
    let (k, q) = transition_parameters(transition);
    let order = (HALF_BAND_COEFFICIENTS * 2 + 1) as f64;

    let mut coefficients = [0.0; HALF_BAND_COEFFICIENTS];
    for (index, coefficient) in coefficients.iter_mut().enumerate() {
        let c = (index + 1) as f64;
        let num = numerator_series(q, order, c) * pow(q, 0.25);
        let den = denominator_series(q, order, c) + 0.5;
        let ww = num / den;
        let wwsq = ww * ww;
        let x = sqrt((1.0 - wwsq * k) * (1.0 - wwsq / k)) / (1.0 + wwsq);
        *coefficient = ((1.0 - x) / (1.0 + x)) as f32;
    }
    coefficients
}

fn transition_parameters(transition: f64) -> (f64, f64) {
    let k = tan((1.0 - transition * 2.0) * PI / 4.0);
    let k = k * k;
    let kksqrt = pow(1.0 - k * k, 0.25);
    let e = 0.5 * (1.0 - kksqrt) / (1.0 + kksqrt);
    let e4 = e * e * e * e;
    let q = e * (1.0 + e4 * (2.0 + e4 * (15.0 + 150.0 * e4)));
    (k, q)
}

// Jacobi theta series; terms shrink as q^(i²) so a few iterations suffice.
fn numerator_series(q: f64, order: f64, c: f64) -> f64 {
    let mut acc = 0.0;
    let mut sign = 1.0;
    for i in 0..64u32 {
        let i = f64::from(i);
        let power = pow(q, i * (i + 1.0));
        acc += power * sin((i * 2.0 + 1.0) * c * PI / order) * sign;
        sign = -sign;
        if power < 1e-100 {
            break;
        }
    }
    acc
}

fn denominator_series(q: f64, order: f64, c: f64) -> f64 {
    let mut acc = 0.0;
    let mut sign = -1.0;
    for i in 1..64u32 {
        let i = f64::from(i);
        let power = pow(q, i * i);
        acc += power * cos(i * 2.0 * c * PI / order) * sign;
        sign = -sign;
        if power < 1e-100 {
            break;
        }
    }
    acc
}

/// Cascade of first-order allpass sections `y = a·(x - y₁) + x₁`.
#[derive(Debug, Clone, Copy, Default)]
struct AllpassBranch {
    coefficients: [f32; BRANCH_LEN],
    x: [f32; BRANCH_LEN],
    y: [f32; BRANCH_LEN],
}

impl AllpassBranch {
    fn new(coefficients: [f32; BRANCH_LEN]) -> Self {
        Self {
            coefficients,
            ..Self::default()
        }
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let mut sample = input;
        for i in 0..BRANCH_LEN {
            let out = (sample - self.y[i]) * self.coefficients[i] + self.x[i];
            self.x[i] = sample;
            self.y[i] = flush_denormal(out);
            sample = out;
        }
        sample
    }

    fn reset(&mut self) {
        self.x = [0.0; BRANCH_LEN];
        self.y = [0.0; BRANCH_LEN];
    }
}

/// One 2x half-band stage with independent up and down filter state.
#[derive(Debug, Clone, Copy)]
struct HalfBandStage {
    up: [AllpassBranch; 2],
    down: [AllpassBranch; 2],
}

impl HalfBandStage {
    fn new(coefficients: &[f32; HALF_BAND_COEFFICIENTS]) -> Self {
        let mut even = [0.0; BRANCH_LEN];
        let mut odd = [0.0; BRANCH_LEN];
        for i in 0..BRANCH_LEN {
            even[i] = coefficients[2 * i];
            odd[i] = coefficients[2 * i + 1];
        }
        let pair = [AllpassBranch::new(even), AllpassBranch::new(odd)];
        Self {
            up: pair,
            down: pair,
        }
    }

    /// `output.len()` must be `2 * input.len()`.
    fn upsample(&mut self, input: &[f32], output: &mut [f32]) {
        for (&x, pair) in input.iter().zip(output.chunks_exact_mut(2)) {
            pair[0] = self.up[0].process(x);
            pair[1] = self.up[1].process(x);
        }
    }

    /// `input.len()` must be `2 * output.len()`.
    fn downsample(&mut self, input: &[f32], output: &mut [f32]) {
        for (pair, y) in input.chunks_exact(2).zip(output.iter_mut()) {
            *y = 0.5 * (self.down[0].process(pair[1]) + self.down[1].process(pair[0]));
        }
    }

    fn reset(&mut self) {
        for branch in self.up.iter_mut().chain(self.down.iter_mut()) {
            branch.reset();
        }
    }

    /// Round-trip group delay at DC, in samples at this stage's lower rate.
    fn group_delay(&self) -> f32 {
        self.up
            .iter()
            .flat_map(|branch| branch.coefficients.iter())
            .map(|&a| (1.0 - a) / (1.0 + a))
            .sum()
    }
}

/// Single-channel block oversampler.
///
/// Buffers are sized in [`prepare`](Self::prepare), which is the only method
/// that allocates. Blocks longer than the prepared maximum are truncated to
/// it; callers split longer buffers.
///
/// # Example
///
/// ```rust
/// use drekavac_core::{Oversampler, OversamplingFactor};
///
/// let mut os = Oversampler::new(OversamplingFactor::X2);
/// os.prepare(64);
///
/// let mut block = [0.25f32; 64];
/// os.process(&mut block, |oversampled| {
///     assert_eq!(oversampled.len(), 128);
///     for s in oversampled.iter_mut() {
///         *s = libm::tanhf(*s);
///     }
/// });
/// assert!(block.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct Oversampler {
    factor: OversamplingFactor,
    stages: [HalfBandStage; MAX_STAGES],
    /// Oversampled block handed to the caller.
    buffer: Vec<f32>,
    /// Intermediate rate for multi-stage factors.
    scratch: Vec<f32>,
    max_block_size: usize,
}

impl Oversampler {
    /// Create an oversampler with the default half-band design.
    ///
    /// Call [`prepare`](Self::prepare) before processing.
    pub fn new(factor: OversamplingFactor) -> Self {
        let coefficients = design_half_band(HALF_BAND_TRANSITION);
        let stage = HalfBandStage::new(&coefficients);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            ratio = factor.ratio(),
            ?coefficients,
            "half-band oversampler designed"
        );

        Self {
            factor,
            stages: [stage; MAX_STAGES],
            buffer: Vec::new(),
            scratch: Vec::new(),
            max_block_size: 0,
        }
    }

    /// Size internal buffers for `max_block_size` base-rate samples and clear
    /// all filter state.
    pub fn prepare(&mut self, max_block_size: usize) {
        let ratio = self.factor.ratio();
        self.max_block_size = max_block_size;
        self.buffer.clear();
        self.buffer.resize(max_block_size * ratio, 0.0);
        self.scratch.clear();
        self.scratch.resize(max_block_size * ratio / 2, 0.0);
        self.reset();
    }

    /// Zero every filter delay line.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
    }

    /// Configured oversampling factor.
    pub fn factor(&self) -> OversamplingFactor {
        self.factor
    }

    /// Largest block accepted since the last [`prepare`](Self::prepare).
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Round-trip group delay at DC in base-rate samples.
    pub fn group_delay(&self) -> f32 {
        let mut delay = 0.0;
        let mut rate_divisor = 1.0;
        for stage in &self.stages[..self.factor.stages()] {
            delay += stage.group_delay() / rate_divisor;
            rate_divisor *= 2.0;
        }
        delay
    }

    /// Latency reported to hosts, in whole base-rate samples.
    pub fn latency_samples(&self) -> usize {
        libm::roundf(self.group_delay()) as usize
    }

    /// Upsample `input` into the internal buffer and return the oversampled
    /// block (`input.len() * ratio` samples).
    pub fn upsample(&mut self, input: &[f32]) -> &mut [f32] {
        let len = input.len().min(self.max_block_size);
        let input = &input[..len];
        match self.factor {
            OversamplingFactor::X2 => {
                self.stages[0].upsample(input, &mut self.buffer[..len * 2]);
            }
            OversamplingFactor::X4 => {
                let mid = &mut self.scratch[..len * 2];
                self.stages[0].upsample(input, mid);
                self.stages[1].upsample(mid, &mut self.buffer[..len * 4]);
            }
        }
        &mut self.buffer[..len * self.factor.ratio()]
    }

    /// Downsample the internal buffer into `output`.
    ///
    /// Reads the first `output.len() * ratio` oversampled samples, which must
    /// have been produced by a matching [`upsample`](Self::upsample) call.
    pub fn downsample(&mut self, output: &mut [f32]) {
        let len = output.len().min(self.max_block_size);
        let output = &mut output[..len];
        match self.factor {
            OversamplingFactor::X2 => {
                self.stages[0].downsample(&self.buffer[..len * 2], output);
            }
            OversamplingFactor::X4 => {
                let mid = &mut self.scratch[..len * 2];
                self.stages[1].downsample(&self.buffer[..len * 4], mid);
                self.stages[0].downsample(mid, output);
            }
        }
    }

    /// Upsample `block`, run `process` on the oversampled samples, and write
    /// the decimated result back into `block`.
    pub fn process<F>(&mut self, block: &mut [f32], process: F)
    where
        F: FnOnce(&mut [f32]),
    {
        process(self.upsample(block));
        self.downsample(block);
    }
}

//! Block processor: oversampling around one chain per channel.
//!
//! ```text
//! per block:   DrekavacShared ─► ControlParams ─► ChannelChain::apply (every channel)
//! per channel: block ─► Oversampler::upsample ─► ChannelChain ─► Oversampler::downsample ─► block
//! ```
//!
//! [`DrekavacProcessor::prepare`] is the only method that allocates. Blocks
//! longer than the prepared maximum are processed in maximum-size chunks;
//! parameters are read once per call, so every chunk of a call sees the same
//! values.

use drekavac_core::{Oversampler, OversamplingFactor};
use drekavac_effects::{ChannelChain, CompressorPlacement};

use crate::DrekavacShared;

/// Fixed processing options chosen before `prepare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessorConfig {
    /// Oversampling ratio around the chain.
    pub oversampling: OversamplingFactor,
    /// Where the compressor runs.
    pub compressor: CompressorPlacement,
}

#[derive(Debug, Clone)]
struct ChannelState {
    oversampler: Oversampler,
    chain: ChannelChain,
}

impl ChannelState {
    fn new(config: ProcessorConfig, oversampled_rate: f32, max_block_size: usize) -> Self {
        let mut oversampler = Oversampler::new(config.oversampling);
        oversampler.prepare(max_block_size);
        let mut chain = ChannelChain::new(oversampled_rate);
        chain.set_compressor_placement(config.compressor);
        Self { oversampler, chain }
    }

    fn process(&mut self, block: &mut [f32]) {
        let chain = &mut self.chain;
        self.oversampler
            .process(block, |oversampled| chain.process_block(oversampled));
    }

    fn reset(&mut self) {
        self.oversampler.reset();
        self.chain.reset();
    }
}

/// Multichannel processor driven by [`DrekavacShared`].
///
/// # Example
///
/// ```rust
/// use drekavac_plugin::{DrekavacProcessor, DrekavacShared, ProcessorConfig};
///
/// let shared = DrekavacShared::new();
/// let mut processor = DrekavacProcessor::new(shared.clone(), ProcessorConfig::default());
/// processor.prepare(48000.0, 256, 2);
/// assert_eq!(shared.latency_samples(), processor.latency_samples());
///
/// let mut left = vec![0.1f32; 256];
/// let mut right = vec![-0.1f32; 256];
/// processor.process_planar(&mut [&mut left[..], &mut right[..]]);
/// assert!(left.iter().chain(&right).all(|s| s.abs() <= 1.0));
/// ```
#[derive(Debug)]
pub struct DrekavacProcessor {
    shared: DrekavacShared,
    config: ProcessorConfig,
    sample_rate: f32,
    max_block_size: usize,
    latency: usize,
    channels: Vec<ChannelState>,
    /// Deinterleave space for [`process_interleaved`](Self::process_interleaved).
    scratch: Vec<Vec<f32>>,
}

impl DrekavacProcessor {
    /// Create an unprepared processor. Nothing is processed until
    /// [`prepare`](Self::prepare) is called.
    pub fn new(shared: DrekavacShared, config: ProcessorConfig) -> Self {
        Self {
            shared,
            config,
            sample_rate: 0.0,
            max_block_size: 0,
            latency: Oversampler::new(config.oversampling).latency_samples(),
            channels: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Build fresh per-channel state for a sample rate, maximum block size
    /// and channel count, and publish the latency.
    ///
    /// Everything is reset, so preparing twice with the same arguments gives
    /// the same output as preparing once.
    ///
    /// A non-finite or non-positive sample rate is ignored with a warning and
    /// leaves the processor as it was.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize, channels: usize) {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            tracing::warn!(sample_rate, "ignoring prepare with an invalid sample rate");
            return;
        }
        let max_block_size = max_block_size.max(1);
        let oversampled_rate = sample_rate * self.config.oversampling.ratio() as f32;

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.channels = (0..channels)
            .map(|_| ChannelState::new(self.config, oversampled_rate, max_block_size))
            .collect();
        self.scratch = vec![vec![0.0; max_block_size]; channels];

        self.apply_params();
        self.shared.set_latency_samples(self.latency_samples());

        tracing::info!(
            sample_rate,
            oversampled_rate,
            max_block_size,
            channels,
            latency = self.latency_samples(),
            compressor = self.config.compressor.name(),
            "processor prepared"
        );
    }

    /// Clear all filter and envelope state without reallocating.
    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
    }

    /// Processing options.
    pub fn config(&self) -> ProcessorConfig {
        self.config
    }

    /// Move the compressor. Takes effect on the next sample.
    pub fn set_compressor_placement(&mut self, placement: CompressorPlacement) {
        self.config.compressor = placement;
        for channel in &mut self.channels {
            channel.chain.set_compressor_placement(placement);
        }
    }

    /// Shared state this processor reads.
    pub fn shared(&self) -> &DrekavacShared {
        &self.shared
    }

    /// Base sample rate from the last prepare.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Rate the chain runs at.
    pub fn oversampled_rate(&self) -> f32 {
        self.sample_rate * self.config.oversampling.ratio() as f32
    }

    /// Largest block processed in one piece.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Channel count from the last prepare.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Whether `prepare` has been called.
    pub fn is_prepared(&self) -> bool {
        !self.channels.is_empty()
    }

    /// Latency in base-rate samples.
    pub fn latency_samples(&self) -> usize {
        self.latency
    }

    fn apply_params(&mut self) {
        let params = self.shared.params();
        for channel in &mut self.channels {
            channel.chain.apply(&params);
        }
    }

    /// Process planar channels in place.
    ///
    /// Channels beyond the prepared count are left untouched.
    pub fn process_planar(&mut self, channels: &mut [&mut [f32]]) {
        if !self.is_prepared() {
            return;
        }
        self.apply_params();

        let max = self.max_block_size;
        for (state, buffer) in self.channels.iter_mut().zip(channels.iter_mut()) {
            for chunk in buffer.chunks_mut(max) {
                state.process(chunk);
            }
        }
    }

    /// Process an interleaved buffer in place.
    ///
    /// The frame width is the prepared channel count; a trailing partial
    /// frame is left untouched.
    pub fn process_interleaved(&mut self, buffer: &mut [f32]) {
        if !self.is_prepared() {
            return;
        }
        self.apply_params();

        let width = self.channels.len();
        let frames_per_chunk = self.max_block_size;
        let whole = buffer.len() / width * width;

        for chunk in buffer[..whole].chunks_mut(frames_per_chunk * width) {
            let frames = chunk.len() / width;
            for (frame_index, frame) in chunk.chunks_exact(width).enumerate() {
                for (scratch, &sample) in self.scratch.iter_mut().zip(frame) {
                    scratch[frame_index] = sample;
                }
            }
            for (state, scratch) in self.channels.iter_mut().zip(&mut self.scratch) {
                state.process(&mut scratch[..frames]);
            }
            for (frame_index, frame) in chunk.chunks_exact_mut(width).enumerate() {
                for (sample, scratch) in frame.iter_mut().zip(&self.scratch) {
                    *sample = scratch[frame_index];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(len: usize, step: f32, amp: f32) -> Vec<f32> {
        (0..len).map(|i| amp * (i as f32 * step).sin()).collect()
    }

    #[test]
    fn unprepared_is_a_no_op() {
        let mut processor = DrekavacProcessor::new(DrekavacShared::new(), ProcessorConfig::default());
        let mut block = vec![0.5f32; 16];
        processor.process_planar(&mut [&mut block[..]]);
        processor.process_interleaved(&mut block);
        assert!(block.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn invalid_sample_rate_is_ignored() {
        let mut processor = DrekavacProcessor::new(DrekavacShared::new(), ProcessorConfig::default());
        for rate in [0.0, -44100.0, f32::NAN, f32::INFINITY] {
            processor.prepare(rate, 64, 1);
            assert!(!processor.is_prepared(), "rate {rate}");
        }

        processor.prepare(48000.0, 64, 1);
        processor.prepare(0.0, 64, 2);
        assert!(processor.is_prepared());
        assert_eq!(processor.channels.len(), 1);
        assert_eq!(processor.oversampled_rate(), 96000.0);
    }

    #[test]
    fn tiny_sample_rate_prepares_without_panicking() {
        let mut processor = DrekavacProcessor::new(DrekavacShared::new(), ProcessorConfig::default());
        processor.prepare(1.0, 16, 1);
        let mut block = vec![0.5f32; 16];
        processor.process_planar(&mut [&mut block[..]]);
        assert!(block.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
    }

    #[test]
    fn chain_runs_at_oversampled_rate() {
        let mut processor = DrekavacProcessor::new(
            DrekavacShared::new(),
            ProcessorConfig {
                oversampling: OversamplingFactor::X4,
                ..ProcessorConfig::default()
            },
        );
        processor.prepare(44100.0, 64, 1);
        assert_eq!(processor.oversampled_rate(), 176_400.0);
        assert!(processor.latency_samples() >= 3);
    }

    #[test]
    fn interleaved_matches_planar() {
        let left = sine(1000, 0.05, 0.7);
        let right = sine(1000, 0.11, 0.3);

        let mut planar = DrekavacProcessor::new(DrekavacShared::new(), ProcessorConfig::default());
        planar.prepare(48000.0, 128, 2);
        let (mut l, mut r) = (left.clone(), right.clone());
        planar.process_planar(&mut [&mut l[..], &mut r[..]]);

        let mut interleaved =
            DrekavacProcessor::new(DrekavacShared::new(), ProcessorConfig::default());
        interleaved.prepare(48000.0, 128, 2);
        let mut buffer: Vec<f32> = left.iter().zip(&right).flat_map(|(&a, &b)| [a, b]).collect();
        interleaved.process_interleaved(&mut buffer);

        for (i, frame) in buffer.chunks_exact(2).enumerate() {
            assert!((frame[0] - l[i]).abs() < 1e-6, "left frame {i}");
            assert!((frame[1] - r[i]).abs() < 1e-6, "right frame {i}");
        }
    }

    #[test]
    fn extra_channels_untouched() {
        let mut processor = DrekavacProcessor::new(DrekavacShared::new(), ProcessorConfig::default());
        processor.prepare(48000.0, 32, 1);
        let mut a = vec![0.4f32; 32];
        let mut b = vec![0.4f32; 32];
        processor.process_planar(&mut [&mut a[..], &mut b[..]]);
        assert!(a.iter().any(|&s| s != 0.4));
        assert!(b.iter().all(|&s| s == 0.4));
    }

    #[test]
    fn placement_reaches_every_channel() {
        let mut processor = DrekavacProcessor::new(DrekavacShared::new(), ProcessorConfig::default());
        processor.prepare(48000.0, 32, 3);
        processor.set_compressor_placement(CompressorPlacement::PreChain);
        assert_eq!(processor.config().compressor, CompressorPlacement::PreChain);
        assert!(
            processor
                .channels
                .iter()
                .all(|c| c.chain.compressor_placement() == CompressorPlacement::PreChain)
        );
    }

    #[test]
    fn reads_params_each_call() {
        let shared = DrekavacShared::new();
        let mut processor = DrekavacProcessor::new(shared.clone(), ProcessorConfig::default());
        processor.prepare(48000.0, 64, 1);
        shared.set_value(0, 7.0);
        let mut block = vec![0.0f32; 64];
        processor.process_planar(&mut [&mut block[..]]);
        assert_eq!(processor.channels[0].chain.overdrive().drive(), 7.0);
    }
}

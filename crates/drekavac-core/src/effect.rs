//! Core Effect trait.
//!
//! Every stage of the chain implements [`Effect`], providing a consistent
//! interface for single-sample and block-based processing.
//!
//! ## Design Decisions
//!
//! - **Mono processing**: Single `f32` input/output. Multichannel processing
//!   uses one independent stage instance per channel.
//!
//! - **Object-safe**: `dyn Effect` works for runtime dispatch, although the
//!   chain itself uses static dispatch.
//!
//! - **No allocations**: All methods are designed to be called in real-time
//!   audio contexts with zero heap allocations.

/// Core trait for all audio effects.
///
/// # Example
///
/// ```rust
/// use drekavac_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Effect {
    /// Process a single sample.
    ///
    /// For effects with internal state (filters, envelopes), this advances
    /// the state by one sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples in place.
    ///
    /// Default implementation calls [`process`](Self::process) per sample.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate.
    ///
    /// Effects recalculate any sample-rate-dependent coefficients. Inside the
    /// chain this is always the *oversampled* rate.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state.
    ///
    /// Clears filter memory and envelopes without changing parameters.
    fn reset(&mut self);

    /// Report processing latency in samples.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gain(f32);

    impl Effect for Gain {
        fn process(&mut self, input: f32) -> f32 {
            input * self.0
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
    }

    #[test]
    fn block_inplace_matches_per_sample() {
        let mut gain = Gain(0.5);
        let mut buffer = [1.0, -2.0, 4.0];
        gain.process_block_inplace(&mut buffer);
        assert_eq!(buffer, [0.5, -1.0, 2.0]);
    }

    #[test]
    fn default_latency_is_zero() {
        assert_eq!(Gain(1.0).latency_samples(), 0);
    }

    #[test]
    fn object_safe() {
        let mut boxed: [&mut dyn Effect; 1] = [&mut Gain(2.0)];
        assert_eq!(boxed[0].process(0.25), 0.5);
    }
}

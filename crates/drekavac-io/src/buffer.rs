//! Planar multichannel sample storage.

use crate::{Error, Result};

/// Planar audio: one sample vector per channel, all the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Silent buffer with `channels` channels of `frames` samples.
    pub fn silent(channels: usize, frames: usize) -> Self {
        Self {
            channels: vec![vec![0.0; frames]; channels],
        }
    }

    /// Build from per-channel vectors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLayout`] when there are no channels or the
    /// channels differ in length.
    pub fn from_channels(channels: Vec<Vec<f32>>) -> Result<Self> {
        let Some(first) = channels.first() else {
            return Err(Error::UnsupportedLayout("no channels".to_string()));
        };
        let frames = first.len();
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.len() != frames)
        {
            return Err(Error::UnsupportedLayout(format!(
                "channel {index} has {} frames, channel 0 has {frames}",
                channel.len()
            )));
        }
        Ok(Self { channels })
    }

    /// Deinterleave `samples` into `channels` channels.
    ///
    /// A trailing partial frame is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedLayout`] for a zero channel count.
    pub fn from_interleaved(samples: &[f32], channels: usize) -> Result<Self> {
        if channels == 0 {
            return Err(Error::UnsupportedLayout("no channels".to_string()));
        }
        let frames = samples.len() / channels;
        let mut planar: Vec<Vec<f32>> = (0..channels).map(|_| Vec::with_capacity(frames)).collect();
        for frame in samples.chunks_exact(channels) {
            for (channel, &sample) in planar.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Ok(Self { channels: planar })
    }

    /// Interleave into a single vector, frame by frame.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let frames = self.num_frames();
        let mut out = Vec::with_capacity(frames * self.channels.len());
        for frame in 0..frames {
            out.extend(self.channels.iter().map(|channel| channel[frame]));
        }
        out
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.num_frames() == 0
    }

    /// One channel's samples.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// All channels.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// All channels, mutable.
    ///
    /// Lengths cannot change through this view.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.channels.iter_mut().map(Vec::as_mut_slice)
    }

    /// Mutable slices of frames `start..end` for every channel.
    ///
    /// The range is clipped to the buffer length.
    pub fn frames_mut(&mut self, start: usize, end: usize) -> Vec<&mut [f32]> {
        let end = end.min(self.num_frames());
        let start = start.min(end);
        self.channels
            .iter_mut()
            .map(|channel| &mut channel[start..end])
            .collect()
    }

    /// Peak absolute sample across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0f32, |peak, sample| peak.max(sample.abs()))
    }

    /// Consume into per-channel vectors.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave_roundtrip() {
        let interleaved = [1.0, 10.0, 100.0, 2.0, 20.0, 200.0];
        let buffer = AudioBuffer::from_interleaved(&interleaved, 3).unwrap();
        assert_eq!(buffer.num_channels(), 3);
        assert_eq!(buffer.num_frames(), 2);
        assert_eq!(buffer.channel(1), Some(&[10.0, 20.0][..]));
        assert_eq!(buffer.to_interleaved(), interleaved);
    }

    #[test]
    fn partial_frame_is_dropped() {
        let buffer = AudioBuffer::from_interleaved(&[1.0, 2.0, 3.0], 2).unwrap();
        assert_eq!(buffer.num_frames(), 1);
    }

    #[test]
    fn zero_channels_rejected() {
        assert!(AudioBuffer::from_interleaved(&[1.0], 0).is_err());
        assert!(AudioBuffer::from_channels(Vec::new()).is_err());
    }

    #[test]
    fn ragged_channels_rejected() {
        let err = AudioBuffer::from_channels(vec![vec![0.0; 4], vec![0.0; 3]]).unwrap_err();
        assert!(err.to_string().contains("channel 1 has 3 frames"));
    }

    #[test]
    fn frames_mut_clips_range() {
        let mut buffer = AudioBuffer::silent(2, 10);
        let slices = buffer.frames_mut(8, 64);
        assert_eq!(slices.len(), 2);
        assert!(slices.iter().all(|s| s.len() == 2));
        assert!(buffer.frames_mut(20, 30).iter().all(|s| s.is_empty()));
    }

    #[test]
    fn peak_spans_channels() {
        let buffer =
            AudioBuffer::from_channels(vec![vec![0.1, -0.2], vec![0.7, -0.9]]).unwrap();
        assert_eq!(buffer.peak(), 0.9);
    }
}

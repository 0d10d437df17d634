//! WAV file I/O for the drekavac command-line host.
//!
//! Audio is held planar in an [`AudioBuffer`]: one `Vec<f32>` per channel,
//! every channel the same length. Any channel count the WAV format allows is
//! kept as-is; nothing is mixed down.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use drekavac_io::{read_wav, write_wav};
//!
//! let (mut audio, spec) = read_wav("input.wav")?;
//! for channel in audio.channels_mut() {
//!     for sample in channel.iter_mut() {
//!         *sample *= 0.5;
//!     }
//! }
//! write_wav("output.wav", &audio, spec)?;
//! # Ok::<(), drekavac_io::Error>(())
//! ```

mod buffer;
mod wav;

pub use buffer::AudioBuffer;
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Channel layout the operation cannot handle.
    #[error("Unsupported channel layout: {0}")]
    UnsupportedLayout(String),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

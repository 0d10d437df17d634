//! Drekavac Effects - the stages of the distortion chain
//!
//! Built on drekavac-core:
//!
//! - [`Overdrive`] - Drive gain, tanh saturation and tone-swept one-pole smoothing
//! - [`Distortion`] - Pre-clip, four-pole cutoff low-pass, 10 kHz post filter, final clip
//! - [`Wavefolder`] - Sine folding blended with the dry signal by depth
//! - [`ToneFilter`] - Cross-faded low/high shelves with drive-coupled pivot
//! - [`Compressor`] - Fixed soft-knee dynamics
//! - [`ChannelChain`] - All of the above wired per channel at the oversampled rate
//!
//! Controls live in [`ControlParams`]; [`DESCRIPTORS`] describes them for
//! display and persistence.
//!
//! ## Example
//!
//! ```rust
//! use drekavac_effects::{ChannelChain, CompressorPlacement, ControlParams};
//!
//! let mut chain = ChannelChain::new(96000.0);
//! chain.set_compressor_placement(CompressorPlacement::PostChain);
//!
//! let mut params = ControlParams::default();
//! params.set_by_id("fold", 0.6);
//! chain.apply(&params);
//!
//! let mut block = [0.1f32; 128];
//! chain.process_block(&mut block);
//! assert!(block.iter().all(|s| s.abs() <= 1.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod chain;
pub mod compressor;
pub mod distortion;
pub mod overdrive;
pub mod params;
pub mod tone;
pub mod wavefolder;

// Re-export main types at crate root
pub use chain::{ChannelChain, CompressorPlacement, blend_branches, flavor_weight};
pub use compressor::{Compressor, CompressorSettings};
pub use distortion::Distortion;
pub use overdrive::Overdrive;
pub use params::{ControlParams, DESCRIPTORS, PARAM_COUNT, ids};
pub use tone::ToneFilter;
pub use wavefolder::Wavefolder;

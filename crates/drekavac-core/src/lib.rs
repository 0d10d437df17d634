//! Drekavac Core - DSP primitives for the drekavac distortion chain
//!
//! This crate provides the building blocks the tone stages are assembled
//! from, designed for real-time processing with zero allocation in the audio
//! path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for every processing stage
//! - [`ParameterInfo`] / [`ParamDescriptor`] - Discoverable, displayable controls
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR with RBJ low-pass and shelf designs
//! - [`OnePole`] - First-order low-pass (RC or matched-z design)
//!
//! ## Dynamics
//!
//! - [`EnvelopeFollower`] - Peak detector with attack/release ballistics
//!
//! ## Anti-Aliasing
//!
//! - [`Oversampler`] - Half-band polyphase IIR oversampling (2x or 4x)
//!
//! ## Utilities
//!
//! - Math: [`db_to_linear`], [`linear_to_db`], [`soft_clip`], [`sqrt_law_mix`], etc.
//! - [`mapping`] - Control-to-display curves (cutoff frequency, percentages, shelf gains)
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! drekavac-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in audio processing paths
//! - **No dependencies on std**: `libm` for math
//! - **Finite output**: Filter state flushes denormals

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod biquad;
pub mod effect;
pub mod envelope;
pub mod mapping;
pub mod math;
pub mod one_pole;
pub mod oversample;
pub mod param_info;

// Re-export main types at crate root
pub use biquad::{
    Biquad, Coefficients, high_shelf_coefficients, low_shelf_coefficients, lowpass_coefficients,
};
pub use effect::Effect;
pub use envelope::EnvelopeFollower;
pub use mapping::{CUTOFF_MAP, LogFrequencyMap, shelf_gains};
pub use math::{
    db_to_linear, flush_denormal, lerp, linear_to_db, sanitize, smoothstep, soft_clip,
    sqrt_law_mix,
};
pub use one_pole::{OnePole, OnePoleDesign};
pub use oversample::{Oversampler, OversamplingFactor, design_half_band};
pub use param_info::{ParamDescriptor, ParamDisplay, ParamId, ParamUnit, ParameterInfo};

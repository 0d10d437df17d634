//! Host-facing layer of the drekavac distortion.
//!
//! A host wrapper (plugin format glue, the command-line tool, tests) holds
//! two things:
//!
//! - [`DrekavacShared`]: the eight control values as atomics, the preset
//!   name, the published latency and a non-blocking [`UiEvent`] channel.
//!   Cloned freely between the control thread and the audio thread.
//! - [`DrekavacProcessor`]: owned by the audio thread. Reads the shared
//!   values once per block and runs an oversampled [`ChannelChain`] per
//!   channel.
//!
//! Session state and preset files go through [`state`].
//!
//! ```rust
//! use drekavac_plugin::{DrekavacProcessor, DrekavacShared, ProcessorConfig, state};
//!
//! let shared = DrekavacShared::new();
//! let mut processor = DrekavacProcessor::new(shared.clone(), ProcessorConfig::default());
//! processor.prepare(48000.0, 512, 2);
//!
//! // Control thread: host recall.
//! let blob = state::save_state(&shared).unwrap();
//! state::load_state(&shared, &blob).unwrap();
//!
//! // Audio thread.
//! let mut interleaved = vec![0.0f32; 1024];
//! processor.process_interleaved(&mut interleaved);
//! ```
//!
//! [`ChannelChain`]: drekavac_effects::ChannelChain

pub mod events;
pub mod processor;
pub mod shared;
pub mod state;

pub use events::{EVENT_CHANNEL_CAPACITY, EventSender, UiEvent};
pub use processor::{DrekavacProcessor, ProcessorConfig};
pub use shared::DrekavacShared;
pub use state::{StateError, load_preset_file, load_state, save_preset_file, save_state};

pub use drekavac_core::OversamplingFactor;
pub use drekavac_effects::{CompressorPlacement, ControlParams};

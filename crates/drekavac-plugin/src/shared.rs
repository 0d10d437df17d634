//! Thread-safe shared state for the drekavac processor.
//!
//! `DrekavacShared` lives for the lifetime of a plugin instance and is
//! reachable from the control thread (host automation, presets, editor) and
//! the audio thread (processing). Parameter values are stored as atomic
//! `u32` (f32 bit-cast) for lock-free access. Values are independent:
//! nothing guarantees that a block sees several values written together.

use drekavac_config::{ConfigError, DEFAULT_PRESET_NAME, Preset};
use drekavac_core::ParamDescriptor;
use drekavac_effects::{ControlParams, DESCRIPTORS, PARAM_COUNT};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::events::{self, EventSender, UiEvent};

struct DrekavacSharedData {
    /// Current parameter values as f32 bit-cast to u32 for atomic access.
    values: [AtomicU32; PARAM_COUNT],
    /// Name of the last loaded or saved preset.
    preset_name: Mutex<String>,
    /// Latency in base-rate samples, published by the processor on prepare.
    latency: AtomicU32,
    events: Option<EventSender>,
}

/// Shared state accessible from all plugin threads.
///
/// Wraps an `Arc` so it can be cloned into an editor or a host wrapper.
///
/// # Example
///
/// ```rust
/// use drekavac_plugin::{DrekavacShared, UiEvent};
///
/// let (shared, events) = DrekavacShared::with_events(16);
/// shared.edit(0, 4.0);
/// assert_eq!(shared.params().drive, 4.0);
/// assert_eq!(events.try_recv(), Ok(UiEvent::ParamsChanged));
/// ```
#[derive(Clone)]
pub struct DrekavacShared {
    inner: Arc<DrekavacSharedData>,
}

impl Default for DrekavacShared {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for DrekavacShared {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DrekavacShared")
            .field("params", &self.params())
            .field("preset_name", &self.preset_name())
            .field("latency", &self.latency_samples())
            .finish()
    }
}

impl DrekavacShared {
    /// Shared state at defaults, without a notification channel.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Shared state at defaults plus the receiving end of its notification
    /// channel.
    pub fn with_events(capacity: usize) -> (Self, crossbeam_channel::Receiver<UiEvent>) {
        let (tx, rx) = events::channel(capacity);
        (Self::build(Some(tx)), rx)
    }

    fn build(events: Option<EventSender>) -> Self {
        Self {
            inner: Arc::new(DrekavacSharedData {
                values: core::array::from_fn(|i| AtomicU32::new(DESCRIPTORS[i].default.to_bits())),
                preset_name: Mutex::new(DEFAULT_PRESET_NAME.to_string()),
                latency: AtomicU32::new(0),
                events,
            }),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    /// Get parameter descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        DESCRIPTORS.get(index)
    }

    /// All parameter descriptors.
    pub fn descriptors(&self) -> &'static [ParamDescriptor] {
        &DESCRIPTORS
    }

    /// Find parameter index by stable numeric `ParamId`.
    pub fn index_by_id(&self, id: u32) -> Option<usize> {
        DESCRIPTORS.iter().position(|d| d.id.0 == id)
    }

    /// Read the current value of a parameter (lock-free).
    pub fn get_value(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Write a parameter value (lock-free, no notification).
    ///
    /// Clamps to the descriptor range; NaN becomes the default.
    pub fn set_value(&self, index: usize, value: f32) {
        if let Some((atomic, desc)) = self.inner.values.get(index).zip(DESCRIPTORS.get(index)) {
            atomic.store(desc.clamp(value).to_bits(), Ordering::Release);
        }
    }

    /// Control-thread edit: write a value, then notify the editor.
    pub fn edit(&self, index: usize, value: f32) {
        if index < PARAM_COUNT {
            self.set_value(index, value);
            self.notify(UiEvent::ParamsChanged);
        }
    }

    /// Read all eight values at once.
    ///
    /// Each load is atomic; the set as a whole is not.
    pub fn params(&self) -> ControlParams {
        ControlParams::from_array(core::array::from_fn(|i| {
            f32::from_bits(self.inner.values[i].load(Ordering::Acquire))
        }))
    }

    /// Write all eight values.
    pub fn set_params(&self, params: &ControlParams) {
        for (index, value) in params.to_array().into_iter().enumerate() {
            self.set_value(index, value);
        }
    }

    /// Current preset name.
    pub fn preset_name(&self) -> String {
        self.inner.preset_name.lock().clone()
    }

    /// Rename the current state.
    pub fn set_preset_name(&self, name: impl Into<String>) {
        *self.inner.preset_name.lock() = name.into();
    }

    /// Latency the processor reported on its last prepare.
    pub fn latency_samples(&self) -> usize {
        self.inner.latency.load(Ordering::Acquire) as usize
    }

    /// Publish a new latency. Notifies when it changed.
    pub fn set_latency_samples(&self, samples: usize) {
        let samples = u32::try_from(samples).unwrap_or(u32::MAX);
        let previous = self.inner.latency.swap(samples, Ordering::AcqRel);
        if previous != samples {
            self.notify(UiEvent::LatencyChanged(samples as usize));
        }
    }

    /// Capture current values and name as a preset.
    pub fn snapshot(&self) -> Preset {
        Preset::from_params(self.preset_name(), &self.params())
    }

    /// Replace every value and the name from a preset.
    ///
    /// The preset is validated in full first; on error nothing changes.
    /// All values are written before the editor is notified.
    pub fn restore(&self, preset: &Preset) -> Result<(), ConfigError> {
        let params = preset.to_params()?;
        self.set_params(&params);
        self.set_preset_name(preset.name.clone());
        self.notify(UiEvent::PresetLoaded(preset.name.clone()));
        Ok(())
    }

    /// Send an event if a channel is attached. Never blocks.
    pub fn notify(&self, event: UiEvent) {
        if let Some(events) = &self.inner.events {
            events.notify(event);
        }
    }
}

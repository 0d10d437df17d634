//! One-way notifications from the control side to an editor.
//!
//! The processor never waits on a listener: events go through a bounded
//! channel with `try_send`, and a full or disconnected channel drops them.
//! An editor that misses an event repaints from [`DrekavacShared`] on the
//! next one anyway.
//!
//! [`DrekavacShared`]: crate::DrekavacShared

use crossbeam_channel::{Receiver, Sender, TrySendError};

/// Default capacity of the notification channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// One or more parameter values changed; the display is stale.
    ParamsChanged,
    /// A snapshot was restored under this preset name.
    PresetLoaded(String),
    /// Reported latency changed (base-rate samples).
    LatencyChanged(usize),
}

/// Create a bounded notification channel.
pub fn channel(capacity: usize) -> (EventSender, Receiver<UiEvent>) {
    let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
    (EventSender { tx }, rx)
}

/// Non-blocking sending half.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<UiEvent>,
}

impl EventSender {
    /// Send without blocking. Returns `false` if the event was dropped.
    pub fn notify(&self, event: UiEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::trace!(?event, "ui event channel full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

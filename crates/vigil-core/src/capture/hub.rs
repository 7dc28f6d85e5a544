use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::capture::record::EventId;

/// State holder for the most recent captured event id (internal, wrapped by
/// [`SharedCaptureHub`]).
///
/// Holds at most one id; a later capture overwrites an earlier one. There is
/// no queue and no history.
#[derive(Debug, Default)]
pub struct CaptureHub {
    last_event_id: Option<EventId>,
}

impl CaptureHub {
    pub fn new() -> Self {
        Self { last_event_id: None }
    }

    /// Record `id` as the most recent captured event. Last write wins.
    pub fn record(&mut self, id: EventId) {
        self.last_event_id = Some(id);
    }

    /// Id of the most recent capture, or `None` if nothing was captured
    /// since initialization. Pure read.
    pub fn last_event_id(&self) -> Option<&EventId> {
        self.last_event_id.as_ref()
    }

    /// Clear state back to "none". Used at context initialization only,
    /// never mid-scenario.
    pub fn reset(&mut self) {
        self.last_event_id = None;
    }
}

/// Thread-safe shared handle to a [`CaptureHub`].
///
/// Every operation is synchronous and immediate. A poisoned lock is
/// recovered rather than surfaced, so no hub operation can fail.
#[derive(Debug, Clone, Default)]
pub struct SharedCaptureHub {
    inner: Arc<Mutex<CaptureHub>>,
}

impl SharedCaptureHub {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CaptureHub::new())),
        }
    }

    /// Record `id` as the most recent captured event.
    pub fn capture(&self, id: EventId) {
        self.lock().record(id);
    }

    /// Id of the most recent capture, cloned out of the hub.
    pub fn last_event_id(&self) -> Option<EventId> {
        self.lock().last_event_id().cloned()
    }

    /// Clear the hub back to "none".
    pub fn reset(&self) {
        self.lock().reset();
    }

    fn lock(&self) -> MutexGuard<'_, CaptureHub> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

use std::collections::HashMap;

use async_trait::async_trait;

use crate::capture::fault::Fault;
use crate::capture::hub::SharedCaptureHub;
use crate::capture::policy::CapturePolicy;
use crate::capture::record::{EventId, EventRecord};
use crate::kernel::component::KernelComponent;
use crate::kernel::error::Result;

/// Capture component interface
pub trait CaptureManager: KernelComponent {
    /// Record a baseline message event. Always captured.
    fn capture_message(&self, message: &str) -> EventId;

    /// Record a fault event, subject to the capture policy. Returns the id
    /// when recorded, `None` when the policy excludes the fault kind.
    fn capture_fault(&self, fault: &Fault) -> Option<EventId>;

    /// Id of the most recent capture in this context, or `None`.
    fn last_event_id(&self) -> Option<EventId>;

    /// Clear the hub. Context initialization only.
    fn reset(&self);
}

/// Default implementation of [`CaptureManager`]
#[derive(Debug, Clone)]
pub struct DefaultCaptureManager {
    name: &'static str,
    hub: SharedCaptureHub,
    policy: CapturePolicy,
}

impl DefaultCaptureManager {
    /// Create a capture manager with a fresh hub and the given policy.
    pub fn new(policy: CapturePolicy) -> Self {
        Self {
            name: "CaptureManager",
            hub: SharedCaptureHub::new(),
            policy,
        }
    }

    /// Shared handle to this context's hub.
    pub fn hub(&self) -> &SharedCaptureHub {
        &self.hub
    }

    pub fn policy(&self) -> CapturePolicy {
        self.policy
    }

    fn record(&self, record: EventRecord) -> EventId {
        let id = record.id().clone();
        // Delivery of records is out of scope; the hub keeps the id, the
        // record itself goes to the log.
        log::debug!("captured event {}: {:?}", id, record.metadata());
        self.hub.capture(id.clone());
        id
    }
}

impl CaptureManager for DefaultCaptureManager {
    fn capture_message(&self, message: &str) -> EventId {
        let mut metadata = HashMap::new();
        metadata.insert("kind".to_string(), "message".to_string());
        metadata.insert("message".to_string(), message.to_string());
        self.record(EventRecord::new(metadata))
    }

    fn capture_fault(&self, fault: &Fault) -> Option<EventId> {
        if !self.policy.should_capture(fault.kind()) {
            log::debug!("capture policy excludes {} fault: {}", fault.kind(), fault);
            return None;
        }
        let mut metadata = HashMap::new();
        metadata.insert("kind".to_string(), fault.kind().as_str().to_string());
        metadata.insert("message".to_string(), fault.message().to_string());
        Some(self.record(EventRecord::new(metadata)))
    }

    fn last_event_id(&self) -> Option<EventId> {
        self.hub.last_event_id()
    }

    fn reset(&self) {
        self.hub.reset();
    }
}

#[async_trait]
impl KernelComponent for DefaultCaptureManager {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> Result<()> {
        // A boot is a fresh execution context; nothing captured earlier may
        // be observable in it.
        self.hub.reset();
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}

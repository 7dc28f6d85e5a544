//! # Vigil Capture System
//!
//! Tracks "was an event captured in this execution context, and what was its
//! id". The [`CaptureHub`](hub::CaptureHub) holds the id of the most recent
//! capture (a pointer, not a log); the
//! [`DefaultCaptureManager`](manager::DefaultCaptureManager) component builds
//! [`EventRecord`](record::EventRecord)s, applies the
//! [`CapturePolicy`](policy::CapturePolicy), and feeds ids into the hub.
//!
//! One hub exists per execution context. Booting an application resets its
//! hub, so no captured id ever leaks from one context into another.
pub mod fault;
pub mod hub;
pub mod manager;
pub mod policy;
pub mod record;

pub use fault::{Fault, FaultKind};
pub use hub::{CaptureHub, SharedCaptureHub};
pub use manager::{CaptureManager, DefaultCaptureManager};
pub use policy::CapturePolicy;
pub use record::{EventId, EventRecord};

// Test module declaration
#[cfg(test)]
mod tests;

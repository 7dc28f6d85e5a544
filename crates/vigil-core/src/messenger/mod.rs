//! # Vigil Messenger
//!
//! A minimal in-process message bus: messages are dispatched onto named
//! receiver queues and later drained by an explicit, bounded consumption
//! cycle. A job handler failure is a *soft fail*: it is reported to the
//! capture layer (subject to the capture policy) and never aborts the cycle.
pub mod error;
pub mod manager;
pub mod queue;

use std::any::Any;
use std::fmt;

use async_trait::async_trait;

use crate::capture::Fault;

/// An asynchronous job routed to a named receiver.
pub trait Message: Any + fmt::Debug + Send + Sync {
    /// Name used to match the message to its handler
    fn name(&self) -> &'static str;

    /// Cast to Any for downcasting in handlers
    fn as_any(&self) -> &dyn Any;
}

/// Type alias for boxed message
pub type BoxedMessage = Box<dyn Message>;

/// Asynchronous message handler trait
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Process one message. A failure is surfaced as a soft-fail fault.
    async fn handle(&self, message: &dyn Message) -> std::result::Result<(), Fault>;
}

/// Re-export important types
pub use manager::{ConsumeOptions, ConsumeReport, DefaultMessengerManager, MessengerManager};
pub use queue::{MessageQueue, SharedMessageQueue};

// Test module declaration
#[cfg(test)]
mod tests;

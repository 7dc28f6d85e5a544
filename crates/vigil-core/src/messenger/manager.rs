use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::capture::manager::CaptureManager;
use crate::capture::DefaultCaptureManager;
use crate::kernel::component::KernelComponent;
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::messenger::error::MessengerSystemError;
use crate::messenger::queue::SharedMessageQueue;
use crate::messenger::{BoxedMessage, MessageHandler};

/// Bounds for one consumption cycle.
#[derive(Debug, Clone, Copy)]
pub struct ConsumeOptions {
    /// Maximum number of messages to process.
    pub limit: usize,
    /// Upper bound on the cycle's duration. An empty queue ends the cycle
    /// early; the limit never extends it.
    pub time_limit: Duration,
}

/// What one consumption cycle did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumeReport {
    /// Messages taken off the queue.
    pub processed: usize,
    /// Of those, how many handlers failed softly.
    pub failed: usize,
}

/// Messenger component interface
#[async_trait]
pub trait MessengerManager: KernelComponent {
    /// Add a named receiver queue. Adding an existing name is a no-op.
    async fn add_receiver(&self, name: &str);

    /// Queue a message on `receiver`.
    async fn dispatch(&self, receiver: &str, message: BoxedMessage) -> Result<()>;

    /// Register the handler for messages named `message_name`.
    async fn register_handler(&self, message_name: &'static str, handler: Arc<dyn MessageHandler>);

    /// Pending message count on `receiver`.
    async fn pending(&self, receiver: &str) -> Result<usize>;

    /// Run one bounded consumption cycle against `receiver`.
    async fn consume(&self, receiver: &str, options: ConsumeOptions) -> Result<ConsumeReport>;
}

/// Default implementation of [`MessengerManager`]
#[derive(Clone)]
pub struct DefaultMessengerManager {
    name: &'static str,
    queues: Arc<Mutex<HashMap<String, SharedMessageQueue>>>,
    handlers: Arc<Mutex<HashMap<&'static str, Arc<dyn MessageHandler>>>>,
    capture: Arc<DefaultCaptureManager>,
}

impl fmt::Debug for DefaultMessengerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultMessengerManager")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl DefaultMessengerManager {
    /// Create a manager with the stock receiver.
    pub fn new(capture: Arc<DefaultCaptureManager>) -> Self {
        Self::with_receivers(capture, &[constants::DEFAULT_RECEIVER.to_string()])
    }

    /// Create a manager with the given receiver queues.
    pub fn with_receivers(capture: Arc<DefaultCaptureManager>, receivers: &[String]) -> Self {
        let queues = receivers
            .iter()
            .map(|name| (name.clone(), SharedMessageQueue::new()))
            .collect();
        Self {
            name: "MessengerManager",
            queues: Arc::new(Mutex::new(queues)),
            handlers: Arc::new(Mutex::new(HashMap::new())),
            capture,
        }
    }

    async fn queue(
        &self,
        receiver: &str,
    ) -> std::result::Result<SharedMessageQueue, MessengerSystemError> {
        self.queues
            .lock()
            .await
            .get(receiver)
            .cloned()
            .ok_or_else(|| MessengerSystemError::UnknownReceiver {
                name: receiver.to_string(),
            })
    }

    async fn handler_for(&self, message_name: &str) -> Option<Arc<dyn MessageHandler>> {
        self.handlers.lock().await.get(message_name).cloned()
    }
}

#[async_trait]
impl MessengerManager for DefaultMessengerManager {
    async fn add_receiver(&self, name: &str) {
        self.queues
            .lock()
            .await
            .entry(name.to_string())
            .or_default();
    }

    async fn dispatch(&self, receiver: &str, message: BoxedMessage) -> Result<()> {
        let queue = self.queue(receiver).await?;
        log::debug!("dispatching '{}' to receiver '{}'", message.name(), receiver);
        queue.push(message).await;
        Ok(())
    }

    async fn register_handler(&self, message_name: &'static str, handler: Arc<dyn MessageHandler>) {
        self.handlers.lock().await.insert(message_name, handler);
    }

    async fn pending(&self, receiver: &str) -> Result<usize> {
        Ok(self.queue(receiver).await?.len().await)
    }

    async fn consume(&self, receiver: &str, options: ConsumeOptions) -> Result<ConsumeReport> {
        let queue = self.queue(receiver).await?;
        let deadline = Instant::now() + options.time_limit;
        let mut report = ConsumeReport::default();

        while report.processed < options.limit && Instant::now() < deadline {
            let Some(message) = queue.pop().await else {
                // Drained; the time limit only bounds a cycle, it is not a
                // wait target.
                break;
            };

            let handler = self.handler_for(message.name()).await.ok_or_else(|| {
                MessengerSystemError::MissingHandler {
                    message_name: message.name().to_string(),
                }
            })?;

            if let Err(fault) = handler.handle(message.as_ref()).await {
                report.failed += 1;
                match self.capture.capture_fault(&fault) {
                    Some(id) => log::warn!(
                        "job '{}' failed, captured as {}: {}",
                        message.name(),
                        id,
                        fault
                    ),
                    None => log::warn!(
                        "job '{}' failed (capture excluded by policy): {}",
                        message.name(),
                        fault
                    ),
                }
            }
            report.processed += 1;
        }

        log::info!(
            "consumed {} message(s) from '{}' ({} soft failure(s))",
            report.processed,
            receiver,
            report.failed
        );
        Ok(report)
    }
}

#[async_trait]
impl KernelComponent for DefaultMessengerManager {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        // Pending messages stay queued; consumption is always an explicit,
        // bounded cycle.
        Ok(())
    }
}

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::messenger::BoxedMessage;

/// FIFO queue of pending messages for one receiver (internal, wrapped by
/// [`SharedMessageQueue`])
#[derive(Default)]
pub struct MessageQueue {
    messages: VecDeque<BoxedMessage>,
}

impl fmt::Debug for MessageQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageQueue")
            .field("pending", &self.messages.len())
            .finish()
    }
}

impl MessageQueue {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::new(),
        }
    }

    pub fn push(&mut self, message: BoxedMessage) {
        self.messages.push_back(message);
    }

    pub fn pop(&mut self) -> Option<BoxedMessage> {
        self.messages.pop_front()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Thread-safe shared queue handle
#[derive(Debug, Clone, Default)]
pub struct SharedMessageQueue {
    inner: Arc<Mutex<MessageQueue>>,
}

impl SharedMessageQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MessageQueue::new())),
        }
    }

    pub async fn push(&self, message: BoxedMessage) {
        self.inner.lock().await.push(message);
    }

    pub async fn pop(&self) -> Option<BoxedMessage> {
        self.inner.lock().await.pop()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }
}

use std::any::Any;

use tokio::test;

use crate::messenger::queue::{MessageQueue, SharedMessageQueue};
use crate::messenger::Message;

#[derive(Debug, Clone)]
struct TestMessage {
    payload: String,
}

impl TestMessage {
    fn new(payload: &str) -> Self {
        Self {
            payload: payload.to_string(),
        }
    }
}

impl Message for TestMessage {
    fn name(&self) -> &'static str {
        "test.message"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
async fn test_queue_is_fifo() {
    let mut queue = MessageQueue::new();
    queue.push(Box::new(TestMessage::new("first")));
    queue.push(Box::new(TestMessage::new("second")));

    let first = queue.pop().unwrap();
    let message = first.as_any().downcast_ref::<TestMessage>().unwrap();
    assert_eq!(message.payload, "first");

    let second = queue.pop().unwrap();
    let message = second.as_any().downcast_ref::<TestMessage>().unwrap();
    assert_eq!(message.payload, "second");

    assert!(queue.pop().is_none());
}

#[test]
async fn test_queue_len_tracks_pending() {
    let mut queue = MessageQueue::new();
    assert!(queue.is_empty());

    queue.push(Box::new(TestMessage::new("a")));
    queue.push(Box::new(TestMessage::new("b")));
    assert_eq!(queue.len(), 2);

    queue.pop();
    assert_eq!(queue.len(), 1);
    assert!(!queue.is_empty());
}

#[test]
async fn test_shared_queue_handles_observe_same_state() {
    let queue = SharedMessageQueue::new();
    let handle = queue.clone();

    queue.push(Box::new(TestMessage::new("shared"))).await;

    assert_eq!(handle.len().await, 1);
    assert!(handle.pop().await.is_some());
    assert!(queue.is_empty().await);
}

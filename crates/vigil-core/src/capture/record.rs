use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier of a captured event.
///
/// Generated at capture time; once assigned to a record it never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One captured occurrence.
///
/// Immutable after construction. The hub keeps only the id; the record
/// itself lives no longer than the capture call that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    id: EventId,
    timestamp: SystemTime,
    metadata: HashMap<String, String>,
}

impl EventRecord {
    /// Create a record with a fresh id and the current time.
    pub fn new(metadata: HashMap<String, String>) -> Self {
        Self {
            id: EventId::generate(),
            timestamp: SystemTime::now(),
            metadata,
        }
    }

    pub fn id(&self) -> &EventId {
        &self.id
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn metadata(&self) -> &HashMap<String, String> {
        &self.metadata
    }

    /// Single metadata value lookup
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|value| value.as_str())
    }
}

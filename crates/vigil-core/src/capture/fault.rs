use std::fmt;

use thiserror::Error;

/// Classification of a fault observed by the capture layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// No route matched the request.
    NotFound,
    /// An application error escaped its handler.
    Unhandled,
    /// A job handler failed in a way the capture policy may ignore.
    SoftFail,
}

impl FaultKind {
    /// HTTP status code this fault maps to when converted into a response.
    pub fn status_code(&self) -> u16 {
        match self {
            FaultKind::NotFound => 404,
            FaultKind::Unhandled | FaultKind::SoftFail => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::NotFound => "not-found",
            FaultKind::Unhandled => "unhandled-error",
            FaultKind::SoftFail => "soft-fail",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fault with a kind and a human-readable message.
///
/// `Display` is the original message, unchanged. Callers rely on the text
/// surviving verbatim whether the fault is converted into a response body or
/// returned as a raised error.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct Fault {
    kind: FaultKind,
    message: String,
}

impl Fault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Fault for a request that matched no registered route.
    pub fn not_found(method: impl fmt::Display, path: &str) -> Self {
        Self::new(
            FaultKind::NotFound,
            format!("No route found for \"{} {}\"", method, path),
        )
    }

    /// Fault for an error that escaped application code.
    pub fn unhandled(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Unhandled, message)
    }

    /// Fault for a job failure the capture policy may exclude.
    pub fn soft_fail(message: impl Into<String>) -> Self {
        Self::new(FaultKind::SoftFail, message)
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

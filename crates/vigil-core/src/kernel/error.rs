//! # Vigil Kernel Errors
//!
//! Defines error types specific to the Vigil kernel.
//!
//! This module includes [`Error`], the primary enum encompassing various
//! errors that can occur during kernel operations, such as application
//! bootstrapping failures or component lifecycle issues. Subsystem errors
//! convert into it via `From`.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigSystemError;
use crate::console::error::ConsoleSystemError;
use crate::messenger::error::MessengerSystemError;
use crate::router::error::RouterSystemError;

/// Top-level error type for the Vigil framework
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed router system error
    #[error("Router system error: {0}")]
    RouterSystem(#[from] RouterSystemError),

    /// Specific, typed messenger system error
    #[error("Messenger system error: {0}")]
    MessengerSystem(#[from] MessengerSystemError),

    /// Specific, typed console system error
    #[error("Console system error: {0}")]
    ConsoleSystem(#[from] ConsoleSystemError),

    /// Specific, typed configuration system error
    #[error("Config system error: {0}")]
    ConfigSystem(#[from] ConfigSystemError),

    /// Error occurring during a specific kernel lifecycle phase.
    #[error("Kernel lifecycle error during {phase:?}: {message}")]
    KernelLifecycleError {
        phase: KernelLifecyclePhase,
        component_name: Option<String>,
        message: String,
        #[source]
        source: Option<Box<Error>>, // Can wrap another kernel or subsystem error
    },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase in the kernel's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelLifecyclePhase {
    Boot,
    Initialize,
    Start,
    Shutdown,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

pub mod commands;
pub mod error;
pub mod runner;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::console::error::ConsoleSystemError;

/// Arguments passed to a console command: positional values plus named
/// options and flags.
#[derive(Debug, Clone, Default)]
pub struct CommandArgs {
    arguments: Vec<String>,
    options: HashMap<String, String>,
}

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument, builder style.
    pub fn with_argument(mut self, value: &str) -> Self {
        self.arguments.push(value.to_string());
        self
    }

    /// Set a named option, builder style.
    pub fn with_option(mut self, name: &str, value: &str) -> Self {
        self.options.insert(name.to_string(), value.to_string());
        self
    }

    /// Set a valueless flag, builder style.
    pub fn with_flag(self, name: &str) -> Self {
        self.with_option(name, "")
    }

    pub fn argument(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(|value| value.as_str())
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(|value| value.as_str())
    }

    /// Whether a flag (or option) named `name` is present.
    pub fn flag(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Parse an option value into `T`. Absence is `Ok(None)`; a present but
    /// malformed value is an error naming the option.
    pub fn option_parsed<T>(&self, name: &str) -> Result<Option<T>, ConsoleSystemError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.options.get(name) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<T>()
                .map(Some)
                .map_err(|e| ConsoleSystemError::InvalidOption {
                    option: name.to_string(),
                    reason: e.to_string(),
                }),
        }
    }
}

/// One console command
#[async_trait]
pub trait ConsoleCommand: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run the command. The returned value is the exit status: 0 for
    /// success, non-zero for failure.
    async fn execute(&self, args: &CommandArgs) -> Result<i32, ConsoleSystemError>;
}

/// Re-export important types
pub use commands::ConsumeMessagesCommand;
pub use runner::{ConsoleRunner, DefaultConsoleRunner};

// Test module declaration
#[cfg(test)]
mod tests;

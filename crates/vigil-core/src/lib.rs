pub mod capture;
pub mod config;
pub mod console;
pub mod kernel;
pub mod messenger;
pub mod router;

// Re-export key public types/traits for easier use by the binary and
// embedding applications.
pub use kernel::Application;
pub use kernel::error::Error as KernelError;
pub use capture::{CaptureManager, DefaultCaptureManager, EventId, EventRecord, Fault, FaultKind};
pub use config::AppConfig;
pub use console::{ConsoleCommand, ConsoleRunner, DefaultConsoleRunner};
pub use messenger::{DefaultMessengerManager, Message, MessageHandler, MessengerManager};
pub use router::{DefaultRouterManager, KernelClient, Method, Request, Response, RouterManager};

// Cross-module integration tests live under src/tests/.
#[cfg(test)]
mod tests;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessengerSystemError {
    #[error("Unknown receiver '{name}'")]
    UnknownReceiver { name: String },

    #[error("No handler registered for message '{message_name}'")]
    MissingHandler { message_name: String },
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleSystemError {
    #[error("Unknown console command '{name}'")]
    UnknownCommand { name: String },

    #[error("Invalid value for option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },
}

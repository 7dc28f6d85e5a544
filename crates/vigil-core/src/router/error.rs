use thiserror::Error;

use crate::router::Method;

#[derive(Debug, Error)]
pub enum RouterSystemError {
    #[error("Route already registered for \"{method} {path}\"")]
    DuplicateRoute { method: Method, path: String },

    #[error("Unknown request method '{value}'")]
    UnknownMethod { value: String },
}

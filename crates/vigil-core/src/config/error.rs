use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigSystemError {
    #[error("I/O error reading config '{}': {source}", path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Unknown or unsupported config format for path: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to parse {format} config: {source}")]
    Parse {
        format: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

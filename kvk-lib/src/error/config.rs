//! Configuration error types

use std::path::PathBuf;

/// Errors that can occur while loading configuration or route tables.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not valid for the expected shape.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

//! Storage errors
//!
//! These never reach the user: the store logs and swallows them.

use std::path::PathBuf;

/// Durable storage failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error on the settings file
    #[error("io error on {path}: {source}")]
    Io {
        /// Settings file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Record could not be encoded
    #[error("could not encode settings: {0}")]
    Encode(#[from] serde_json::Error),

    /// Storage is switched off or refuses writes
    #[error("settings storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StorageError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "settings storage unavailable: quota exceeded");
    }
}

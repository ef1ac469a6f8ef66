//! Error types for the reader core
//!
//! [`ReaderError`] collects the structural failures of every component.
//! Rejected edits (removing the last field, a value outside the domain, ...)
//! are not errors; the stores report them as `false`.

use std::path::PathBuf;
use vw_layers::CatalogError;
use vw_search::DomainError;
use vw_settings::StorageError;

/// Main reader error type
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// Layer catalog is malformed or inconsistent
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Attribute domain could not be fetched
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Settings storage failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// External source failed
    #[error("fetch of {resource} failed: {message}")]
    Fetch {
        /// What was being fetched (`layer catalog`)
        resource: String,
        /// Underlying failure
        message: String,
    },
}

impl ReaderError {
    /// Create fetch failure for a resource
    pub fn fetch(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Whether retrying later could succeed
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Domain(DomainError::FetchFailed { .. }))
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error on {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// TOML was invalid
    #[error("invalid toml: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid value for {key}: {message}")]
    Invalid {
        /// Offending config key
        key: String,
        /// Allowed range
        message: String,
    },
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create out-of-range error for a key
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ReaderError::fetch("layer catalog", "503 Service Unavailable");
        assert_eq!(
            err.to_string(),
            "fetch of layer catalog failed: 503 Service Unavailable"
        );
        assert!(err.is_transient());

        let err: ReaderError = ConfigError::invalid("max_fields_per_block", "must be at least 1").into();
        assert_eq!(
            err.to_string(),
            "configuration error: invalid value for max_fields_per_block: must be at least 1"
        );
        assert!(!err.is_transient());
    }
}

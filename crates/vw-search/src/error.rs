//! Error types for attribute domain fetching

/// Errors while fetching an attribute's value domain
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// The source does not know the attribute
    #[error("unknown attribute: '{0}'")]
    UnknownAttribute(String),

    /// Transport or server failure
    #[error("domain fetch failed for '{attribute}': {message}")]
    FetchFailed {
        /// Attribute whose domain was requested
        attribute: String,
        /// Transport or server message
        message: String,
    },

    /// Response could not be decoded
    #[error("malformed domain response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl DomainError {
    /// Create fetch failure for an attribute
    pub fn fetch_failed(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailed {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

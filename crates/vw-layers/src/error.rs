//! Error types for catalog loading

use vw_model::LayerId;

/// Errors while building a [`LayerCatalog`](crate::LayerCatalog)
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog payload is not valid JSON of the expected shape
    #[error("malformed layer catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A layer has an empty id
    #[error("layer at position {0} has an empty id")]
    EmptyId(usize),

    /// The same id appears twice
    #[error("duplicate layer id: '{0}'")]
    DuplicateId(LayerId),

    /// A member id has no category prefix
    #[error("member layer '{0}' does not belong to any category")]
    OrphanMember(LayerId),

    /// A member id matches more than one category prefix
    #[error("member layer '{member}' matches several categories: {categories:?}")]
    AmbiguousMember {
        /// The member id
        member: LayerId,
        /// Every category whose prefix it matches
        categories: Vec<LayerId>,
    },
}

impl CatalogError {
    /// Create ambiguous member error
    pub fn ambiguous(member: LayerId, categories: Vec<LayerId>) -> Self {
        Self::AmbiguousMember { member, categories }
    }
}

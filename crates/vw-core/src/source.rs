//! Layer catalog sources

use crate::error::ReaderError;
use async_trait::async_trait;
use std::path::PathBuf;
use vw_layers::LayerCatalog;

/// Read endpoint for the layer metadata list
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch and validate the catalog
    ///
    /// # Errors
    /// `ReaderError::Fetch` on transport failure, `ReaderError::Catalog` for
    /// a malformed or inconsistent list.
    async fn fetch_catalog(&self) -> Result<LayerCatalog, ReaderError>;
}

/// Catalog JSON held in memory or read from a file on every fetch
#[derive(Debug, Clone)]
pub enum JsonCatalogSource {
    /// Inline JSON
    Inline(String),
    /// JSON file
    File(PathBuf),
}

impl JsonCatalogSource {
    /// Source serving a JSON string
    #[inline]
    #[must_use]
    pub fn inline(json: impl Into<String>) -> Self {
        Self::Inline(json.into())
    }

    /// Source reading a JSON file
    #[inline]
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }
}

#[async_trait]
impl CatalogSource for JsonCatalogSource {
    async fn fetch_catalog(&self) -> Result<LayerCatalog, ReaderError> {
        match self {
            Self::Inline(json) => Ok(LayerCatalog::from_json(json)?),
            Self::File(path) => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| ReaderError::fetch(path.display().to_string(), e.to_string()))?;
                Ok(LayerCatalog::from_json(&json)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn inline_source_parses() {
        let source = JsonCatalogSource::inline(
            r#"[{"id": "version_", "label": "V", "show": true}, {"id": "version_en", "label": "E"}]"#,
        );
        let catalog = source.fetch_catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonCatalogSource::file(dir.path().join("uidata.json"));
        assert!(matches!(
            source.fetch_catalog().await,
            Err(ReaderError::Fetch { .. })
        ));
    }

    #[tokio::test]
    async fn orphan_member_is_a_catalog_error() {
        let source = JsonCatalogSource::inline(r#"[{"id": "version_en", "label": "E"}]"#);
        assert!(matches!(
            source.fetch_catalog().await,
            Err(ReaderError::Catalog(_))
        ));
    }
}

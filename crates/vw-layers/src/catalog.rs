//! Layer catalog
//!
//! Immutable, ordered description of every content layer. Built once from the
//! layer metadata list and shared by reference afterwards.

use crate::error::CatalogError;
use serde::Deserialize;
use std::collections::HashMap;
use vw_model::{LayerDescriptor, LayerId};

/// Accepted wire shapes: a bare list or the UI data envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogWire {
    List(Vec<LayerDescriptor>),
    Envelope { layers: Vec<LayerDescriptor> },
}

/// Validated, ordered layer catalog
///
/// Invariants:
/// - ids are unique and non-empty
/// - every member id is prefixed by exactly one category id
#[derive(Debug, Clone, Default)]
pub struct LayerCatalog {
    layers: Vec<LayerDescriptor>,
    /// id -> declared position
    positions: HashMap<LayerId, usize>,
    /// member id -> owning category id
    parents: HashMap<LayerId, LayerId>,
}

impl LayerCatalog {
    /// Catalog with no layers
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and index a layer list
    ///
    /// # Errors
    /// - `CatalogError::EmptyId` for a blank id
    /// - `CatalogError::DuplicateId` when an id repeats
    /// - `CatalogError::OrphanMember` / `CatalogError::AmbiguousMember` when a
    ///   member does not map to exactly one category
    pub fn new(layers: Vec<LayerDescriptor>) -> Result<Self, CatalogError> {
        let mut positions = HashMap::with_capacity(layers.len());
        for (pos, layer) in layers.iter().enumerate() {
            if layer.id.as_str().is_empty() {
                return Err(CatalogError::EmptyId(pos));
            }
            if positions.insert(layer.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(layer.id.clone()));
            }
        }

        let categories: Vec<&LayerId> = layers
            .iter()
            .map(|l| &l.id)
            .filter(|id| id.is_category())
            .collect();

        let mut parents = HashMap::new();
        for layer in layers.iter().filter(|l| !l.id.is_category()) {
            let owners: Vec<&LayerId> = categories
                .iter()
                .copied()
                .filter(|c| layer.id.is_member_of(c))
                .collect();
            match owners.as_slice() {
                [] => return Err(CatalogError::OrphanMember(layer.id.clone())),
                [owner] => {
                    parents.insert(layer.id.clone(), (*owner).clone());
                }
                _ => {
                    return Err(CatalogError::ambiguous(
                        layer.id.clone(),
                        owners.into_iter().cloned().collect(),
                    ))
                }
            }
        }

        tracing::debug!(
            "Layer catalog: {} layers, {} categories",
            layers.len(),
            categories.len()
        );

        Ok(Self {
            layers,
            positions,
            parents,
        })
    }

    /// Parse from JSON (`[...]` or `{ "layers": [...] }`)
    ///
    /// # Errors
    /// `CatalogError::Malformed` for unparseable input, otherwise as [`LayerCatalog::new`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let layers = match serde_json::from_str::<CatalogWire>(json)? {
            CatalogWire::List(layers) | CatalogWire::Envelope { layers } => layers,
        };
        Self::new(layers)
    }

    /// All layers in declared order
    #[inline]
    #[must_use]
    pub fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    /// Look up a layer
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LayerDescriptor> {
        self.positions.get(id).map(|&pos| &self.layers[pos])
    }

    /// Whether the catalog declares this id
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Declared position of a layer
    #[inline]
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Category layers in declared order
    pub fn categories(&self) -> impl Iterator<Item = &LayerDescriptor> {
        self.layers.iter().filter(|l| l.id.is_category())
    }

    /// Members of a category in declared order
    pub fn members_of<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a LayerDescriptor> + 'a {
        self.layers
            .iter()
            .filter(move |l| self.parents.get(&l.id).is_some_and(|p| p.as_str() == category))
    }

    /// Whether a category has at least one member
    #[must_use]
    pub fn has_members(&self, category: &str) -> bool {
        self.members_of(category).next().is_some()
    }

    /// Owning category of a member
    #[inline]
    #[must_use]
    pub fn category_of(&self, id: &str) -> Option<&LayerId> {
        self.parents.get(id)
    }

    /// Number of layers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the catalog has no layers
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(id: &str, show: bool) -> LayerDescriptor {
        LayerDescriptor::new(id, id, show)
    }

    #[test]
    fn members_map_to_their_category() {
        let catalog = LayerCatalog::new(vec![
            layer("version_", true),
            layer("version_en", true),
            layer("translation_", false),
            layer("translation_de", false),
            layer("version_deva", false),
        ])
        .unwrap();

        let members: Vec<&str> = catalog.members_of("version_").map(|l| l.id.as_str()).collect();
        assert_eq!(members, vec!["version_en", "version_deva"]);
        assert_eq!(catalog.category_of("translation_de").unwrap().as_str(), "translation_");
        assert!(catalog.category_of("version_").is_none());
        assert_eq!(catalog.position("translation_"), Some(2));
    }

    #[test]
    fn category_only_layers_are_allowed() {
        let catalog = LayerCatalog::new(vec![layer("glossing_", true)]).unwrap();
        assert!(!catalog.has_members("glossing_"));
        assert_eq!(catalog.categories().count(), 1);
    }

    #[test]
    fn rejects_duplicates() {
        let err = LayerCatalog::new(vec![layer("version_", true), layer("version_", false)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id.as_str() == "version_"));
    }

    #[test]
    fn rejects_orphans() {
        let err = LayerCatalog::new(vec![layer("version_", true), layer("glossing", true)])
            .unwrap_err();
        assert!(matches!(err, CatalogError::OrphanMember(_)));
    }

    #[test]
    fn rejects_ambiguous_members() {
        let err = LayerCatalog::new(vec![
            layer("version_", true),
            layer("version_en_", true),
            layer("version_en_old", true),
        ])
        .unwrap_err();
        assert!(matches!(err, CatalogError::AmbiguousMember { .. }));
    }

    #[test]
    fn rejects_empty_id() {
        let err = LayerCatalog::new(vec![layer("", true)]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyId(0)));
    }

    #[test]
    fn parses_both_wire_shapes() {
        let list = r#"[{"id":"version_","label":"Versions","show":true}]"#;
        let envelope = r#"{"layers":[{"id":"version_","label":"Versions","show":true}],"meta":{}}"#;
        assert_eq!(LayerCatalog::from_json(list).unwrap().len(), 1);
        assert_eq!(LayerCatalog::from_json(envelope).unwrap().len(), 1);
        assert!(matches!(
            LayerCatalog::from_json("{not json"),
            Err(CatalogError::Malformed(_))
        ));
    }
}

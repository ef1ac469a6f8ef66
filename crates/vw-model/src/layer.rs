//! Layer descriptors
//!
//! One [`LayerDescriptor`] per entry of the layer metadata list. The wire form
//! is `{ "id": "...", "label": "...", "show": bool }`; the kind is derived from
//! the id.

use crate::ids::LayerId;
use serde::{Deserialize, Serialize};

/// Whether a layer groups other layers or is a concrete selectable slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Grouping layer (`version_`)
    Category,
    /// Concrete layer inside a category (`version_en`)
    Member,
}

/// Catalog entry for a single layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    /// Layer id
    pub id: LayerId,
    /// Human readable label
    pub label: String,
    /// Default visibility
    #[serde(rename = "show", default)]
    pub default_shown: bool,
}

impl LayerDescriptor {
    /// Create new descriptor
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<LayerId>, label: impl Into<String>, default_shown: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            default_shown,
        }
    }

    /// Layer kind derived from the id suffix
    #[inline]
    #[must_use]
    pub fn kind(&self) -> LayerKind {
        if self.id.is_category() {
            LayerKind::Category
        } else {
            LayerKind::Member
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_suffix() {
        assert_eq!(
            LayerDescriptor::new("version_", "Versions", true).kind(),
            LayerKind::Category
        );
        assert_eq!(
            LayerDescriptor::new("version_en", "English", true).kind(),
            LayerKind::Member
        );
    }

    #[test]
    fn wire_form_uses_show() {
        let d: LayerDescriptor =
            serde_json::from_str(r#"{"id":"glossing_","label":"Glossing","show":false}"#).unwrap();
        assert_eq!(d.id.as_str(), "glossing_");
        assert!(!d.default_shown);

        let missing_show: LayerDescriptor =
            serde_json::from_str(r#"{"id":"glossing_","label":"Glossing"}"#).unwrap();
        assert!(!missing_show.default_shown);
    }
}

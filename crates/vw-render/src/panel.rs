//! Toggle panel, export list and title

use serde::Serialize;
use vw_layers::{LayerCatalog, VisibilityStore};
use vw_model::{Document, LayerId, LayerKind};

/// Title used when no stanza is loaded
pub const FALLBACK_TITLE: &str = "Rigveda online";

/// One checkbox of the "toggle content" panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSwitch {
    /// Layer id
    pub id: LayerId,
    /// Catalog label
    pub label: String,
    /// Category or member
    pub kind: LayerKind,
    /// The layer's own flag
    pub checked: bool,
    /// Member with no version in the current document
    pub disabled: bool,
}

/// A layer handed to the export collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportLayer {
    /// Layer id
    pub id: LayerId,
    /// Catalog label
    pub label: String,
}

/// Panel model, one entry per catalog layer in declared order
#[must_use]
pub fn layer_switches(
    catalog: &LayerCatalog,
    visibility: &VisibilityStore,
    document: &Document,
) -> Vec<LayerSwitch> {
    catalog
        .layers()
        .iter()
        .map(|layer| {
            let kind = layer.kind();
            LayerSwitch {
                id: layer.id.clone(),
                label: layer.label.clone(),
                kind,
                checked: visibility.is_visible(layer.id.as_str()),
                disabled: kind == LayerKind::Member && !document.has_version(layer.id.as_str()),
            }
        })
        .collect()
}

/// Resolved-visible member layers, in catalog order
#[must_use]
pub fn export_layers(catalog: &LayerCatalog, visibility: &VisibilityStore) -> Vec<ExportLayer> {
    catalog
        .layers()
        .iter()
        .filter(|l| l.kind() == LayerKind::Member)
        .filter(|l| visibility.resolved_visibility(l.id.as_str()))
        .map(|l| ExportLayer {
            id: l.id.clone(),
            label: l.label.clone(),
        })
        .collect()
}

/// `Stanza <book>.<hymn>.<stanza> | <hymn group>`, or [`FALLBACK_TITLE`]
#[must_use]
pub fn document_title(document: &Document) -> String {
    if document.is_empty() {
        return FALLBACK_TITLE.to_string();
    }
    let part = |n: Option<u32>| n.map_or_else(|| "?".to_string(), |n| n.to_string());
    let mut title = format!(
        "Stanza {}.{}.{}",
        part(document.book),
        part(document.hymn),
        part(document.stanza)
    );
    if let Some(group) = document.hymn_group.as_deref().filter(|g| !g.is_empty()) {
        title.push_str(" | ");
        title.push_str(group);
    }
    title
}

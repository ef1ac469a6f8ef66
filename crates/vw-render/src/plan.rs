//! Render plan
//!
//! [`select`] walks the catalog's categories in declared order and keeps the
//! ones that have something visible to show for this document:
//!
//! - a category with members yields a section iff at least one of its
//!   resolved-visible members has a version in the document; items follow
//!   catalog order, not document order
//! - a category without members yields a section iff its own flag is on
//!
//! `condensed` is forwarded as is; it never changes the selection.

use crate::section::SectionKind;
use serde::Serialize;
use vw_layers::VisibilityStore;
use vw_model::{Document, LayerDescriptor, LayerId, Pada, Version};

/// One thing to draw inside a section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderItem<'a> {
    /// A text version or translation, labelled by its catalog entry
    Version {
        /// Member layer id
        layer: LayerId,
        /// Catalog label
        label: String,
        /// Version content
        version: &'a Version,
    },
    /// A pada, for per-line sections
    Pada {
        /// Pada content
        pada: &'a Pada,
    },
}

/// One section of the rendered stanza
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSection<'a> {
    /// Section kind
    pub kind: SectionKind,
    /// Governing category id
    pub layer: LayerId,
    /// Category label
    pub label: String,
    /// Items in display order; empty for sections drawn from stanza metadata
    pub items: Vec<RenderItem<'a>>,
}

/// Ordered sections plus the presentation flag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan<'a> {
    /// Condensed reading view
    pub condensed: bool,
    /// Sections in catalog order
    pub sections: Vec<RenderSection<'a>>,
}

impl RenderPlan<'_> {
    /// Whether nothing would be drawn
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Layer ids of every version item, in plan order
    #[must_use]
    pub fn version_layers(&self) -> Vec<&LayerId> {
        self.sections
            .iter()
            .flat_map(|s| &s.items)
            .filter_map(|item| match item {
                RenderItem::Version { layer, .. } => Some(layer),
                RenderItem::Pada { .. } => None,
            })
            .collect()
    }

    /// Section kinds in plan order
    #[must_use]
    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|s| s.kind).collect()
    }
}

/// Sections of `document` to render under the current visibility
///
/// An empty document (no stanza id) renders nothing.
#[must_use]
pub fn select<'a>(
    document: &'a Document,
    visibility: &VisibilityStore,
    condensed: bool,
) -> RenderPlan<'a> {
    let catalog = visibility.catalog();
    let sections = if document.is_empty() {
        Vec::new()
    } else {
        catalog
            .categories()
            .filter_map(|category| {
                if catalog.has_members(category.id.as_str()) {
                    member_section(document, visibility, category)
                } else {
                    standalone_section(document, visibility, category)
                }
            })
            .collect()
    };

    tracing::trace!(
        "Render plan for {:?}: {} sections",
        document.id,
        sections.len()
    );

    RenderPlan {
        condensed,
        sections,
    }
}

fn member_section<'a>(
    document: &'a Document,
    visibility: &VisibilityStore,
    category: &LayerDescriptor,
) -> Option<RenderSection<'a>> {
    let catalog = visibility.catalog();
    let items: Vec<RenderItem<'a>> = catalog
        .members_of(category.id.as_str())
        .filter(|member| visibility.resolved_visibility(member.id.as_str()))
        .filter_map(|member| {
            document
                .version(member.id.as_str())
                .map(|version| RenderItem::Version {
                    layer: member.id.clone(),
                    label: member.label.clone(),
                    version,
                })
        })
        .collect();

    (!items.is_empty()).then(|| RenderSection {
        kind: SectionKind::of(&category.id),
        layer: category.id.clone(),
        label: category.label.clone(),
        items,
    })
}

fn standalone_section<'a>(
    document: &'a Document,
    visibility: &VisibilityStore,
    category: &LayerDescriptor,
) -> Option<RenderSection<'a>> {
    if !visibility.resolved_visibility(category.id.as_str()) {
        return None;
    }
    let kind = SectionKind::of(&category.id);
    let items = if kind.is_pada_based() {
        document
            .padas
            .iter()
            .map(|pada| RenderItem::Pada { pada })
            .collect()
    } else {
        Vec::new()
    };
    Some(RenderSection {
        kind,
        layer: category.id.clone(),
        label: category.label.clone(),
        items,
    })
}

//! VedaWeb document render selection
//!
//! Pure functions that combine a fetched stanza with the current layer
//! visibility. Nothing here performs I/O or mutates state.
//!
//! - [`select`]: ordered sections to render
//! - [`layer_switches`]: model of the "toggle content" panel
//! - [`export_layers`]: layers handed to the export collaborator
//! - [`document_title`]: window title for a stanza

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod panel;
pub mod plan;
pub mod section;

pub use panel::{
    document_title, export_layers, layer_switches, ExportLayer, LayerSwitch, FALLBACK_TITLE,
};
pub use plan::{select, RenderItem, RenderPlan, RenderSection};
pub use section::SectionKind;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

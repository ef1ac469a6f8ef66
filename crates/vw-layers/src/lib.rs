//! VedaWeb layer visibility engine
//!
//! Decides which semantic slices of a multi-layer stanza are shown.
//!
//! # Core Operations
//!
//! - **Catalog**: parse and validate the ordered layer list ([`LayerCatalog`])
//! - **Visibility**: seed flags from catalog defaults, apply user toggles and
//!   answer per-layer and per-category queries ([`VisibilityStore`])
//!
//! # Resolution rule
//!
//! Every id carries its own flag. [`VisibilityStore::is_visible`] reports that
//! flag as is. [`VisibilityStore::resolved_visibility`] is what rendering uses:
//! a member is shown only if its own flag is on and its category is not
//! explicitly hidden.
//!
//! # Example
//!
//! ```rust,ignore
//! use vw_layers::{LayerCatalog, VisibilityStore};
//!
//! let catalog = LayerCatalog::from_json(json)?;
//! let mut store = VisibilityStore::new();
//! store.initialize(catalog.into());
//! store.toggle("version_deva", true);
//! assert!(store.resolved_visibility("version_deva"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod catalog;
pub mod error;
pub mod visibility;

pub use catalog::LayerCatalog;
pub use error::CatalogError;
pub use visibility::{VisibilityEvent, VisibilityStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

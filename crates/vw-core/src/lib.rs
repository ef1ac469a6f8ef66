//! VedaWeb reader core
//!
//! Wires the layer visibility engine, the persisted settings and the attribute
//! query builder into one session object:
//! - Loads the layer catalog and restores the user's category choices
//! - Renders fetched stanzas under the current visibility
//! - Drives the advanced search form against the attribute domain source
//! - Persists settings once, at session end, with the user's consent
//!
//! # Example
//!
//! ```rust,ignore
//! use vw_core::{JsonCatalogSource, ReaderConfig, ReaderSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReaderConfig::from_file("reader.toml")?;
//! let mut session = ReaderSession::from_config(config);
//! session.start(&JsonCatalogSource::file("uidata.json")).await;
//!
//! session.toggle_layer("version_deva", true);
//! let plan = session.render(&document);
//!
//! session.accept_privacy_hint();
//! session.teardown();
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod search_form;
pub mod session;
pub mod source;

pub use config::ReaderConfig;
pub use error::{ConfigError, ReaderError};
pub use search_form::SearchForm;
pub use session::{CatalogState, ReaderSession};
pub use source::{CatalogSource, JsonCatalogSource};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the reader core
    pub use crate::{
        CatalogSource, CatalogState, JsonCatalogSource, ReaderConfig, ReaderError,
        ReaderSession, SearchForm,
    };
    pub use vw_layers::{LayerCatalog, VisibilityStore};
    pub use vw_model::{Document, LayerId};
    pub use vw_render::{RenderPlan, SectionKind};
    pub use vw_search::{QueryBuilder, SearchRequest, SearchScope};
    pub use vw_settings::{keys, PersistentSettingsStore, SettingsRecord};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

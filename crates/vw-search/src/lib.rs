//! VedaWeb dynamic attribute query builder
//!
//! Lets a user compose a tree-shaped grammar search: a list of blocks, each
//! holding a free-text term and up to four `(attribute, value)` filters. The
//! values offered for a filter depend on the attribute chosen, and are fetched
//! on demand.
//!
//! # Architecture
//!
//! ```text
//! QueryBuilder ──set_field_name──▶ DomainTicket
//!      ▲                               │
//!      │ apply_domain                  ▼
//!      └──── DomainResolution ◀── AttributeDomainResolver ◀── DomainSource
//!                                      (moka, per-name, coalesced)
//! ```
//!
//! Tickets carry a per-field token so that a late response for an attribute
//! the user has since replaced is dropped.
//!
//! This crate only assembles and validates the request; executing it is the
//! search endpoint's job.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod builder;
pub mod error;
pub mod query;
pub mod resolver;
pub mod source;

pub use builder::{
    AttributeField, DomainState, DomainTicket, QueryBlock, QueryBuilder, MAX_FIELDS_PER_BLOCK,
};
pub use error::DomainError;
pub use query::{AttributeFilter, BlockQuery, SearchRequest, SearchScope, StructuredQuery};
pub use resolver::{AttributeDomainResolver, DomainResolution};
pub use source::{DomainSource, StaticDomainSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

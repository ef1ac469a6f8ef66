//! VedaWeb reader model
//!
//! Types shared by every part of the reader core.
//!
//! # Core Concepts
//!
//! - [`LayerId`]: identifier of a content layer; categories end in [`CATEGORY_SUFFIX`]
//! - [`LayerDescriptor`]: one entry of the layer catalog, with its default visibility
//! - [`Document`]: a fetched stanza with its padas and text versions
//! - [`Subscribers`]: explicit observer registration for the reactive stores
//! - [`BlockId`] / [`FieldId`]: identifiers of search query blocks and attribute fields

#![warn(unreachable_pub)]

mod document;
mod ids;
mod layer;
mod observer;

pub use document::{Document, Pada, Version};
pub use ids::{BlockId, FieldId, LayerId, CATEGORY_SUFFIX};
pub use layer::{LayerDescriptor, LayerKind};
pub use observer::{Subscribers, SubscriptionId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

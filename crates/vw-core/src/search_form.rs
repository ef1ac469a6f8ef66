//! Search form
//!
//! Binds a [`QueryBuilder`] to an [`AttributeDomainResolver`]. Choosing an
//! attribute updates the builder synchronously, then awaits the domain with
//! no lock held, then hands the result back under its ticket. Overlapping
//! selections on the same field resolve last-request-wins.

use crate::config::ReaderConfig;
use parking_lot::Mutex;
use std::sync::Arc;
use vw_model::{BlockId, FieldId};
use vw_search::{
    AttributeDomainResolver, DomainSource, QueryBuilder, SearchRequest, SearchScope,
    StructuredQuery,
};

/// Shared advanced search form
#[derive(Debug)]
pub struct SearchForm {
    builder: Mutex<QueryBuilder>,
    resolver: AttributeDomainResolver,
}

impl SearchForm {
    /// Form over an existing resolver
    #[must_use]
    pub fn new(resolver: AttributeDomainResolver, max_fields: usize) -> Self {
        Self {
            builder: Mutex::new(QueryBuilder::with_max_fields(max_fields)),
            resolver,
        }
    }

    /// Form with a fresh resolver sized by the config
    #[must_use]
    pub fn from_config(config: &ReaderConfig, source: Arc<dyn DomainSource>) -> Self {
        let resolver = match config.domain_cache_capacity {
            Some(capacity) => AttributeDomainResolver::with_capacity(source, capacity),
            None => AttributeDomainResolver::new(source),
        };
        Self::new(resolver, config.max_fields_per_block)
    }

    /// Choose the attribute of a field and load its value domain
    ///
    /// Returns `true` if the domain was applied, `false` if the field is
    /// unknown or a newer selection superseded this one while it was loading.
    pub async fn select_attribute(&self, field: FieldId, name: &str) -> bool {
        let Some(ticket) = self.builder.lock().set_field_name(field, name) else {
            return false;
        };
        let resolution = self.resolver.resolve(&ticket.attribute).await;
        self.builder.lock().apply_domain(&ticket, &resolution)
    }

    /// Choose the value of a field
    pub fn select_value(&self, field: FieldId, value: &str) -> bool {
        self.builder.lock().set_field_value(field, value)
    }

    /// Run a structural edit on the builder
    pub fn edit<R>(&self, f: impl FnOnce(&mut QueryBuilder) -> R) -> R {
        f(&mut self.builder.lock())
    }

    /// Append a block
    pub fn add_block(&self) -> BlockId {
        self.builder.lock().add_block()
    }

    /// Replace a block's term
    pub fn set_term(&self, block: BlockId, term: &str) -> bool {
        self.builder.lock().set_term(block, term)
    }

    /// Copy of the current builder state
    #[must_use]
    pub fn snapshot(&self) -> QueryBuilder {
        self.builder.lock().clone()
    }

    /// Current flat query
    #[must_use]
    pub fn query(&self) -> StructuredQuery {
        self.builder.lock().to_query()
    }

    /// Advanced search request for the current form
    #[must_use]
    pub fn request(&self, scope: SearchScope, transliteration: &str) -> SearchRequest {
        SearchRequest::advanced(self.query(), scope, transliteration)
    }

    /// Resolver shared with other forms
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &AttributeDomainResolver {
        &self.resolver
    }
}

//! Visibility store
//!
//! Mutable set of per-layer `shown` flags seeded from catalog defaults and
//! changed by user toggles. Toggling never fails: ids the catalog does not
//! know are stored and simply ignored by consumers.

use crate::catalog::LayerCatalog;
use std::collections::HashMap;
use std::sync::Arc;
use vw_model::{LayerId, Subscribers, SubscriptionId};

/// Change notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityEvent {
    /// Flags were reset from a (new) catalog
    Initialized,
    /// One flag changed
    Toggled {
        /// Layer id
        id: LayerId,
        /// New flag value
        shown: bool,
    },
    /// Persisted category flags were applied
    Restored,
}

/// Per-session layer visibility
#[derive(Debug, Default)]
pub struct VisibilityStore {
    catalog: Arc<LayerCatalog>,
    flags: HashMap<LayerId, bool>,
    subscribers: Subscribers<VisibilityEvent>,
}

impl VisibilityStore {
    /// Store with an empty catalog; every query answers `false` until
    /// [`initialize`](Self::initialize) is called
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded from a catalog
    #[must_use]
    pub fn with_catalog(catalog: Arc<LayerCatalog>) -> Self {
        let mut store = Self::new();
        store.initialize(catalog);
        store
    }

    /// Reset every flag to the catalog default
    ///
    /// Toggles made against a previous catalog are discarded.
    pub fn initialize(&mut self, catalog: Arc<LayerCatalog>) {
        self.flags = catalog
            .layers()
            .iter()
            .map(|l| (l.id.clone(), l.default_shown))
            .collect();
        self.catalog = catalog;
        tracing::debug!("Visibility initialized with {} layers", self.flags.len());
        self.subscribers.notify(&VisibilityEvent::Initialized);
    }

    /// Set the flag of one layer
    pub fn toggle(&mut self, id: impl Into<LayerId>, show: bool) {
        let id = id.into();
        if !self.catalog.contains(id.as_str()) {
            tracing::debug!("Toggling layer '{}' unknown to the catalog", id);
        }
        self.flags.insert(id.clone(), show);
        self.subscribers
            .notify(&VisibilityEvent::Toggled { id, shown: show });
    }

    /// The layer's own flag
    #[inline]
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Visibility used for rendering
    ///
    /// Own flag AND (id is a category OR its category is not explicitly hidden).
    #[must_use]
    pub fn resolved_visibility(&self, id: &str) -> bool {
        if !self.is_visible(id) {
            return false;
        }
        match self.catalog.category_of(id) {
            Some(category) => self.flags.get(category.as_str()) != Some(&false),
            None => true,
        }
    }

    /// Resolved-visible members of a category, in catalog order
    #[must_use]
    pub fn visible_members_of(&self, category: &str) -> Vec<LayerId> {
        self.catalog
            .members_of(category)
            .filter(|l| self.resolved_visibility(l.id.as_str()))
            .map(|l| l.id.clone())
            .collect()
    }

    /// Whether any member of the category has its own flag on
    ///
    /// Derived aggregate; not stored.
    #[must_use]
    pub fn any_member_visible(&self, category: &str) -> bool {
        self.catalog
            .members_of(category)
            .any(|l| self.is_visible(l.id.as_str()))
    }

    /// Number of categories whose flag is on
    #[must_use]
    pub fn shown_category_count(&self) -> usize {
        self.catalog
            .categories()
            .filter(|l| self.is_visible(l.id.as_str()))
            .count()
    }

    /// Category flags in catalog order (the persisted subset)
    #[must_use]
    pub fn category_flags(&self) -> Vec<(LayerId, bool)> {
        self.catalog
            .categories()
            .map(|l| (l.id.clone(), self.is_visible(l.id.as_str())))
            .collect()
    }

    /// Apply persisted category flags
    ///
    /// Entries that are not categories of the current catalog are skipped.
    /// Member flags are left alone.
    pub fn restore_category_flags<I>(&mut self, flags: I)
    where
        I: IntoIterator<Item = (LayerId, bool)>,
    {
        let mut applied = 0usize;
        for (id, shown) in flags {
            if id.is_category() && self.catalog.contains(id.as_str()) {
                self.flags.insert(id, shown);
                applied += 1;
            } else {
                tracing::debug!("Skipping persisted flag for unknown category '{}'", id);
            }
        }
        tracing::debug!("Restored {} category flags", applied);
        self.subscribers.notify(&VisibilityEvent::Restored);
    }

    /// Catalog the flags were seeded from
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }

    /// Shared handle to the catalog
    #[inline]
    #[must_use]
    pub fn catalog_handle(&self) -> Arc<LayerCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Register a change observer
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&VisibilityEvent) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Remove a change observer
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

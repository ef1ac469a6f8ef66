//! Reader session
//!
//! Owns the per-session stores and runs the two lifecycle edges:
//!
//! - **start**: fetch the catalog, load settings merged into defaults (the
//!   standard set plus one `layer.<category>` flag per catalog category),
//!   seed visibility and restore the persisted category flags
//! - **teardown**: copy category flags into the settings record and write it
//!   once, if the user consented and the catalog loaded
//!
//! Everything in between is in-memory mutation.

use crate::config::ReaderConfig;
use crate::source::CatalogSource;
use std::sync::Arc;
use vw_layers::{LayerCatalog, VisibilityStore};
use vw_model::{Document, LayerId};
use vw_render::RenderPlan;
use vw_settings::{
    keys, FileBackend, MemoryBackend, PersistentSettingsStore, SettingsBackend, SettingsRecord,
};

/// Load state of the layer catalog
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogState {
    /// Not fetched yet
    #[default]
    Loading,
    /// Catalog available
    Ready,
    /// Fetch failed; no automatic retry
    Failed(String),
}

/// Per-session reader state
#[derive(Debug)]
pub struct ReaderSession {
    config: ReaderConfig,
    settings: PersistentSettingsStore,
    visibility: VisibilityStore,
    catalog_state: CatalogState,
    torn_down: bool,
}

impl ReaderSession {
    /// Session storing settings in `backend`
    #[must_use]
    pub fn new(config: ReaderConfig, backend: Arc<dyn SettingsBackend>) -> Self {
        Self {
            settings: PersistentSettingsStore::new(backend),
            visibility: VisibilityStore::new(),
            catalog_state: CatalogState::Loading,
            torn_down: false,
            config,
        }
    }

    /// Session with the backend named by the config: a file when
    /// `settings_path` is set, memory otherwise
    #[must_use]
    pub fn from_config(config: ReaderConfig) -> Self {
        let backend: Arc<dyn SettingsBackend> = match &config.settings_path {
            Some(path) => Arc::new(FileBackend::new(path)),
            None => Arc::new(MemoryBackend::new()),
        };
        Self::new(config, backend)
    }

    /// Settings defaults for a catalog
    #[must_use]
    pub fn defaults_for(&self, catalog: &LayerCatalog) -> SettingsRecord {
        let base = SettingsRecord::standard().with(
            keys::TRANSLITERATION,
            self.config.default_transliteration.as_str(),
        );
        catalog.categories().fold(base, |record, category| {
            record.with(keys::layer(category.id.as_str()), category.default_shown)
        })
    }

    /// Fetch the catalog and bring every store up
    ///
    /// Never fails: a catalog fetch error leaves [`CatalogState::Failed`] and
    /// settings loaded from the standard defaults.
    pub async fn start(&mut self, source: &dyn CatalogSource) -> &CatalogState {
        match source.fetch_catalog().await {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                let defaults = self.defaults_for(&catalog);
                self.settings.load(defaults);
                self.visibility.initialize(catalog);
                let persisted = self.persisted_category_flags();
                self.visibility.restore_category_flags(persisted);
                self.catalog_state = CatalogState::Ready;
                tracing::info!(
                    "Reader session started with {} layers",
                    self.visibility.catalog().len()
                );
            }
            Err(e) => {
                tracing::warn!("Layer catalog unavailable: {}", e);
                let defaults = self.defaults_for(&LayerCatalog::empty());
                self.settings.load(defaults);
                self.catalog_state = CatalogState::Failed(e.to_string());
            }
        }
        &self.catalog_state
    }

    /// Persist once at session end
    ///
    /// Returns whether the record was written. Nothing is written on a
    /// second call, without consent (when `persist_requires_consent` is on)
    /// or when the catalog never loaded: that record lacks the persisted
    /// `layer.*` flags and overwriting would drop them.
    pub fn teardown(&mut self) -> bool {
        if std::mem::replace(&mut self.torn_down, true) {
            tracing::debug!("Reader session already torn down");
            return false;
        }
        if let CatalogState::Failed(_) = self.catalog_state {
            tracing::warn!("Layer catalog never loaded, keeping stored settings");
            return false;
        }

        for (category, shown) in self.visibility.category_flags() {
            self.settings.set(&keys::layer(category.as_str()), shown);
        }

        if self.config.persist_requires_consent && !self.settings.flag(keys::ACCEPTED_PRIVACY_HINT)
        {
            tracing::info!("Privacy hint not accepted, settings not persisted");
            return false;
        }
        let saved = self.settings.save();
        tracing::info!("Reader session ended (settings saved: {})", saved);
        saved
    }

    /// Toggle one layer
    pub fn toggle_layer(&mut self, id: impl Into<LayerId>, show: bool) {
        self.visibility.toggle(id, show);
    }

    /// Switch the condensed reading view
    pub fn set_condensed(&mut self, condensed: bool) -> bool {
        self.settings.set(keys::CONDENSED_VIEW, condensed)
    }

    /// Record the user's consent to local storage
    pub fn accept_privacy_hint(&mut self) -> bool {
        self.settings.set(keys::ACCEPTED_PRIVACY_HINT, true)
    }

    /// Sections of `document` under the current visibility and view mode
    #[must_use]
    pub fn render<'a>(&self, document: &'a Document) -> RenderPlan<'a> {
        vw_render::select(
            document,
            &self.visibility,
            self.settings.flag(keys::CONDENSED_VIEW),
        )
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Catalog load state
    #[inline]
    #[must_use]
    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog_state
    }

    /// Settings store
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &PersistentSettingsStore {
        &self.settings
    }

    /// Mutable settings store
    #[inline]
    pub fn settings_mut(&mut self) -> &mut PersistentSettingsStore {
        &mut self.settings
    }

    /// Visibility store
    #[inline]
    #[must_use]
    pub fn visibility(&self) -> &VisibilityStore {
        &self.visibility
    }

    /// Mutable visibility store
    #[inline]
    pub fn visibility_mut(&mut self) -> &mut VisibilityStore {
        &mut self.visibility
    }

    fn persisted_category_flags(&self) -> Vec<(LayerId, bool)> {
        self.settings
            .record()
            .iter()
            .filter_map(|(key, value)| {
                let category = key.strip_prefix(keys::LAYER_PREFIX)?;
                Some((LayerId::from(category), value.as_bool()?))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReaderError;
    use crate::source::MockCatalogSource;
    use vw_model::LayerDescriptor;

    fn catalog() -> LayerCatalog {
        LayerCatalog::new(vec![
            LayerDescriptor::new("version_", "Text Versions", true),
            LayerDescriptor::new("version_en", "English", true),
            LayerDescriptor::new("glossing_", "Glossing", false),
        ])
        .unwrap()
    }

    fn source() -> MockCatalogSource {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_catalog()
            .times(1)
            .returning(|| Ok(catalog()));
        source
    }

    fn session(backend: &Arc<MemoryBackend>) -> ReaderSession {
        let backend: Arc<dyn SettingsBackend> = backend.clone();
        ReaderSession::new(ReaderConfig::new(), backend)
    }

    #[tokio::test]
    async fn start_seeds_layer_defaults() {
        let backend = Arc::new(MemoryBackend::new());
        let mut session = session(&backend);

        assert_eq!(session.start(&source()).await, &CatalogState::Ready);
        assert_eq!(session.settings().record().get_bool("layer.version_"), Some(true));
        assert_eq!(session.settings().record().get_bool("layer.glossing_"), Some(false));
        assert!(session.visibility().is_visible("version_en"));
    }

    #[tokio::test]
    async fn persisted_category_flags_win_over_catalog_defaults() {
        let backend = Arc::new(MemoryBackend::with_blob(
            r#"{"layer.glossing_": true, "layer.version_": false, "layer.gone_": true}"#,
        ));
        let mut session = session(&backend);
        session.start(&source()).await;

        assert!(session.visibility().is_visible("glossing_"));
        assert!(!session.visibility().is_visible("version_"));
        assert!(!session.visibility().is_visible("gone_"));
        // member flags are not persisted
        assert!(session.visibility().is_visible("version_en"));
    }

    #[tokio::test]
    async fn catalog_failure_degrades_to_defaults() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_catalog()
            .returning(|| Err(ReaderError::fetch("layer catalog", "timeout")));
        let backend = Arc::new(MemoryBackend::new());
        let mut session = session(&backend);

        let state = session.start(&source).await.clone();
        assert!(matches!(state, CatalogState::Failed(_)));
        assert_eq!(
            session.settings().text(keys::TRANSLITERATION),
            Some("iso")
        );
        assert!(session.visibility().catalog().is_empty());
    }

    #[tokio::test]
    async fn teardown_without_consent_writes_nothing() {
        let backend = Arc::new(MemoryBackend::new());
        let mut session = session(&backend);
        session.start(&source()).await;
        session.toggle_layer("glossing_", true);

        assert!(!session.teardown());
        assert_eq!(backend.write_count(), 0);
    }

    #[tokio::test]
    async fn teardown_with_consent_persists_category_flags() {
        let backend = Arc::new(MemoryBackend::new());
        let mut session = session(&backend);
        session.start(&source()).await;
        session.toggle_layer("glossing_", true);
        session.toggle_layer("version_en", false);
        session.accept_privacy_hint();

        assert!(session.teardown());
        let blob: serde_json::Value = serde_json::from_str(&backend.blob().unwrap()).unwrap();
        assert_eq!(blob["layer.glossing_"], true);
        assert_eq!(blob["accepted_privacy_hint"], true);
        assert!(blob.get("layer.version_en").is_none());
    }

    #[tokio::test]
    async fn second_teardown_is_a_no_op() {
        let backend = Arc::new(MemoryBackend::new());
        let mut session = session(&backend);
        session.start(&source()).await;
        session.accept_privacy_hint();

        assert!(session.teardown());
        assert!(!session.teardown());
        assert_eq!(backend.write_count(), 1);
    }

    #[tokio::test]
    async fn failed_catalog_leaves_stored_settings_alone() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_catalog()
            .returning(|| Err(ReaderError::fetch("layer catalog", "timeout")));
        let backend = Arc::new(MemoryBackend::with_blob(
            r#"{"accepted_privacy_hint": true, "layer.glossing_": true}"#,
        ));
        let mut session = session(&backend);
        session.start(&source).await;

        assert!(!session.teardown());
        assert_eq!(backend.write_count(), 0);
    }

    #[tokio::test]
    async fn consent_requirement_can_be_switched_off() {
        let backend = Arc::new(MemoryBackend::new());
        let dyn_backend: Arc<dyn SettingsBackend> = backend.clone();
        let mut session = ReaderSession::new(
            ReaderConfig::new().with_persist_requires_consent(false),
            dyn_backend,
        );
        session.start(&source()).await;

        assert!(session.teardown());
        assert_eq!(backend.write_count(), 1);
    }

    #[tokio::test]
    async fn render_follows_condensed_setting() {
        let backend = Arc::new(MemoryBackend::new());
        let mut session = session(&backend);
        session.start(&source()).await;
        let doc = Document::default();

        assert!(!session.render(&doc).condensed);
        assert!(session.set_condensed(true));
        assert!(session.render(&doc).condensed);
    }
}

//! Reader sessions across restarts

use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use vw_core::{CatalogState, JsonCatalogSource, ReaderConfig, ReaderSession, SearchForm};
use vw_render::SectionKind;
use vw_search::{SearchRequest, SearchScope};
use vw_settings::keys;
use vw_test_utils::{
    sample_document, CountingDomainSource, SAMPLE_CATALOG_JSON, SAMPLE_DOMAINS_JSON,
};

fn catalog_source() -> JsonCatalogSource {
    JsonCatalogSource::inline(SAMPLE_CATALOG_JSON)
}

#[tokio::test]
async fn choices_survive_a_restart_with_consent() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReaderConfig::new().with_settings_path(dir.path().join("settings.json"));

    let mut first = ReaderSession::from_config(config.clone());
    assert_eq!(first.start(&catalog_source()).await, &CatalogState::Ready);
    first.toggle_layer("glossing_", true);
    first.toggle_layer("stanzaProperties_", false);
    first.toggle_layer("version_deva", true);
    first.set_condensed(true);
    first.accept_privacy_hint();
    assert!(first.teardown());

    let mut second = ReaderSession::from_config(config);
    second.start(&catalog_source()).await;
    assert!(second.visibility().is_visible("glossing_"));
    assert!(!second.visibility().is_visible("stanzaProperties_"));
    // member flags reset to catalog defaults
    assert!(!second.visibility().is_visible("version_deva"));
    assert!(second.settings().flag(keys::CONDENSED_VIEW));

    let doc = sample_document();
    let plan = second.render(&doc);
    assert!(plan.condensed);
    assert_eq!(
        plan.kinds(),
        vec![
            SectionKind::Versions,
            SectionKind::Translations,
            SectionKind::Glossing,
            SectionKind::Dictionaries,
        ]
    );
}

#[tokio::test]
async fn nothing_is_written_without_consent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let config = ReaderConfig::new().with_settings_path(&path);

    let mut session = ReaderSession::from_config(config);
    session.start(&catalog_source()).await;
    session.toggle_layer("glossing_", true);
    assert!(!session.teardown());
    assert!(!path.exists());
}

#[tokio::test]
async fn repeated_teardown_writes_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let mut session =
        ReaderSession::from_config(ReaderConfig::new().with_settings_path(&path));
    session.start(&catalog_source()).await;
    session.accept_privacy_hint();
    session.toggle_layer("glossing_", true);

    assert!(session.teardown());
    let written = std::fs::read_to_string(&path).unwrap();

    session.toggle_layer("glossing_", false);
    assert!(!session.teardown());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
}

#[tokio::test]
async fn layer_flags_survive_a_session_without_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let blob = r#"{"accepted_privacy_hint": true, "layer.glossing_": true}"#;
    std::fs::write(&path, blob).unwrap();
    let config = ReaderConfig::new().with_settings_path(&path);

    let mut offline = ReaderSession::from_config(config.clone());
    let state = offline.start(&JsonCatalogSource::inline("{broken")).await;
    assert!(matches!(state, CatalogState::Failed(_)));
    assert!(!offline.teardown());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), blob);

    let mut online = ReaderSession::from_config(config);
    online.start(&catalog_source()).await;
    assert!(online.visibility().is_visible("glossing_"));
}

#[tokio::test]
async fn broken_settings_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut session =
        ReaderSession::from_config(ReaderConfig::new().with_settings_path(&path));
    session.start(&catalog_source()).await;

    assert_eq!(session.settings().text(keys::TRANSLITERATION), Some("iso"));
    assert!(session.visibility().is_visible("version_"));
    assert!(!session.visibility().is_visible("glossing_"));
}

#[tokio::test]
async fn search_form_builds_advanced_request() {
    let source = Arc::new(
        CountingDomainSource::new()
            .with_domain("casus", &["nom", "acc"])
            .with_domain("numerus", &["sg", "du", "pl"])
            .with_delay(Duration::from_millis(10)),
    );
    let form = SearchForm::from_config(&ReaderConfig::new(), source.clone());
    let (block, first) = form.edit(|b| (b.blocks()[0].id(), b.blocks()[0].fields()[0].id()));

    form.set_term(block, " agni ");
    assert!(form.select_attribute(first, "casus").await);
    assert!(form.select_value(first, "nom"));
    let second = form.edit(|b| b.add_field(block)).unwrap();
    assert!(form.select_attribute(second, "numerus").await);
    assert!(form.select_value(second, "sg"));

    // same attribute again comes from the cache
    let other = form.add_block();
    let third = form.edit(|b| b.block(other).unwrap().fields()[0].id());
    assert!(form.select_attribute(third, "casus").await);
    assert_eq!(source.calls("casus"), 1);

    let request = form.request(SearchScope::new(1, 0), "iso");
    let SearchRequest::Advanced { blocks, scope, .. } = request else {
        panic!("expected an advanced request");
    };
    assert_eq!(scope, SearchScope { book: 1, hymn: 0 });
    // the second block has an attribute without value and no term
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].term, "agni");
    assert_eq!(blocks[0].attributes.len(), 2);
}

#[test]
fn sample_domains_fixture_is_valid() {
    let source = vw_search::StaticDomainSource::from_json(SAMPLE_DOMAINS_JSON).unwrap();
    assert_eq!(source.attributes(), vec!["casus", "modus", "numerus"]);
}

//! Domain fetches racing user edits

use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vw_search::{AttributeDomainResolver, DomainState, QueryBuilder};
use vw_test_utils::{CountingDomainSource, FailingDomainSource, GatedDomainSource};

#[tokio::test]
async fn concurrent_lookups_share_one_fetch() {
    let source = Arc::new(
        CountingDomainSource::new()
            .with_domain("casus", &["nom", "acc"])
            .with_delay(Duration::from_millis(50)),
    );
    let resolver = AttributeDomainResolver::new(source.clone());

    let (a, b) = tokio::join!(resolver.resolve("casus"), resolver.resolve("casus"));

    assert_eq!(source.calls("casus"), 1);
    assert_eq!(a, b);
    assert_eq!(a.values.len(), 2);
}

#[tokio::test]
async fn distinct_attributes_fetch_independently() {
    let source = Arc::new(
        CountingDomainSource::new()
            .with_domain("casus", &["nom"])
            .with_domain("modus", &["ind"]),
    );
    let resolver = AttributeDomainResolver::new(source.clone());

    let (casus, modus) = tokio::join!(resolver.resolve("casus"), resolver.resolve("modus"));
    resolver.resolve("casus").await;

    assert_eq!(casus.values.to_vec(), vec!["nom"]);
    assert_eq!(modus.values.to_vec(), vec!["ind"]);
    assert_eq!(source.total_calls(), 2);
}

#[tokio::test]
async fn late_response_for_replaced_attribute_is_dropped() {
    let source = Arc::new(
        GatedDomainSource::new()
            .with_domain("casus", &["nom", "acc"])
            .with_domain("modus", &["ind", "subj"])
            .with_gate("casus"),
    );
    let resolver = AttributeDomainResolver::new(source.clone());
    let builder = Mutex::new(QueryBuilder::new());
    let field = builder.lock().unwrap().blocks()[0].fields()[0].id();

    let casus = builder.lock().unwrap().set_field_name(field, "casus").unwrap();

    let slow = async {
        let resolution = resolver.resolve("casus").await;
        builder.lock().unwrap().apply_domain(&casus, &resolution)
    };
    let fast = async {
        let modus = builder.lock().unwrap().set_field_name(field, "modus").unwrap();
        let resolution = resolver.resolve("modus").await;
        let applied = builder.lock().unwrap().apply_domain(&modus, &resolution);
        source.release("casus");
        applied
    };
    let (slow_applied, fast_applied) = tokio::join!(slow, fast);

    assert!(!slow_applied);
    assert!(fast_applied);

    let builder = builder.into_inner().unwrap();
    let f = builder.field(field).unwrap();
    assert_eq!(f.name(), Some("modus"));
    assert_eq!(f.domain().to_vec(), vec!["ind", "subj"]);
    assert_eq!(f.state(), &DomainState::Ready);
}

#[tokio::test]
async fn failed_fetch_leaves_value_selector_disabled() {
    let resolver = AttributeDomainResolver::new(Arc::new(FailingDomainSource));
    let mut builder = QueryBuilder::new();
    let field = builder.blocks()[0].fields()[0].id();

    let ticket = builder.set_field_name(field, "casus").unwrap();
    let resolution = resolver.resolve("casus").await;
    assert!(builder.apply_domain(&ticket, &resolution));

    let f = builder.field(field).unwrap();
    assert!(matches!(f.state(), DomainState::Failed(_)));
    assert!(!f.is_value_selectable());
}

//! Testing utilities for the VedaWeb reader core workspace
//!
//! Shared fixtures and instrumented domain sources.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use vw_layers::LayerCatalog;
use vw_model::Document;
use vw_search::{DomainError, DomainSource};

/// Catalog in the UI data envelope shape
pub const SAMPLE_CATALOG_JSON: &str = r#"{
    "layers": [
        {"id": "stanzaProperties_", "label": "Stanza Properties", "show": true},
        {"id": "version_", "label": "Text Versions", "show": true},
        {"id": "version_deva", "label": "Devanagari", "show": false},
        {"id": "version_lubotsky", "label": "Lubotsky", "show": true},
        {"id": "version_en", "label": "English", "show": true},
        {"id": "translation_", "label": "Translations", "show": true},
        {"id": "translation_de", "label": "Geldner (de)", "show": true},
        {"id": "translation_en", "label": "Griffith (en)", "show": false},
        {"id": "glossing_", "label": "Glossing", "show": false},
        {"id": "metricaldata_", "label": "Metrical Data", "show": false},
        {"id": "dictionaries_", "label": "Dictionaries", "show": true}
    ]
}"#;

/// Stanza 1.1.1 with a subset of the catalog's versions
pub const SAMPLE_DOCUMENT_JSON: &str = r#"{
    "id": "0100101",
    "index": 0,
    "book": 1,
    "hymn": 1,
    "stanza": 1,
    "hymnAbs": 1,
    "hymnGroup": "Madhuchandas Vaishvamitra",
    "padas": [
        {"id": "a", "index": 0, "label": "agním īḷe puróhitaṁ"},
        {"id": "b", "index": 1, "label": "yajñásya devám r̥tvíjam"},
        {"id": "c", "index": 2, "label": "hótāraṁ ratnadhā́tamam"}
    ],
    "versions": [
        {"id": "version_lubotsky", "source": "Lubotsky", "language": "iso", "form": ["agním īḷe"]},
        {"id": "version_deva", "source": "Aufrecht", "language": "deva", "form": ["अग्निमीळे"]},
        {"id": "translation_de", "source": "Geldner", "language": "de", "form": ["Agni preise ich"], "applyKeys": true},
        {"id": "translation_en", "source": "Griffith", "language": "en", "form": ["I laud Agni"]}
    ]
}"#;

/// Grammar domains keyed by attribute name
pub const SAMPLE_DOMAINS_JSON: &str = r#"{
    "casus": ["nom", "acc", "instr", "dat", "abl", "gen", "loc", "voc"],
    "numerus": ["sg", "du", "pl"],
    "modus": ["ind", "subj", "opt", "imp"]
}"#;

pub fn sample_catalog() -> Arc<LayerCatalog> {
    Arc::new(LayerCatalog::from_json(SAMPLE_CATALOG_JSON).unwrap())
}

pub fn sample_document() -> Document {
    serde_json::from_str(SAMPLE_DOCUMENT_JSON).unwrap()
}

fn values(items: &[&str]) -> Vec<String> {
    items.iter().map(|v| (*v).to_string()).collect()
}

/// Domain source counting fetches per attribute, optionally slow
#[derive(Debug, Default)]
pub struct CountingDomainSource {
    domains: HashMap<String, Vec<String>>,
    delay: Option<Duration>,
    calls: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl CountingDomainSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_domain(mut self, attribute: &str, items: &[&str]) -> Self {
        self.domains.insert(attribute.to_string(), values(items));
        self
    }

    /// Sleep this long inside every fetch
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self, attribute: &str) -> usize {
        self.calls.lock().get(attribute).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainSource for CountingDomainSource {
    async fn fetch_domain(&self, attribute: &str) -> Result<Vec<String>, DomainError> {
        *self.calls.lock().entry(attribute.to_string()).or_insert(0) += 1;
        self.total.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.domains
            .get(attribute)
            .cloned()
            .ok_or_else(|| DomainError::UnknownAttribute(attribute.to_string()))
    }
}

/// Domain source whose gated attributes answer only after [`release`](Self::release)
#[derive(Debug, Default)]
pub struct GatedDomainSource {
    domains: HashMap<String, Vec<String>>,
    gates: HashMap<String, Arc<Notify>>,
}

impl GatedDomainSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_domain(mut self, attribute: &str, items: &[&str]) -> Self {
        self.domains.insert(attribute.to_string(), values(items));
        self
    }

    /// Hold fetches of `attribute` until released
    #[must_use]
    pub fn with_gate(mut self, attribute: &str) -> Self {
        self.gates
            .insert(attribute.to_string(), Arc::new(Notify::new()));
        self
    }

    /// Let one held (or the next) fetch of `attribute` complete
    pub fn release(&self, attribute: &str) {
        if let Some(gate) = self.gates.get(attribute) {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl DomainSource for GatedDomainSource {
    async fn fetch_domain(&self, attribute: &str) -> Result<Vec<String>, DomainError> {
        if let Some(gate) = self.gates.get(attribute) {
            gate.notified().await;
        }
        self.domains
            .get(attribute)
            .cloned()
            .ok_or_else(|| DomainError::UnknownAttribute(attribute.to_string()))
    }
}

/// Domain source that always fails
#[derive(Debug, Default)]
pub struct FailingDomainSource;

#[async_trait]
impl DomainSource for FailingDomainSource {
    async fn fetch_domain(&self, attribute: &str) -> Result<Vec<String>, DomainError> {
        Err(DomainError::fetch_failed(attribute, "service unavailable"))
    }
}

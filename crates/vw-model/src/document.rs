//! Fetched stanza documents
//!
//! The reader core only joins on the `id` fields; everything else is carried
//! through untouched for the renderer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stanza as returned by the document endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Stanza id
    #[serde(default)]
    pub id: Option<String>,
    /// Position in the corpus index
    #[serde(default)]
    pub index: Option<u64>,
    /// Book number
    #[serde(default)]
    pub book: Option<u32>,
    /// Hymn number within the book
    #[serde(default)]
    pub hymn: Option<u32>,
    /// Stanza number within the hymn
    #[serde(default)]
    pub stanza: Option<u32>,
    /// Absolute hymn number
    #[serde(default)]
    pub hymn_abs: Option<u32>,
    /// Hymn group
    #[serde(default)]
    pub hymn_group: Option<String>,
    /// Metrically segmented lines
    #[serde(default)]
    pub padas: Vec<Pada>,
    /// Text versions and translations
    #[serde(default)]
    pub versions: Vec<Version>,
    /// Fields the core does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Whether the document carries no stanza (empty response)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }

    /// Find a version by layer id
    #[must_use]
    pub fn version(&self, id: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Whether a version with this layer id is present
    #[inline]
    #[must_use]
    pub fn has_version(&self, id: &str) -> bool {
        self.version(id).is_some()
    }
}

/// One pada (metrical line) of a stanza
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pada {
    /// Pada label id (`a`, `b`, ...)
    #[serde(default)]
    pub id: String,
    /// Position within the stanza
    #[serde(default)]
    pub index: u32,
    /// Metrical label
    #[serde(default)]
    pub label: String,
    /// Tokens, glosses and anything else
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A text version or translation of a stanza
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// Layer id this version is shown under
    pub id: String,
    /// Editor or translator
    #[serde(default)]
    pub source: String,
    /// Language or script code
    #[serde(default)]
    pub language: String,
    /// Lines of text
    #[serde(default)]
    pub form: Vec<String>,
    /// Whether lines are keyed with pada letters
    #[serde(default)]
    pub apply_keys: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANZA: &str = r#"{
        "id": "0100101",
        "index": 0,
        "book": 1,
        "hymn": 1,
        "stanza": 1,
        "hymnAbs": 1,
        "hymnGroup": "Madhuchandas",
        "strata": "A",
        "padas": [{"id": "a", "index": 0, "label": "D", "tokens": []}],
        "versions": [
            {"id": "version_deva", "source": "Aufrecht", "language": "deva", "form": ["x"]},
            {"id": "translation_de", "source": "Geldner", "language": "de", "form": ["y"], "applyKeys": true}
        ]
    }"#;

    #[test]
    fn parses_camel_case_fields() {
        let doc: Document = serde_json::from_str(STANZA).unwrap();
        assert_eq!(doc.hymn_abs, Some(1));
        assert_eq!(doc.hymn_group.as_deref(), Some("Madhuchandas"));
        assert!(doc.versions[1].apply_keys);
        assert_eq!(doc.extra.get("strata"), Some(&Value::from("A")));
        assert!(doc.padas[0].extra.contains_key("tokens"));
    }

    #[test]
    fn version_lookup() {
        let doc: Document = serde_json::from_str(STANZA).unwrap();
        assert!(doc.has_version("version_deva"));
        assert!(!doc.has_version("version_en"));
    }

    #[test]
    fn empty_response_is_empty_document() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert!(doc.is_empty());
        assert!(doc.versions.is_empty());
    }
}

//! Structured search requests
//!
//! The flat shape handed to the search endpoint. Built from a
//! [`QueryBuilder`](crate::QueryBuilder) or directly for the simple free-text
//! mode.

use serde::{Deserialize, Serialize};

/// One `(attribute, value)` filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    /// Attribute name (`casus`)
    pub name: String,
    /// Chosen value (`nom`)
    pub value: String,
}

/// One search block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockQuery {
    /// Free-text term, possibly empty
    pub term: String,
    /// Complete attribute filters in field order
    pub attributes: Vec<AttributeFilter>,
}

impl BlockQuery {
    /// Whether the block constrains nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.attributes.is_empty()
    }
}

/// Blocks of an advanced search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuery {
    /// Non-empty blocks in builder order
    pub blocks: Vec<BlockQuery>,
}

impl StructuredQuery {
    /// Whether no block constrains anything
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Restriction to a book and optionally a hymn; `0` means unrestricted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchScope {
    /// Book number
    pub book: u32,
    /// Hymn number within the book
    pub hymn: u32,
}

impl SearchScope {
    /// Scope with a hymn restriction dropped when no book is set
    #[inline]
    #[must_use]
    pub fn new(book: u32, hymn: u32) -> Self {
        Self {
            book,
            hymn: if book == 0 { 0 } else { hymn },
        }
    }

    /// Whether the scope restricts anything
    #[inline]
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.book == 0
    }
}

/// Request body for the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SearchRequest {
    /// Free-text search over forms and translations
    Smart {
        /// Raw user input
        input: String,
        /// Transliteration scheme of the input
        transliteration: String,
    },
    /// Grammar search
    Advanced {
        /// Transliteration scheme of block terms
        transliteration: String,
        /// Book / hymn restriction
        scope: SearchScope,
        /// Query blocks
        blocks: Vec<BlockQuery>,
    },
}

impl SearchRequest {
    /// Free-text request; input is trimmed
    #[must_use]
    pub fn smart(input: &str, transliteration: impl Into<String>) -> Self {
        Self::Smart {
            input: input.trim().to_string(),
            transliteration: transliteration.into(),
        }
    }

    /// Grammar request from an assembled query
    #[must_use]
    pub fn advanced(
        query: StructuredQuery,
        scope: SearchScope,
        transliteration: impl Into<String>,
    ) -> Self {
        Self::Advanced {
            transliteration: transliteration.into(),
            scope: SearchScope::new(scope.book, scope.hymn),
            blocks: query.blocks,
        }
    }

    /// Whether sending the request would search for nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Smart { input, .. } => input.is_empty(),
            Self::Advanced { blocks, .. } => blocks.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn scope_drops_orphan_hymn() {
        assert_eq!(SearchScope::new(0, 5), SearchScope { book: 0, hymn: 0 });
        assert_eq!(SearchScope::new(3, 5), SearchScope { book: 3, hymn: 5 });
        assert!(SearchScope::default().is_unrestricted());
    }

    #[test]
    fn advanced_request_wire_form() {
        let query = StructuredQuery {
            blocks: vec![BlockQuery {
                term: "agni".to_string(),
                attributes: vec![AttributeFilter {
                    name: "casus".to_string(),
                    value: "nom".to_string(),
                }],
            }],
        };
        let request = SearchRequest::advanced(query, SearchScope { book: 0, hymn: 2 }, "iso");

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "mode": "advanced",
                "transliteration": "iso",
                "scope": {"book": 0, "hymn": 0},
                "blocks": [{"term": "agni", "attributes": [{"name": "casus", "value": "nom"}]}]
            })
        );
    }

    #[test]
    fn smart_request_trims_input() {
        let request = SearchRequest::smart("  indra ", "hk");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"mode": "smart", "input": "indra", "transliteration": "hk"})
        );
        assert!(SearchRequest::smart("   ", "hk").is_empty());
    }
}

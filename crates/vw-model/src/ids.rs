//! Identifiers
//!
//! Provides [`LayerId`] for catalog layers and the ulid-backed [`BlockId`] and
//! [`FieldId`] used by the search query builder.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use ulid::Ulid;

/// Marker closing every category id (`version_`, `translation_`, ...)
pub const CATEGORY_SUFFIX: char = '_';

/// Identifier of a content layer
///
/// A category id ends with [`CATEGORY_SUFFIX`]; a member id starts with the id
/// of the category it belongs to (`version_` owns `version_en`, `version_deva`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    /// Create new layer id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw id string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id names a category
    #[inline]
    #[must_use]
    pub fn is_category(&self) -> bool {
        self.0.ends_with(CATEGORY_SUFFIX)
    }

    /// Whether this id is a member of `category`
    ///
    /// A category is never a member of itself.
    #[inline]
    #[must_use]
    pub fn is_member_of(&self, category: &LayerId) -> bool {
        category.is_category()
            && !self.is_category()
            && self.0.len() > category.0.len()
            && self.0.starts_with(category.as_str())
    }
}

impl Display for LayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for LayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unique search block identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub Ulid);

impl BlockId {
    /// Generate new block ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique attribute field identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldId(pub Ulid);

impl FieldId {
    /// Generate new field ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for FieldId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_detection() {
        assert!(LayerId::from("version_").is_category());
        assert!(!LayerId::from("version_en").is_category());
        assert!(!LayerId::from("").is_category());
    }

    #[test]
    fn membership_requires_prefix_and_category() {
        let category = LayerId::from("version_");
        assert!(LayerId::from("version_en").is_member_of(&category));
        assert!(!LayerId::from("version_").is_member_of(&category));
        assert!(!LayerId::from("translation_en").is_member_of(&category));
        // prefix of a member id is not a category
        assert!(!LayerId::from("version_en").is_member_of(&LayerId::from("version")));
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(BlockId::new(), BlockId::new());
        assert_ne!(FieldId::new(), FieldId::new());
    }

    #[test]
    fn layer_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&LayerId::from("glossing_")).unwrap();
        assert_eq!(json, "\"glossing_\"");
    }
}

//! Settings record
//!
//! Ordered map of setting name to [`SettingValue`]. The record built from the
//! defaults defines the schema: which keys exist and which scalar kind each
//! one holds.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Well-known setting names
pub mod keys {
    /// Transliteration scheme used for search input
    pub const TRANSLITERATION: &str = "transliteration";
    /// Active search mode
    pub const SEARCH_MODE: &str = "search_mode";
    /// Whether the guided tour should run
    pub const TOUR: &str = "tour";
    /// Whether the privacy hint was accepted
    pub const ACCEPTED_PRIVACY_HINT: &str = "accepted_privacy_hint";
    /// Condensed reading view
    pub const CONDENSED_VIEW: &str = "condensed_view";
    /// Whether the welcome dialog is still pending
    pub const FIRST_VISIT: &str = "first_visit";
    /// Prefix for persisted layer category flags (`layer.version_`)
    pub const LAYER_PREFIX: &str = "layer.";

    /// Key under which a category flag is stored
    #[must_use]
    pub fn layer(category: &str) -> String {
        format!("{LAYER_PREFIX}{category}")
    }
}

/// Scalar setting value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Boolean flag
    Flag(bool),
    /// String value
    Text(String),
}

impl SettingValue {
    /// Whether both values are of the same scalar kind
    #[inline]
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Flag(_), Self::Flag(_)) | (Self::Text(_), Self::Text(_))
        )
    }

    /// Boolean payload
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Text(_) => None,
        }
    }

    /// String payload
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Flag(_) => "flag",
            Self::Text(_) => "text",
        }
    }
}

impl Display for SettingValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Flat, ordered settings map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsRecord(IndexMap<String, SettingValue>);

impl SettingsRecord {
    /// Empty record
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The reader's standard default set
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(keys::TRANSLITERATION, "iso")
            .with(keys::SEARCH_MODE, "advanced")
            .with(keys::TOUR, true)
            .with(keys::ACCEPTED_PRIVACY_HINT, false)
            .with(keys::CONDENSED_VIEW, false)
            .with(keys::FIRST_VISIT, true)
    }

    /// Add or replace a key
    #[inline]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Value of a key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    /// Boolean value of a key
    #[inline]
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(SettingValue::as_bool)
    }

    /// String value of a key
    #[inline]
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingValue::as_str)
    }

    /// Replace the value of an existing key, keeping its kind
    ///
    /// Returns `false` (and changes nothing) for unknown keys and kind mismatches.
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) -> bool {
        let value = value.into();
        match self.0.get_mut(key) {
            Some(current) if current.same_kind(&value) => {
                *current = value;
                true
            }
            Some(current) => {
                tracing::debug!(
                    "Rejecting {} value for {} setting '{}'",
                    value.kind_name(),
                    current.kind_name(),
                    key
                );
                false
            }
            None => {
                tracing::debug!("Rejecting undeclared setting '{}'", key);
                false
            }
        }
    }

    /// Whether the key is declared
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of keys
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no key is declared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_defaults() {
        let record = SettingsRecord::standard();
        assert_eq!(record.get_str(keys::TRANSLITERATION), Some("iso"));
        assert_eq!(record.get_str(keys::SEARCH_MODE), Some("advanced"));
        assert_eq!(record.get_bool(keys::TOUR), Some(true));
        assert_eq!(record.get_bool(keys::ACCEPTED_PRIVACY_HINT), Some(false));
        assert_eq!(record.len(), 6);
    }

    #[test]
    fn set_keeps_declared_kind() {
        let mut record = SettingsRecord::standard();
        assert!(record.set(keys::CONDENSED_VIEW, true));
        assert!(!record.set(keys::CONDENSED_VIEW, "yes"));
        assert!(!record.set("unknown", true));
        assert_eq!(record.get_bool(keys::CONDENSED_VIEW), Some(true));
        assert!(!record.contains("unknown"));
    }

    #[test]
    fn layer_keys() {
        assert_eq!(keys::layer("version_"), "layer.version_");
    }

    #[test]
    fn serializes_as_flat_object() {
        let record = SettingsRecord::new().with("a", true).with("b", "x");
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"a":true,"b":"x"}"#);
    }
}

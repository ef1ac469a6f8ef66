//! Reader configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vw_search::MAX_FIELDS_PER_BLOCK;

/// Session configuration
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Durable settings blob; `None` keeps settings in memory only
    pub settings_path: Option<PathBuf>,
    /// Bound on attribute names kept in the domain cache; `None` keeps every
    /// resolved domain for the session
    pub domain_cache_capacity: Option<u64>,
    /// Attribute fields allowed per search block
    pub max_fields_per_block: usize,
    /// Only persist settings once the privacy hint was accepted
    pub persist_requires_consent: bool,
    /// Transliteration scheme before the user picks one
    pub default_transliteration: String,
}

impl ReaderConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// `ConfigError::Parse` for invalid TOML, `ConfigError::Invalid` for
    /// out-of-range values.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let toml =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&toml)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `ConfigError::Invalid` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_fields_per_block == 0 {
            return Err(ConfigError::invalid(
                "max_fields_per_block",
                "must be at least 1",
            ));
        }
        if self.domain_cache_capacity == Some(0) {
            return Err(ConfigError::invalid(
                "domain_cache_capacity",
                "must be at least 1",
            ));
        }
        if self.default_transliteration.trim().is_empty() {
            return Err(ConfigError::invalid(
                "default_transliteration",
                "must not be empty",
            ));
        }
        Ok(())
    }

    /// With durable settings file
    #[inline]
    #[must_use]
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// With a bounded domain cache
    #[inline]
    #[must_use]
    pub fn with_domain_cache_capacity(mut self, capacity: u64) -> Self {
        self.domain_cache_capacity = Some(capacity);
        self
    }

    /// With field cap per block
    #[inline]
    #[must_use]
    pub fn with_max_fields_per_block(mut self, max: usize) -> Self {
        self.max_fields_per_block = max;
        self
    }

    /// With consent requirement for persisting
    #[inline]
    #[must_use]
    pub fn with_persist_requires_consent(mut self, required: bool) -> Self {
        self.persist_requires_consent = required;
        self
    }

    /// With default transliteration scheme
    #[inline]
    #[must_use]
    pub fn with_default_transliteration(mut self, scheme: impl Into<String>) -> Self {
        self.default_transliteration = scheme.into();
        self
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            settings_path: None,
            domain_cache_capacity: None,
            max_fields_per_block: MAX_FIELDS_PER_BLOCK,
            persist_requires_consent: true,
            default_transliteration: "iso".to_string(),
        }
    }
}

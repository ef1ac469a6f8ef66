//! Attribute domain sources
//!
//! A [`DomainSource`] answers "which values can attribute X take?". The grammar
//! endpoint is one implementation; [`StaticDomainSource`] serves a fixed table.

use crate::error::DomainError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Read endpoint keyed by attribute name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainSource: Send + Sync {
    /// Fetch the ordered value list of an attribute
    ///
    /// # Errors
    /// Transport failure, unknown attribute or undecodable response.
    async fn fetch_domain(&self, attribute: &str) -> Result<Vec<String>, DomainError>;
}

/// Fixed attribute → values table
#[derive(Debug, Clone, Default)]
pub struct StaticDomainSource {
    domains: HashMap<String, Vec<String>>,
}

impl StaticDomainSource {
    /// Empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute with its values
    #[must_use]
    pub fn with_domain<I, S>(mut self, attribute: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains
            .insert(attribute.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Parse `{ "casus": ["nom", "acc"], ... }`
    ///
    /// # Errors
    /// `DomainError::Malformed` if the JSON is not an object of string arrays.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        Ok(Self {
            domains: serde_json::from_str(json)?,
        })
    }

    /// Attribute names in the table, sorted
    #[must_use]
    pub fn attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.domains.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[async_trait]
impl DomainSource for StaticDomainSource {
    async fn fetch_domain(&self, attribute: &str) -> Result<Vec<String>, DomainError> {
        self.domains
            .get(attribute)
            .cloned()
            .ok_or_else(|| DomainError::UnknownAttribute(attribute.to_string()))
    }
}

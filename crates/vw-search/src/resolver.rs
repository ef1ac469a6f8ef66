//! Attribute domain resolver
//!
//! Session-lifetime cache of attribute value domains built on
//! `moka::future::Cache`. Concurrent lookups of the same name share one
//! in-flight fetch. Failed fetches are not cached. Without a capacity the
//! cache is unbounded, so a resolved domain stays for the whole session.

use crate::source::DomainSource;
use moka::future::Cache;
use std::fmt;
use std::sync::Arc;

/// Outcome of a domain lookup
///
/// A failure is an empty domain with the error message attached; callers
/// leave the dependent value selector disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainResolution {
    /// Values in source order
    pub values: Arc<[String]>,
    /// Fetch error, if any
    pub error: Option<String>,
}

impl DomainResolution {
    /// Successful lookup
    #[inline]
    #[must_use]
    pub fn ready(values: Arc<[String]>) -> Self {
        Self {
            values,
            error: None,
        }
    }

    /// Failed lookup
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            values: Arc::from(Vec::new()),
            error: Some(message.into()),
        }
    }

    /// Whether the lookup failed
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Per-name cached, de-duplicating domain fetcher
#[derive(Clone)]
pub struct AttributeDomainResolver {
    source: Arc<dyn DomainSource>,
    cache: Cache<String, Arc<[String]>>,
}

impl AttributeDomainResolver {
    /// Resolver that never evicts a resolved domain
    #[must_use]
    pub fn new(source: Arc<dyn DomainSource>) -> Self {
        Self {
            source,
            cache: Cache::builder().build(),
        }
    }

    /// Resolver keeping at most `capacity` attribute names
    ///
    /// Past the bound, least used domains are evicted and fetched again on
    /// their next lookup.
    #[must_use]
    pub fn with_capacity(source: Arc<dyn DomainSource>, capacity: u64) -> Self {
        Self {
            source,
            cache: Cache::new(capacity),
        }
    }

    /// Value domain of an attribute
    ///
    /// Served from cache when present; otherwise fetched once, with any
    /// concurrent caller for the same name awaiting that same fetch.
    pub async fn resolve(&self, attribute: &str) -> DomainResolution {
        let source = Arc::clone(&self.source);
        let name = attribute.to_string();
        let result = self
            .cache
            .try_get_with(attribute.to_string(), async move {
                tracing::debug!("Fetching value domain for '{}'", name);
                source.fetch_domain(&name).await.map(Arc::<[String]>::from)
            })
            .await;

        match result {
            Ok(values) => DomainResolution::ready(values),
            Err(e) => {
                tracing::warn!("Value domain for '{}' unavailable: {}", attribute, e);
                DomainResolution::failed(e.to_string())
            }
        }
    }

    /// Cached domain without fetching
    pub async fn cached(&self, attribute: &str) -> Option<Arc<[String]>> {
        self.cache.get(attribute).await
    }
}

impl fmt::Debug for AttributeDomainResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDomainResolver")
            .field("entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::source::MockDomainSource;

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let mut source = MockDomainSource::new();
        source
            .expect_fetch_domain()
            .times(1)
            .returning(|_| Ok(vec!["nom".to_string(), "acc".to_string()]));
        let resolver = AttributeDomainResolver::new(Arc::new(source));

        let first = resolver.resolve("casus").await;
        let second = resolver.resolve("casus").await;

        assert_eq!(first.values.to_vec(), vec!["nom", "acc"]);
        assert_eq!(first, second);
        assert!(resolver.cached("casus").await.is_some());
    }

    #[tokio::test]
    async fn failure_yields_empty_domain_with_error() {
        let mut source = MockDomainSource::new();
        source
            .expect_fetch_domain()
            .times(2)
            .returning(|_| Err(DomainError::fetch_failed("casus", "connection refused")));
        let resolver = AttributeDomainResolver::new(Arc::new(source));

        let resolution = resolver.resolve("casus").await;
        assert!(resolution.is_error());
        assert!(resolution.values.is_empty());
        assert!(resolver.cached("casus").await.is_none());

        // failures are not cached; the next lookup asks again
        assert!(resolver.resolve("casus").await.is_error());
    }

    #[tokio::test]
    async fn domains_outlive_many_other_lookups() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let casus_fetches = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&casus_fetches);
        let mut source = MockDomainSource::new();
        source.expect_fetch_domain().returning(move |name| {
            if name == "casus" {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            Ok(vec![name.to_string()])
        });
        let resolver = AttributeDomainResolver::new(Arc::new(source));

        resolver.resolve("casus").await;
        for i in 0..2_000 {
            resolver.resolve(&format!("attr{i}")).await;
        }
        resolver.cache.run_pending_tasks().await;

        assert_eq!(resolver.resolve("casus").await.values.to_vec(), vec!["casus"]);
        assert_eq!(casus_fetches.load(Ordering::SeqCst), 1);
    }
}

//! Persistent settings store
//!
//! Loads once, mutates in memory, saves once. Storage failures are logged and
//! swallowed; the in-memory record stays authoritative for the session.

use crate::backend::SettingsBackend;
use crate::record::{keys, SettingValue, SettingsRecord};
use serde_json::{Map, Value};
use std::sync::Arc;
use vw_model::{Subscribers, SubscriptionId};

/// Search mode pseudo-key that only opens the help tab
const HELP_MODE: &str = "help";

/// Change notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Record was (re)loaded from storage
    Loaded,
    /// One setting changed
    Changed {
        /// Setting name
        key: String,
    },
}

/// Settings bound to a durable backend
#[derive(Debug)]
pub struct PersistentSettingsStore {
    backend: Arc<dyn SettingsBackend>,
    record: SettingsRecord,
    subscribers: Subscribers<SettingsEvent>,
}

impl PersistentSettingsStore {
    /// Store holding the standard defaults; call [`load`](Self::load) to
    /// pick up persisted values
    #[must_use]
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        Self {
            backend,
            record: SettingsRecord::standard(),
            subscribers: Subscribers::new(),
        }
    }

    /// Read the durable blob and merge it into `defaults`
    ///
    /// Never fails: a missing, unreadable or malformed blob yields `defaults`.
    pub fn load(&mut self, defaults: SettingsRecord) -> &SettingsRecord {
        self.record = match self.backend.read() {
            Ok(Some(blob)) => merge_persisted(defaults, &blob),
            Ok(None) => {
                tracing::debug!("No persisted settings, using defaults");
                defaults
            }
            Err(e) => {
                tracing::warn!("Could not read persisted settings: {}", e);
                defaults
            }
        };
        self.subscribers.notify(&SettingsEvent::Loaded);
        &self.record
    }

    /// Write the whole record, replacing whatever was stored
    ///
    /// Returns whether the write went through; failures are only logged.
    pub fn save(&self) -> bool {
        let blob = match serde_json::to_string(&self.record) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::warn!("Could not encode settings: {}", e);
                return false;
            }
        };
        match self.backend.write(&blob) {
            Ok(()) => {
                tracing::debug!("Saved {} settings", self.record.len());
                true
            }
            Err(e) => {
                tracing::warn!("Could not save settings: {}", e);
                false
            }
        }
    }

    /// Current record
    #[inline]
    #[must_use]
    pub fn record(&self) -> &SettingsRecord {
        &self.record
    }

    /// Change one declared setting
    ///
    /// Returns `false` for undeclared keys and values of the wrong kind.
    pub fn set(&mut self, key: &str, value: impl Into<SettingValue>) -> bool {
        let changed = self.record.set(key, value);
        if changed {
            self.subscribers.notify(&SettingsEvent::Changed {
                key: key.to_string(),
            });
        }
        changed
    }

    /// Boolean setting, `false` when undeclared
    #[inline]
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.record.get_bool(key).unwrap_or(false)
    }

    /// String setting
    #[inline]
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.record.get_str(key)
    }

    /// Switch search mode; the help tab is not a mode and is ignored
    pub fn set_search_mode(&mut self, mode: &str) -> bool {
        if mode == HELP_MODE {
            return false;
        }
        self.set(keys::SEARCH_MODE, mode)
    }

    /// Register a change observer
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SettingsEvent) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    /// Remove a change observer
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

/// Merge a persisted blob into `defaults`, key by key
///
/// - every default key is present in the result
/// - unknown persisted keys are dropped
/// - a persisted value of the wrong scalar kind falls back to the default
/// - an unparseable blob yields `defaults` unchanged
#[must_use]
pub fn merge_persisted(defaults: SettingsRecord, blob: &str) -> SettingsRecord {
    let persisted: Map<String, Value> = match serde_json::from_str(blob) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!("Ignoring malformed persisted settings: {}", e);
            return defaults;
        }
    };

    let mut merged = defaults;
    for (key, value) in &persisted {
        if !merged.contains(key) {
            tracing::debug!("Dropping unknown persisted setting '{}'", key);
            continue;
        }
        let candidate = match value {
            Value::Bool(b) => Some(SettingValue::Flag(*b)),
            Value::String(s) => Some(SettingValue::Text(s.clone())),
            _ => None,
        };
        let accepted = candidate.is_some_and(|v| merged.set(key, v));
        if !accepted {
            tracing::warn!("Persisted setting '{}' has the wrong type, using default", key);
        }
    }
    merged
}

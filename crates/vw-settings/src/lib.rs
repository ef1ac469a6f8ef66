//! VedaWeb persisted settings
//!
//! A flat bag of named scalar settings with a declared default for each key.
//!
//! # Lifecycle
//!
//! - **Load**: read the durable blob once at startup and merge it key by key
//!   into the defaults; nothing about a bad blob ever fails the session
//! - **Mutate**: in memory, from anywhere in the UI
//! - **Save**: one full overwrite at session teardown, no incremental writes
//!
//! # Example
//!
//! ```rust,ignore
//! use vw_settings::{FileBackend, PersistentSettingsStore, SettingsRecord};
//!
//! let mut store = PersistentSettingsStore::new(Arc::new(FileBackend::new(path)));
//! store.load(SettingsRecord::standard());
//! store.set(keys::CONDENSED_VIEW, true);
//! store.save();
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod backend;
pub mod error;
pub mod record;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, SettingsBackend};
pub use error::StorageError;
pub use record::{keys, SettingValue, SettingsRecord};
pub use store::{merge_persisted, PersistentSettingsStore, SettingsEvent};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Durable storage backends
//!
//! A backend stores one opaque blob. Writes replace the whole blob.

use crate::error::StorageError;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Key/value blob storage for the settings record
pub trait SettingsBackend: Send + Sync + Debug {
    /// Read the stored blob; `Ok(None)` when nothing was saved yet
    ///
    /// # Errors
    /// Storage could not be read.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored blob
    ///
    /// # Errors
    /// Storage could not be written.
    fn write(&self, blob: &str) -> Result<(), StorageError>;
}

/// JSON file on disk, replaced atomically on write
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Backend for the given file path
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsBackend for FileBackend {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io_error(&self.path, e)),
        }
    }

    fn write(&self, blob: &str) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| StorageError::io_error(&dir, e))?;

        // temp file in the target directory so the rename stays on one filesystem
        let mut tmp =
            tempfile::NamedTempFile::new_in(&dir).map_err(|e| StorageError::io_error(&dir, e))?;
        tmp.write_all(blob.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io_error(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::io_error(&self.path, e.error))?;
        Ok(())
    }
}

/// In-memory blob, for tests and storage-less sessions
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blob: Mutex<Option<String>>,
    writes: Mutex<usize>,
    unavailable: bool,
}

impl MemoryBackend {
    /// Empty backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-filled with a blob
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
            ..Self::default()
        }
    }

    /// Backend whose reads and writes always fail
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Current blob
    #[must_use]
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().clone()
    }

    /// Number of successful writes
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        Ok(self.blob.lock().clone())
    }

    fn write(&self, blob: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("storage disabled".to_string()));
        }
        *self.blob.lock() = Some(blob.to_string());
        *self.writes.lock() += 1;
        Ok(())
    }
}

// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`KeyValueStore`] implementations.
//!
//! [`FileStore`] keeps the whole map in memory and rewrites the backing JSON
//! file after every mutation. Rewrites go through a temp file in the same
//! directory followed by a rename, so a crash mid-write leaves the previous
//! file intact.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use purrview_core::{KeyValueStore, PurrviewError};
use tracing::{debug, warn};

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-lifetime store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Entries>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        lock(&self.entries).insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        lock(&self.entries).remove(key);
    }
}

/// Store backed by a JSON object file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. A file that exists but does not
    /// hold a JSON string map is logged and treated as empty; it is replaced
    /// on the next mutation. Other I/O failures are returned.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PurrviewError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Entries>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "session file is corrupt, starting empty");
                    Entries::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Entries::new(),
            Err(e) => return Err(PurrviewError::Storage { source: Box::new(e) }),
        };
        debug!(path = %path.display(), keys = entries.len(), "file store opened");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &Entries) {
        if let Err(e) = write_atomically(&self.path, entries) {
            warn!(path = %self.path.display(), error = %e, "failed to flush session file");
        }
    }
}

fn write_atomically(path: &Path, entries: &Entries) -> Result<(), PurrviewError> {
    let storage = |e: Box<dyn std::error::Error + Send + Sync>| PurrviewError::Storage { source: e };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| storage(Box::new(e)))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| storage(Box::new(e)))?;
    serde_json::to_writer_pretty(&mut tmp, entries).map_err(|e| storage(Box::new(e)))?;
    tmp.flush().map_err(|e| storage(Box::new(e)))?;
    tmp.as_file().sync_all().map_err(|e| storage(Box::new(e)))?;
    tmp.persist(path).map_err(|e| storage(Box::new(e.error)))?;
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.flush(&entries);
        }
    }
}

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::models::{Entry, Habit, Todo, User};

/// Errors that can occur while touching the data file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read data file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write data file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("data file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize document: {0}")]
    Serialize(serde_json::Error),
}

/// The entire dataset: one JSON document holding every collection.
/// Missing keys deserialize to empty collections, so documents written by
/// older versions (or by hand) load fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Monotonic id counter shared by all collections.
    pub seq: i64,
    pub users: Vec<User>,
    pub entries: Vec<Entry>,
    pub todos: Vec<Todo>,
    pub habits: Vec<Habit>,
}

impl Document {
    /// Hand out the next record id. Seeded from the highest id already in
    /// the document so files predating the counter never collide.
    pub fn allocate_id(&mut self) -> i64 {
        let highest = self
            .users
            .iter()
            .map(|u| u.id)
            .chain(self.entries.iter().map(|e| e.id))
            .chain(self.todos.iter().map(|t| t.id))
            .chain(self.habits.iter().map(|h| h.id))
            .max()
            .unwrap_or(0);

        self.seq = self.seq.max(highest) + 1;
        self.seq
    }
}

/// Flat-file store: every operation is a full-document round trip against
/// a single JSON file. The mutex serializes read-modify-write cycles so
/// concurrent handlers cannot lose updates to each other; the file itself
/// is not locked against other processes.
pub struct Store {
    path: PathBuf,
    guard: Mutex<()>,
}

impl Store {
    /// Open the store, creating the file with an empty document when absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if !path.exists() {
            write_document(&path, &Document::default())?;
            tracing::info!("created new data file {}", path.display());
        }

        Ok(Self {
            path,
            guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document. Failures (missing file, bad JSON) are
    /// logged and masked to the empty document.
    pub fn read(&self) -> Document {
        let _lock = self.lock();
        read_document(&self.path)
    }

    /// Write the whole document. Failures are logged and swallowed;
    /// callers are never notified.
    pub fn write(&self, doc: &Document) {
        let _lock = self.lock();
        if let Err(err) = write_document(&self.path, doc) {
            tracing::error!("error writing data file: {}", err);
        }
    }

    /// Serialized read-modify-write cycle. The document is re-read, handed
    /// to `f`, and persisted, all under the store lock.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let _lock = self.lock();
        let mut doc = read_document(&self.path);
        let out = f(&mut doc);
        if let Err(err) = write_document(&self.path, &doc) {
            tracing::error!("error writing data file: {}", err);
        }
        out
    }

    /// Like [`Store::mutate`], but `f` reports how many records it changed
    /// and the document is only persisted when that count is nonzero.
    pub fn mutate_counted(&self, f: impl FnOnce(&mut Document) -> usize) -> usize {
        let _lock = self.lock();
        let mut doc = read_document(&self.path);
        let changed = f(&mut doc);
        if changed > 0 {
            if let Err(err) = write_document(&self.path, &doc) {
                tracing::error!("error writing data file: {}", err);
            }
        }
        changed
    }

    /// Unmasked read for the health endpoint.
    pub fn health_check(&self) -> Result<(), StoreError> {
        let _lock = self.lock();
        let raw = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str::<Document>(&raw).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock only means another handler panicked mid-write;
        // the guarded state lives on disk, so keep going.
        self.guard.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn read_document(path: &Path) -> Document {
    match std::fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(
                "data file {} is not valid JSON, falling back to an empty document: {}",
                path.display(),
                err
            );
            Document::default()
        }),
        Err(err) => {
            tracing::warn!("error reading data file {}: {}", path.display(), err);
            Document::default()
        }
    }
}

fn write_document(path: &Path, doc: &Document) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(doc).map_err(StoreError::Serialize)?;
    std::fs::write(path, raw).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

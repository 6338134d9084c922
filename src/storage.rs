//! JSON document store backing every collection.
//!
//! Each collection lives in one file, `<data_dir>/<name>.json`, holding a
//! single object whose root key (the collection name) maps to the list of
//! records. Every write replaces the whole document.
//!
//! Each document name owns one mutex. Plain reads, plain writes and the
//! typed read-modify-write cycle ([`Storage::modify`]) hold it for their
//! whole duration, so two concurrent creates cannot compute the same id and
//! no update is lost. Writes go through a temporary sibling file and a
//! rename, so readers never observe a half-written document.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// A whole on-disk document: root key -> value (normally a record list).
pub type Document = serde_json::Map<String, Value>;

/// A typed record persisted in its own document.
pub trait Record: Serialize + serde::de::DeserializeOwned {
    /// Document name and root key, e.g. `loans` for `loans.json`.
    const COLLECTION: &'static str;

    fn id(&self) -> u64;
}

/// Shared handle to the data directory (cheap to clone across handlers).
#[derive(Clone)]
pub struct Storage {
    inner: Arc<Inner>,
}

struct Inner {
    dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Storage {
    /// Open (or create) the data directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| Error::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            inner: Arc::new(Inner {
                dir,
                locks: Mutex::new(HashMap::new()),
            }),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.dir
    }

    /// Read a document; a missing file reads as an empty document.
    pub fn read(&self, name: &str) -> Result<Document> {
        let lock = self.document_lock(name);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_unlocked(name)
    }

    /// Replace a document with `document`.
    pub fn write(&self, name: &str, document: &Document) -> Result<()> {
        let lock = self.document_lock(name);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.write_unlocked(name, document)
    }

    /// Snapshot of a collection's records.
    pub fn load<T: Record>(&self) -> Result<Vec<T>> {
        let document = self.read(T::COLLECTION)?;
        records_from(&document, &self.document_path(T::COLLECTION))
    }

    /// Read-modify-write cycle over one collection under its document lock.
    ///
    /// The document is rewritten only when `apply` succeeds; other top-level
    /// keys of the document are carried over untouched.
    pub fn modify<T, R>(&self, apply: impl FnOnce(&mut Vec<T>) -> Result<R>) -> Result<R>
    where
        T: Record,
    {
        let lock = self.document_lock(T::COLLECTION);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let path = self.document_path(T::COLLECTION);
        let mut document = self.read_unlocked(T::COLLECTION)?;
        let mut records: Vec<T> = records_from(&document, &path)?;

        let outcome = apply(&mut records)?;

        let value = serde_json::to_value(&records).map_err(|source| Error::Corrupt { path, source })?;
        document.insert(T::COLLECTION.to_string(), value);
        self.write_unlocked(T::COLLECTION, &document)?;
        Ok(outcome)
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.inner.dir.join(format!("{name}.json"))
    }

    fn document_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.inner.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(name.to_string()).or_default().clone()
    }

    fn read_unlocked(&self, name: &str) -> Result<Document> {
        let path = self.document_path(name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(source) => return Err(Error::Io { path, source }),
        };
        serde_json::from_slice(&bytes).map_err(|source| Error::Corrupt { path, source })
    }

    fn write_unlocked(&self, name: &str, document: &Document) -> Result<()> {
        let path = self.document_path(name);
        let staging = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(document).map_err(|source| Error::Corrupt {
            path: path.clone(),
            source,
        })?;
        if let Err(source) = stage(&staging, &bytes) {
            let _ = fs::remove_file(&staging);
            return Err(Error::Io { path: staging, source });
        }
        if let Err(source) = fs::rename(&staging, &path) {
            let _ = fs::remove_file(&staging);
            return Err(Error::Io { path, source });
        }

        debug!(document = name, bytes = bytes.len(), "document written");
        Ok(())
    }
}

/// Write the staging file and fsync it before it is renamed into place.
fn stage(staging: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(staging)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn records_from<T: Record>(document: &Document, path: &Path) -> Result<Vec<T>> {
    match document.get(T::COLLECTION) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => Vec::<T>::deserialize(value).map_err(|source| Error::Corrupt {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// `1` for an empty collection, otherwise one past the largest id.
pub fn next_id<T: Record>(records: &[T]) -> u64 {
    records.iter().map(T::id).max().map_or(1, |max| max + 1)
}

/// Current local date as `YYYY-MM-DD`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Fresh, empty data directory for a test.
#[cfg(test)]
pub(crate) fn scratch_storage(tag: &str) -> Storage {
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let dir = std::env::temp_dir().join(format!(
        "shg_test_{tag}_{}_{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    ));
    let _ = fs::remove_dir_all(&dir);
    Storage::open(&dir).expect("open scratch storage")
}

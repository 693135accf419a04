use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Storage key for the serialized Session blob.
pub const USER_KEY: &str = "user";
/// Storage key for the bare auth token (quick access for the REST client).
pub const TOKEN_KEY: &str = "token";

// 1. SessionStorage Contract

/// SessionStorage
///
/// Defines the abstract contract for the local key-value store holding the
/// persisted session. This is the Rust rendition of browser local storage:
/// operations are synchronous, and they never fail at the call site — an I/O
/// problem is logged and swallowed, leaving the caller in the same position as
/// a browser with storage disabled.
///
/// Exactly two entries are used: `USER_KEY` (serialized Session) and
/// `TOKEN_KEY` (bare token copy). They are written and cleared together;
/// finding only one of them is an inconsistent state the SessionStore treats
/// as "no session".
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// StorageState
///
/// The concrete type used to share the storage access across the client.
pub type StorageState = Arc<dyn SessionStorage>;

// 2. The Real Implementation (one file per key on local disk)

/// FileStorage
///
/// Persists each entry as a single file under the configured storage
/// directory. The directory is created lazily on the first write.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are internal constants, but never allow them to act as paths.
        let safe: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            tracing::error!("storage dir create failed: {:?}", e);
            return;
        }
        if let Err(e) = fs::write(self.path_for(key), value) {
            tracing::error!("storage write failed for {}: {:?}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                tracing::error!("storage remove failed for {}: {:?}", key, e);
            }
        }
    }
}

// 3. The Mock Implementation (For Unit Tests)

/// MemoryStorage
///
/// An in-memory implementation of `SessionStorage` used by tests (and by
/// callers that explicitly want a session for the process lifetime only).
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("storage lock poisoned")
            .remove(key);
    }
}

//! Cache storage module
//!
//! This module provides the key-value stores the router reads from and
//! writes to. Values are decoded response payloads (`serde_json::Value`).
//! Two stores are available: an in-process map and a file-backed store
//! living in the system's standard cache directory.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to determine cache directory location
    #[error("Failed to determine cache directory location")]
    CacheDirectoryNotFound,

    /// Failed to create or access cache directory
    #[error("Failed to create cache directory at {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read cached data
    #[error("Failed to read cache file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write cached data
    #[error("Failed to write cache file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to deserialize cached data
    #[error("Failed to deserialize cache entry {key}: {source}")]
    DeserializationFailed {
        key: String,
        source: serde_json::Error,
    },

    /// Failed to serialize data for caching
    #[error("Failed to serialize data: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// Another thread panicked while holding the store lock
    #[error("Cache lock poisoned")]
    Poisoned,
}

/// Minimal key-value contract the router needs from a cache.
///
/// Implementations decide on expiry and eviction themselves; the router
/// never deletes or expires entries.
pub trait CacheStore {
    /// Returns the payload stored under `key`, or `None` on a miss.
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: &Value) -> Result<(), CacheError>;

    /// Loads an entry and deserializes it into `T`.
    fn load<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        Self: Sized,
        T: DeserializeOwned,
    {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| CacheError::DeserializationFailed {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Serializes `data` and stores it under `key`.
    fn store<T>(&self, key: &str, data: &T) -> Result<(), CacheError>
    where
        Self: Sized,
        T: Serialize,
    {
        let value = serde_json::to_value(data)?;
        self.set(key, &value)
    }
}

/// Process-local cache backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryCache {
    /// Creates an empty in-memory cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    ///
    /// Still answers after a panic poisoned the lock, unlike `get`/`set`.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lists the stored keys in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let map = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        let mut map = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        map.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// On-disk representation of one cache entry
#[derive(Debug, Serialize, Deserialize)]
struct FileEntry {
    /// The original key, kept to detect digest collisions
    key: String,
    /// The cached payload
    value: Value,
}

/// A file-backed cache storage
///
/// Every entry is a JSON file named after the blake3 digest of its key,
/// since keys are full request URLs. Several processes may share the same
/// directory; concurrent writers to one key resolve as last write wins.
#[derive(Debug, Clone)]
pub struct FileCache {
    /// The directory where cached data is stored
    cache_dir: PathBuf,
}

impl FileCache {
    /// Opens or creates a cache storage with the given name
    ///
    /// The cache will be stored in the system's standard cache directory
    /// under a subdirectory named after the application and the provided name.
    /// The name will be sanitized (lowercased, non-alphanumeric characters
    /// replaced with underscores).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tmdb_router::FileCache;
    ///
    /// let cache = FileCache::open("responses").unwrap();
    /// ```
    pub fn open(name: &str) -> Result<Self, CacheError> {
        let proj_dirs = directories::ProjectDirs::from("org", "themoviedb", "tmdb_router")
            .ok_or(CacheError::CacheDirectoryNotFound)?;

        Self::with_dir(proj_dirs.cache_dir().join(sanitize_name(name)))
    }

    /// Opens or creates a cache storage in an explicit directory
    pub fn with_dir(cache_dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let cache_dir = cache_dir.into();

        fs::create_dir_all(&cache_dir).map_err(|e| CacheError::DirectoryCreationFailed {
            path: cache_dir.clone(),
            source: e,
        })?;

        Ok(Self { cache_dir })
    }

    /// Returns the path to the cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = blake3::hash(key.as_bytes());
        self.cache_dir.join(format!("{}.json", digest.to_hex()))
    }
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let file_path = self.entry_path(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&file_path).map_err(|e| CacheError::ReadFailed {
            path: file_path.clone(),
            source: e,
        })?;

        let entry: FileEntry =
            serde_json::from_str(&content).map_err(|e| CacheError::DeserializationFailed {
                key: key.to_string(),
                source: e,
            })?;

        if entry.key != key {
            return Ok(None);
        }

        Ok(Some(entry.value))
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), CacheError> {
        let file_path = self.entry_path(key);
        let entry = FileEntry {
            key: key.to_string(),
            value: value.clone(),
        };
        let content = serde_json::to_string(&entry)?;

        // Write beside the target and rename, so readers never see a partial file
        let temp_path = self.cache_dir.join(format!(".{}.tmp", ulid::Ulid::new()));
        let result = fs::write(&temp_path, content)
            .map_err(|e| CacheError::WriteFailed {
                path: temp_path.clone(),
                source: e,
            })
            .and_then(|()| {
                fs::rename(&temp_path, &file_path).map_err(|e| CacheError::WriteFailed {
                    path: file_path,
                    source: e,
                })
            });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }

        result
    }
}

/// Sanitizes a name for use in file paths
///
/// Converts to lowercase and replaces all characters that are not
/// a-z, 0-9, or hyphen with underscores.
fn sanitize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

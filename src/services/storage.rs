//! Local key-value persistence for the wishlist and user settings.
//!
//! The [`Storage`] trait is what the favorites and preference stores are built
//! on. [`JsonStorage`] keeps a single JSON document on disk and replaces it
//! atomically (write to a temp file, then rename) on every mutation.
//! [`MemoryStorage`] holds the same document in memory only.

use crate::models::FavoriteEntry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors that can occur while reading or writing local storage
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Storage task did not complete: {0}")]
    TaskFailed(String),
}

/// A stored setting value plus when it was last written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingRecord {
    pub value: serde_json::Value,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Persistence backend for favorites and settings
///
/// Every mutating call must be durable by the time it returns `Ok`.
pub trait Storage: Send {
    /// All wishlist entries, ordered by listing id
    fn get_all_favorites(&self) -> Result<Vec<FavoriteEntry>, StorageError>;

    /// Insert or overwrite the entry for `entry.listing.id`
    fn put_favorite(&mut self, entry: &FavoriteEntry) -> Result<(), StorageError>;

    /// Remove an entry. Removing a missing id is not an error.
    fn delete_favorite(&mut self, id: u32) -> Result<(), StorageError>;

    fn clear_favorites(&mut self) -> Result<(), StorageError>;

    fn get_setting(&self, key: &str) -> Result<Option<SettingRecord>, StorageError>;

    /// Overwrite a setting. Last writer wins.
    fn put_setting(&mut self, key: &str, record: &SettingRecord) -> Result<(), StorageError>;
}

/// Storage handle shared by the favorites and preference stores
pub type SharedStorage = Arc<Mutex<dyn Storage>>;

/// Wrap a backend in a [`SharedStorage`] handle
pub fn shared<S: Storage + 'static>(storage: S) -> SharedStorage {
    Arc::new(Mutex::new(storage))
}

/// Lock a shared handle, mapping poisoning to [`StorageError::LockPoisoned`]
pub fn lock(storage: &SharedStorage) -> Result<MutexGuard<'_, dyn Storage + 'static>, StorageError> {
    storage.lock().map_err(|_| StorageError::LockPoisoned)
}

/// On-disk document layout
///
/// ```json
/// {
///   "version": 1,
///   "wishlist": { "7": { "id": 7, "brand": "Tesla", ..., "savedAt": "..." } },
///   "settings": { "theme": { "value": "dark", "updatedAt": "..." } }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    version: u32,
    #[serde(default)]
    wishlist: BTreeMap<u32, FavoriteEntry>,
    #[serde(default)]
    settings: HashMap<String, SettingRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            wishlist: BTreeMap::new(),
            settings: HashMap::new(),
        }
    }
}

/// JSON file storage backend
///
/// The whole document is kept in memory. A mutation is applied to a copy,
/// the copy is written to disk, and only then does it replace the in-memory
/// document. A failed write leaves the previous state intact.
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
}

impl JsonStorage {
    /// Open or create the storage file
    ///
    /// Parent directories are created as needed. A missing file starts empty.
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening JSON storage");

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no existing storage file, starting empty");
            StorageData::default()
        };

        tracing::info!(
            path = ?file_path,
            wishlist_count = data.wishlist.len(),
            settings_count = data.settings.len(),
            "JSON storage ready"
        );

        Ok(Self { file_path, data })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData, StorageError> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)?;
        tracing::debug!(version = data.version, "loaded storage data");
        Ok(data)
    }

    fn write_to_file(&self, data: &StorageData) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing temporary file");
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }

    /// Apply `mutate` to a copy, persist it, then commit it
    fn commit<F>(&mut self, mutate: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut StorageData),
    {
        let mut next = self.data.clone();
        mutate(&mut next);
        self.write_to_file(&next)?;
        self.data = next;
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn get_all_favorites(&self) -> Result<Vec<FavoriteEntry>, StorageError> {
        Ok(self.data.wishlist.values().cloned().collect())
    }

    fn put_favorite(&mut self, entry: &FavoriteEntry) -> Result<(), StorageError> {
        let _span = tracing::debug_span!("json_put_favorite", id = entry.id()).entered();
        let entry = entry.clone();
        self.commit(|data| {
            data.wishlist.insert(entry.id(), entry);
        })
    }

    fn delete_favorite(&mut self, id: u32) -> Result<(), StorageError> {
        let _span = tracing::debug_span!("json_delete_favorite", id = id).entered();
        self.commit(|data| {
            data.wishlist.remove(&id);
        })
    }

    fn clear_favorites(&mut self) -> Result<(), StorageError> {
        let _span = tracing::debug_span!("json_clear_favorites").entered();
        self.commit(|data| data.wishlist.clear())
    }

    fn get_setting(&self, key: &str) -> Result<Option<SettingRecord>, StorageError> {
        Ok(self.data.settings.get(key).cloned())
    }

    fn put_setting(&mut self, key: &str, record: &SettingRecord) -> Result<(), StorageError> {
        let _span = tracing::debug_span!("json_put_setting", key = %key).entered();
        let record = record.clone();
        self.commit(|data| {
            data.settings.insert(key.to_string(), record);
        })
    }
}

/// In-memory backend with no durability
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: StorageData,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_all_favorites(&self) -> Result<Vec<FavoriteEntry>, StorageError> {
        Ok(self.data.wishlist.values().cloned().collect())
    }

    fn put_favorite(&mut self, entry: &FavoriteEntry) -> Result<(), StorageError> {
        self.data.wishlist.insert(entry.id(), entry.clone());
        Ok(())
    }

    fn delete_favorite(&mut self, id: u32) -> Result<(), StorageError> {
        self.data.wishlist.remove(&id);
        Ok(())
    }

    fn clear_favorites(&mut self) -> Result<(), StorageError> {
        self.data.wishlist.clear();
        Ok(())
    }

    fn get_setting(&self, key: &str) -> Result<Option<SettingRecord>, StorageError> {
        Ok(self.data.settings.get(key).cloned())
    }

    fn put_setting(&mut self, key: &str, record: &SettingRecord) -> Result<(), StorageError> {
        self.data.settings.insert(key.to_string(), record.clone());
        Ok(())
    }
}

// Service exports
pub mod favorites;
pub mod listings;
pub mod preferences;
pub mod storage;

pub use favorites::FavoritesStore;
pub use listings::{ListingRepository, ListingSource, ListingError};
pub use preferences::{PreferenceStore, THEME_KEY};
pub use storage::{Storage, JsonStorage, MemoryStorage, SharedStorage, SettingRecord, StorageError, shared};

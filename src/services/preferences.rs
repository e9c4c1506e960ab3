use crate::models::{Preference, Theme};
use crate::services::storage::{lock, SettingRecord, SharedStorage, StorageError};

/// Fixed settings key for the display theme
pub const THEME_KEY: &str = "theme";

/// Single-key theme preference on top of the shared storage
#[derive(Clone)]
pub struct PreferenceStore {
    storage: SharedStorage,
}

impl PreferenceStore {
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Overwrite the stored theme
    pub fn save(&self, theme: Theme) -> Result<Preference, StorageError> {
        let record = SettingRecord {
            value: serde_json::to_value(theme)?,
            updated_at: chrono::Utc::now(),
        };
        lock(&self.storage)?.put_setting(THEME_KEY, &record)?;

        tracing::info!(theme = ?theme, "theme preference saved");
        Ok(Preference {
            theme,
            updated_at: record.updated_at,
        })
    }

    /// Stored theme, or `None` if it was never set
    pub fn load(&self) -> Result<Option<Preference>, StorageError> {
        let record = match lock(&self.storage)?.get_setting(THEME_KEY)? {
            Some(record) => record,
            None => return Ok(None),
        };

        let theme: Theme = serde_json::from_value(record.value)?;
        Ok(Some(Preference {
            theme,
            updated_at: record.updated_at,
        }))
    }
}

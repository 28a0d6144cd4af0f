use shared::{now_timestamp, FarmSettings, FarmSettingsPatch};
use tracing::info;

use crate::storage::connection::DbConnection;
use crate::storage::error::StorageError;
use crate::storage::record_store::{Mutable, Record, RecordStore};
use crate::storage::schema::{StoreSchema, SETTINGS};

impl Record for FarmSettings {
    const SCHEMA: &'static StoreSchema = &SETTINGS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Mutable for FarmSettings {
    type Patch = FarmSettingsPatch;
}

/// Repository for the single farm settings record
#[derive(Clone)]
pub struct SettingsRepository {
    store: RecordStore<FarmSettings>,
}

impl SettingsRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            store: RecordStore::new(db),
        }
    }

    /// Current settings, writing the defaults first if none exist yet
    pub async fn get(&self) -> Result<FarmSettings, StorageError> {
        if let Some(settings) = self.store.get_by_id(FarmSettings::SINGLETON_ID).await? {
            return Ok(settings);
        }

        let defaults = FarmSettings::defaults(now_timestamp());
        if self.store.insert_if_absent(&defaults).await? {
            info!("Created default farm settings");
            return Ok(defaults);
        }

        // Another caller created the record between our read and insert
        self.store
            .get_by_id(FarmSettings::SINGLETON_ID)
            .await
            .map(|settings| settings.unwrap_or(defaults))
    }

    pub async fn update(&self, patch: &FarmSettingsPatch) -> Result<FarmSettings, StorageError> {
        let current = self.get().await?;
        let updated = self.store.update(FarmSettings::SINGLETON_ID, patch).await?;
        Ok(updated.unwrap_or(current))
    }
}

use shared::{Activity, ActivityPatch, ActivityStatus, ActivityType, NewActivity};

use crate::storage::connection::DbConnection;
use crate::storage::error::StorageError;
use crate::storage::record_store::{Creatable, Mutable, Record, RecordStore};
use crate::storage::schema::{StoreSchema, ACTIVITIES};

impl Record for Activity {
    const SCHEMA: &'static StoreSchema = &ACTIVITIES;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Creatable for Activity {
    type New = NewActivity;
}

impl Mutable for Activity {
    type Patch = ActivityPatch;
}

/// Repository for farm activities (crop seasons, herds, services)
#[derive(Clone)]
pub struct ActivityRepository {
    store: RecordStore<Activity>,
}

impl ActivityRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            store: RecordStore::new(db),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Activity>, StorageError> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Activity>, StorageError> {
        self.store.get_by_id(id).await
    }

    pub async fn get_by_index(&self, index: &str, value: &str) -> Result<Vec<Activity>, StorageError> {
        self.store.get_by_index(index, value).await
    }

    pub async fn add(&self, data: &NewActivity) -> Result<Activity, StorageError> {
        self.store.add(data).await
    }

    pub async fn update(&self, id: &str, patch: &ActivityPatch) -> Result<Option<Activity>, StorageError> {
        self.store.update(id, patch).await
    }

    /// Records, transactions and labor entries tagged with the activity stay behind
    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete(id).await
    }

    pub async fn get_active(&self) -> Result<Vec<Activity>, StorageError> {
        self.store
            .get_by_index("by-status", ActivityStatus::Active.as_str())
            .await
    }

    pub async fn get_by_type(&self, activity_type: ActivityType) -> Result<Vec<Activity>, StorageError> {
        self.store.get_by_index("by-type", activity_type.as_str()).await
    }
}

use shared::{Asset, AssetCategory, AssetPatch, AssetStatus, NewAsset};

use crate::storage::connection::DbConnection;
use crate::storage::error::StorageError;
use crate::storage::record_store::{Creatable, Mutable, Record, RecordStore};
use crate::storage::schema::{StoreSchema, ASSETS};

impl Record for Asset {
    const SCHEMA: &'static StoreSchema = &ASSETS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Creatable for Asset {
    type New = NewAsset;
}

impl Mutable for Asset {
    type Patch = AssetPatch;
}

/// Repository for depreciable farm assets
#[derive(Clone)]
pub struct AssetRepository {
    store: RecordStore<Asset>,
}

impl AssetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            store: RecordStore::new(db),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Asset>, StorageError> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Asset>, StorageError> {
        self.store.get_by_id(id).await
    }

    pub async fn get_by_index(&self, index: &str, value: &str) -> Result<Vec<Asset>, StorageError> {
        self.store.get_by_index(index, value).await
    }

    pub async fn add(&self, data: &NewAsset) -> Result<Asset, StorageError> {
        self.store.add(data).await
    }

    pub async fn update(&self, id: &str, patch: &AssetPatch) -> Result<Option<Asset>, StorageError> {
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete(id).await
    }

    pub async fn get_active(&self) -> Result<Vec<Asset>, StorageError> {
        self.store
            .get_by_index("by-status", AssetStatus::Active.as_str())
            .await
    }

    pub async fn get_by_category(&self, category: AssetCategory) -> Result<Vec<Asset>, StorageError> {
        self.store.get_by_index("by-category", category.as_str()).await
    }
}

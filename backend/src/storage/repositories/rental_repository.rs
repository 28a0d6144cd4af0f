use shared::{NewRental, Rental, RentalPatch, RentalStatus};

use crate::storage::connection::DbConnection;
use crate::storage::error::StorageError;
use crate::storage::record_store::{Creatable, Mutable, Record, RecordStore};
use crate::storage::schema::{StoreSchema, RENTALS};

impl Record for Rental {
    const SCHEMA: &'static StoreSchema = &RENTALS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Creatable for Rental {
    type New = NewRental;
}

impl Mutable for Rental {
    type Patch = RentalPatch;
}

/// Repository for assets rented out to third parties
#[derive(Clone)]
pub struct RentalRepository {
    store: RecordStore<Rental>,
}

impl RentalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            store: RecordStore::new(db),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Rental>, StorageError> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Rental>, StorageError> {
        self.store.get_by_id(id).await
    }

    pub async fn get_by_index(&self, index: &str, value: &str) -> Result<Vec<Rental>, StorageError> {
        self.store.get_by_index(index, value).await
    }

    pub async fn add(&self, data: &NewRental) -> Result<Rental, StorageError> {
        self.store.add(data).await
    }

    pub async fn update(&self, id: &str, patch: &RentalPatch) -> Result<Option<Rental>, StorageError> {
        self.store.update(id, patch).await
    }

    /// Payments recorded against the rental are kept
    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete(id).await
    }

    pub async fn get_active(&self) -> Result<Vec<Rental>, StorageError> {
        self.store
            .get_by_index("by-status", RentalStatus::Active.as_str())
            .await
    }

    pub async fn get_by_asset(&self, asset_id: &str) -> Result<Vec<Rental>, StorageError> {
        self.store.get_by_index("by-asset", asset_id).await
    }
}

use shared::{DateRange, NewRentalPayment, RentalPayment};

use crate::storage::connection::DbConnection;
use crate::storage::error::StorageError;
use crate::storage::record_store::{Creatable, Record, RecordStore};
use crate::storage::schema::{StoreSchema, RENTAL_PAYMENTS};

impl Record for RentalPayment {
    const SCHEMA: &'static StoreSchema = &RENTAL_PAYMENTS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Creatable for RentalPayment {
    type New = NewRentalPayment;
    const TRACKS_UPDATES: bool = false;
}

/// Repository for rental payments. Payments are append-only: they can be
/// recorded and removed but never edited.
#[derive(Clone)]
pub struct RentalPaymentRepository {
    store: RecordStore<RentalPayment>,
}

impl RentalPaymentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            store: RecordStore::new(db),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<RentalPayment>, StorageError> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<RentalPayment>, StorageError> {
        self.store.get_by_id(id).await
    }

    pub async fn get_by_index(&self, index: &str, value: &str) -> Result<Vec<RentalPayment>, StorageError> {
        self.store.get_by_index(index, value).await
    }

    pub async fn add(&self, data: &NewRentalPayment) -> Result<RentalPayment, StorageError> {
        self.store.add(data).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete(id).await
    }

    pub async fn get_by_rental(&self, rental_id: &str) -> Result<Vec<RentalPayment>, StorageError> {
        self.store.get_by_index("by-rental", rental_id).await
    }

    pub async fn get_by_date_range(&self, range: &DateRange) -> Result<Vec<RentalPayment>, StorageError> {
        self.store
            .get_by_index_range("by-date", &range.start, &range.end)
            .await
    }
}

use shared::{DateRange, NewTransaction, Transaction, TransactionPatch, TransactionType};

use crate::storage::connection::DbConnection;
use crate::storage::error::StorageError;
use crate::storage::record_store::{Creatable, Mutable, Record, RecordStore};
use crate::storage::schema::{StoreSchema, TRANSACTIONS};

impl Record for Transaction {
    const SCHEMA: &'static StoreSchema = &TRANSACTIONS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Creatable for Transaction {
    type New = NewTransaction;
}

impl Mutable for Transaction {
    type Patch = TransactionPatch;
}

/// Repository for cashbook transactions
#[derive(Clone)]
pub struct TransactionRepository {
    store: RecordStore<Transaction>,
}

impl TransactionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            store: RecordStore::new(db),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Transaction>, StorageError> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Transaction>, StorageError> {
        self.store.get_by_id(id).await
    }

    pub async fn get_by_index(&self, index: &str, value: &str) -> Result<Vec<Transaction>, StorageError> {
        self.store.get_by_index(index, value).await
    }

    pub async fn add(&self, data: &NewTransaction) -> Result<Transaction, StorageError> {
        self.store.add(data).await
    }

    pub async fn update(
        &self,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<Option<Transaction>, StorageError> {
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete(id).await
    }

    pub async fn get_by_date(&self, date: &str) -> Result<Vec<Transaction>, StorageError> {
        self.store.get_by_index("by-date", date).await
    }

    /// Transactions dated within `range`, both ends inclusive
    pub async fn get_by_date_range(&self, range: &DateRange) -> Result<Vec<Transaction>, StorageError> {
        self.store
            .get_by_index_range("by-date", &range.start, &range.end)
            .await
    }

    pub async fn get_by_type(
        &self,
        transaction_type: TransactionType,
    ) -> Result<Vec<Transaction>, StorageError> {
        self.store
            .get_by_index("by-type", transaction_type.as_str())
            .await
    }

    pub async fn get_by_category(&self, category: &str) -> Result<Vec<Transaction>, StorageError> {
        self.store.get_by_index("by-category", category).await
    }
}

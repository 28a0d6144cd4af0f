use shared::{DateRange, LaborEntry, LaborEntryPatch, NewLaborEntry};

use crate::storage::connection::DbConnection;
use crate::storage::error::StorageError;
use crate::storage::record_store::{Creatable, Mutable, Record, RecordStore};
use crate::storage::schema::{StoreSchema, LABOR_ENTRIES};

impl Record for LaborEntry {
    const SCHEMA: &'static StoreSchema = &LABOR_ENTRIES;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Creatable for LaborEntry {
    type New = NewLaborEntry;
}

impl Mutable for LaborEntry {
    type Patch = LaborEntryPatch;
}

/// Repository for labor entries
#[derive(Clone)]
pub struct LaborEntryRepository {
    store: RecordStore<LaborEntry>,
}

impl LaborEntryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            store: RecordStore::new(db),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<LaborEntry>, StorageError> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<LaborEntry>, StorageError> {
        self.store.get_by_id(id).await
    }

    pub async fn get_by_index(&self, index: &str, value: &str) -> Result<Vec<LaborEntry>, StorageError> {
        self.store.get_by_index(index, value).await
    }

    pub async fn add(&self, data: &NewLaborEntry) -> Result<LaborEntry, StorageError> {
        self.store.add(data).await
    }

    pub async fn update(
        &self,
        id: &str,
        patch: &LaborEntryPatch,
    ) -> Result<Option<LaborEntry>, StorageError> {
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete(id).await
    }

    pub async fn get_by_date(&self, date: &str) -> Result<Vec<LaborEntry>, StorageError> {
        self.store.get_by_index("by-date", date).await
    }

    pub async fn get_by_date_range(&self, range: &DateRange) -> Result<Vec<LaborEntry>, StorageError> {
        self.store
            .get_by_index_range("by-date", &range.start, &range.end)
            .await
    }

    pub async fn get_by_employee(&self, employee_id: &str) -> Result<Vec<LaborEntry>, StorageError> {
        self.store.get_by_index("by-employee", employee_id).await
    }

    pub async fn get_by_activity(&self, activity_id: &str) -> Result<Vec<LaborEntry>, StorageError> {
        self.store.get_by_index("by-activity", activity_id).await
    }
}

use shared::{ActivityRecord, ActivityRecordPatch, DateRange, NewActivityRecord};

use crate::storage::connection::DbConnection;
use crate::storage::error::StorageError;
use crate::storage::record_store::{Creatable, Mutable, Record, RecordStore};
use crate::storage::schema::{StoreSchema, ACTIVITY_RECORDS};

impl Record for ActivityRecord {
    const SCHEMA: &'static StoreSchema = &ACTIVITY_RECORDS;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Creatable for ActivityRecord {
    type New = NewActivityRecord;
}

impl Mutable for ActivityRecord {
    type Patch = ActivityRecordPatch;
}

#[derive(Clone)]
pub struct ActivityRecordRepository {
    store: RecordStore<ActivityRecord>,
}

impl ActivityRecordRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            store: RecordStore::new(db),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<ActivityRecord>, StorageError> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<ActivityRecord>, StorageError> {
        self.store.get_by_id(id).await
    }

    pub async fn get_by_index(
        &self,
        index: &str,
        value: &str,
    ) -> Result<Vec<ActivityRecord>, StorageError> {
        self.store.get_by_index(index, value).await
    }

    pub async fn add(&self, data: &NewActivityRecord) -> Result<ActivityRecord, StorageError> {
        self.store.add(data).await
    }

    pub async fn update(
        &self,
        id: &str,
        patch: &ActivityRecordPatch,
    ) -> Result<Option<ActivityRecord>, StorageError> {
        self.store.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete(id).await
    }

    pub async fn get_by_activity(&self, activity_id: &str) -> Result<Vec<ActivityRecord>, StorageError> {
        self.store.get_by_index("by-activity", activity_id).await
    }

    pub async fn get_by_date_range(&self, range: &DateRange) -> Result<Vec<ActivityRecord>, StorageError> {
        self.store
            .get_by_index_range("by-date", &range.start, &range.end)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_grouped_by_activity() {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        let repo = ActivityRecordRepository::new(db);

        for (activity_id, income) in [("maize", 5000.0), ("maize", 3000.0), ("dairy", 900.0)] {
            repo.add(&NewActivityRecord {
                activity_id: activity_id.to_string(),
                date: "2025-06-10".to_string(),
                income: Some(income),
                ..Default::default()
            })
            .await
            .unwrap();
        }

        let maize = repo.get_by_activity("maize").await.unwrap();
        let total: f64 = maize.iter().filter_map(|r| r.income).sum();
        assert_eq!(maize.len(), 2);
        assert_eq!(total, 8000.0);

        let stored = serde_json::to_value(&maize[0]).unwrap();
        assert!(stored.get("expense").is_none());
    }
}

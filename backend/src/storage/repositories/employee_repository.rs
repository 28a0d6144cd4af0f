use shared::{Employee, EmployeePatch, EmployeeStatus, NewEmployee};

use crate::storage::connection::DbConnection;
use crate::storage::error::StorageError;
use crate::storage::record_store::{Creatable, Mutable, Record, RecordStore};
use crate::storage::schema::{StoreSchema, EMPLOYEES};

impl Record for Employee {
    const SCHEMA: &'static StoreSchema = &EMPLOYEES;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Creatable for Employee {
    type New = NewEmployee;
}

impl Mutable for Employee {
    type Patch = EmployeePatch;
}

/// Repository for employees
#[derive(Clone)]
pub struct EmployeeRepository {
    store: RecordStore<Employee>,
}

impl EmployeeRepository {
    pub fn new(db: DbConnection) -> Self {
        Self {
            store: RecordStore::new(db),
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Employee>, StorageError> {
        self.store.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Employee>, StorageError> {
        self.store.get_by_id(id).await
    }

    pub async fn get_by_index(&self, index: &str, value: &str) -> Result<Vec<Employee>, StorageError> {
        self.store.get_by_index(index, value).await
    }

    pub async fn add(&self, data: &NewEmployee) -> Result<Employee, StorageError> {
        self.store.add(data).await
    }

    pub async fn update(&self, id: &str, patch: &EmployeePatch) -> Result<Option<Employee>, StorageError> {
        self.store.update(id, patch).await
    }

    /// Labor entries that reference the employee are left in place
    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        self.store.delete(id).await
    }

    pub async fn get_active(&self) -> Result<Vec<Employee>, StorageError> {
        self.store
            .get_by_index("by-status", EmployeeStatus::Active.as_str())
            .await
    }
}

//! Generic CRUD over a single store.
//!
//! Records are persisted as their serde JSON form, which is also the backup
//! format. The repository contract lives here once; the typed repositories only
//! add entity-specific queries.

use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::{Map, Value};
use shared::{generate_id, now_timestamp};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use std::marker::PhantomData;
use tracing::debug;

use super::connection::DbConnection;
use super::error::StorageError;
use super::schema::StoreSchema;

/// An entity persisted in its own store, keyed by `id`
pub trait Record: Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    const SCHEMA: &'static StoreSchema;

    fn id(&self) -> &str;
}

/// A record created through `add`, which assigns the id and timestamps
pub trait Creatable: Record {
    /// Caller-supplied fields: everything except `id`, `createdAt`, `updatedAt`
    type New: Serialize + Send + Sync;

    /// Whether the record carries an `updatedAt` field
    const TRACKS_UPDATES: bool = true;
}

/// A record that accepts partial updates
pub trait Mutable: Record {
    /// Fields left as `None` are kept from the stored record
    type Patch: Serialize + Send + Sync;
}

/// Typed access to one store
pub struct RecordStore<E> {
    db: DbConnection,
    _record: PhantomData<fn() -> E>,
}

impl<E> Clone for RecordStore<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _record: PhantomData,
        }
    }
}

impl<E: Record> RecordStore<E> {
    pub fn new(db: DbConnection) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    /// Every record in the store; order is not guaranteed
    pub async fn get_all(&self) -> Result<Vec<E>, StorageError> {
        let sql = format!("SELECT id, data FROM {}", E::SCHEMA.table);
        let rows = sqlx::query(&sql).fetch_all(self.db.pool()).await?;
        rows.iter().map(decode).collect()
    }

    /// Records whose indexed field equals `value`
    pub async fn get_by_index(&self, index: &str, value: &str) -> Result<Vec<E>, StorageError> {
        let expression = index_expression::<E>(index)?;
        let sql = format!(
            "SELECT id, data FROM {} WHERE {} = ?",
            E::SCHEMA.table,
            expression
        );
        let rows = sqlx::query(&sql)
            .bind(value)
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(decode).collect()
    }

    /// Records whose indexed field lies in `start..=end`, compared as strings
    pub async fn get_by_index_range(
        &self,
        index: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<E>, StorageError> {
        let expression = index_expression::<E>(index)?;
        let sql = format!(
            "SELECT id, data FROM {} WHERE {expression} >= ? AND {expression} <= ?",
            E::SCHEMA.table
        );
        let rows = sqlx::query(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(self.db.pool())
            .await?;
        rows.iter().map(decode).collect()
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<E>, StorageError> {
        let sql = format!("SELECT id, data FROM {} WHERE id = ?", E::SCHEMA.table);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;
        row.as_ref().map(decode).transpose()
    }

    pub async fn count(&self) -> Result<i64, StorageError> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::SCHEMA.table);
        let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(self.db.pool()).await?;
        Ok(count)
    }

    /// Remove a record. Deleting an id that does not exist is not an error.
    pub async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", E::SCHEMA.table);
        let result = sqlx::query(&sql).bind(id).execute(self.db.pool()).await?;
        debug!(
            store = E::SCHEMA.name,
            id,
            removed = result.rows_affected(),
            "record deleted"
        );
        Ok(())
    }

    /// Store `record` unless a record with the same id already exists.
    /// Returns whether it was written.
    pub async fn insert_if_absent(&self, record: &E) -> Result<bool, StorageError> {
        let sql = format!(
            "INSERT OR IGNORE INTO {} (id, data) VALUES (?, ?)",
            E::SCHEMA.table
        );
        let result = sqlx::query(&sql)
            .bind(record.id())
            .bind(encode(record)?)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read the whole store through an open connection or transaction
    pub async fn fetch_all_in(conn: &mut SqliteConnection) -> Result<Vec<E>, StorageError> {
        let sql = format!("SELECT id, data FROM {}", E::SCHEMA.table);
        let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;
        rows.iter().map(decode).collect()
    }

    /// Insert a record verbatim, keeping its id and timestamps. Fails if the id
    /// is already taken.
    pub async fn insert_in(conn: &mut SqliteConnection, record: &E) -> Result<(), StorageError> {
        let sql = format!("INSERT INTO {} (id, data) VALUES (?, ?)", E::SCHEMA.table);
        sqlx::query(&sql)
            .bind(record.id())
            .bind(encode(record)?)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

impl<E: Creatable> RecordStore<E> {
    /// Persist a new record. The id and timestamps are always assigned here,
    /// never taken from the caller.
    pub async fn add(&self, data: &E::New) -> Result<E, StorageError> {
        let mut fields = to_object::<E, _>(data)?;
        let now = now_timestamp();
        fields.insert("id".to_string(), Value::String(generate_id()));
        fields.insert("createdAt".to_string(), Value::String(now.clone()));
        if E::TRACKS_UPDATES {
            fields.insert("updatedAt".to_string(), Value::String(now));
        }

        let record: E = serde_json::from_value(Value::Object(fields)).map_err(|source| {
            StorageError::Encode {
                store: E::SCHEMA.name,
                source,
            }
        })?;

        let sql = format!("INSERT INTO {} (id, data) VALUES (?, ?)", E::SCHEMA.table);
        sqlx::query(&sql)
            .bind(record.id())
            .bind(encode(&record)?)
            .execute(self.db.pool())
            .await?;

        debug!(store = E::SCHEMA.name, id = record.id(), "record added");
        Ok(record)
    }
}

impl<E: Mutable> RecordStore<E> {
    /// Shallow-merge `patch` over the stored record.
    ///
    /// Returns `None` without writing when the id does not exist. The id is
    /// never changed and `updatedAt` is always refreshed.
    pub async fn update(&self, id: &str, patch: &E::Patch) -> Result<Option<E>, StorageError> {
        let changes = to_object::<E, _>(patch)?;

        let mut tx = self.db.pool().begin().await?;
        let select = format!("SELECT id, data FROM {} WHERE id = ?", E::SCHEMA.table);
        let Some(row) = sqlx::query(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let data: String = row.get("data");
        let mut fields = match serde_json::from_str::<Value>(&data) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => {
                return Err(StorageError::Corrupt {
                    store: E::SCHEMA.name,
                    id: id.to_string(),
                    source: serde_json::Error::custom("stored record is not a JSON object"),
                })
            }
            Err(source) => {
                return Err(StorageError::Corrupt {
                    store: E::SCHEMA.name,
                    id: id.to_string(),
                    source,
                })
            }
        };

        fields.extend(changes);
        fields.insert("id".to_string(), Value::String(id.to_string()));
        fields.insert("updatedAt".to_string(), Value::String(now_timestamp()));

        let record: E = serde_json::from_value(Value::Object(fields)).map_err(|source| {
            StorageError::Encode {
                store: E::SCHEMA.name,
                source,
            }
        })?;

        let update = format!("UPDATE {} SET data = ? WHERE id = ?", E::SCHEMA.table);
        sqlx::query(&update)
            .bind(encode(&record)?)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!(store = E::SCHEMA.name, id, "record updated");
        Ok(Some(record))
    }
}

/// Delete every record in a store
pub async fn clear_in(conn: &mut SqliteConnection, store: &StoreSchema) -> Result<u64, StorageError> {
    let sql = format!("DELETE FROM {}", store.table);
    let result = sqlx::query(&sql).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

fn index_expression<E: Record>(index: &str) -> Result<String, StorageError> {
    E::SCHEMA
        .index(index)
        .map(|index| index.expression())
        .ok_or_else(|| StorageError::UnknownIndex {
            store: E::SCHEMA.name,
            index: index.to_string(),
        })
}

fn decode<E: Record>(row: &SqliteRow) -> Result<E, StorageError> {
    let data: String = row.get("data");
    serde_json::from_str(&data).map_err(|source| StorageError::Corrupt {
        store: E::SCHEMA.name,
        id: row.get("id"),
        source,
    })
}

fn encode<E: Record>(record: &E) -> Result<String, StorageError> {
    serde_json::to_string(record).map_err(|source| StorageError::Encode {
        store: E::SCHEMA.name,
        source,
    })
}

fn to_object<E: Record, T: Serialize>(value: &T) -> Result<Map<String, Value>, StorageError> {
    let encode_error = |source: serde_json::Error| StorageError::Encode {
        store: E::SCHEMA.name,
        source,
    };
    match serde_json::to_value(value).map_err(encode_error)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(encode_error(serde_json::Error::custom(
            "record fields must serialize to a JSON object",
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{NewTransaction, Transaction, TransactionPatch, TransactionType};

    async fn setup_test() -> RecordStore<Transaction> {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        RecordStore::new(db)
    }

    fn new_transaction(date: &str, amount: f64) -> NewTransaction {
        NewTransaction {
            date: date.to_string(),
            transaction_type: TransactionType::Income,
            category: "Milk sales".to_string(),
            description: "Morning delivery".to_string(),
            amount,
            activity_id: None,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_timestamps() {
        let store = setup_test().await;
        let added = store.add(&new_transaction("2025-06-14", 1500.0)).await.unwrap();

        assert!(!added.id.is_empty());
        assert_eq!(added.created_at, added.updated_at);
        assert_eq!(added.amount, 1500.0);

        let fetched = store.get_by_id(&added.id).await.unwrap();
        assert_eq!(fetched, Some(added));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let store = setup_test().await;
        assert_eq!(store.get_by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_writes_nothing() {
        let store = setup_test().await;
        store.add(&new_transaction("2025-06-14", 10.0)).await.unwrap();

        let patch = TransactionPatch {
            amount: Some(99.0),
            ..Default::default()
        };
        let result = store.update("missing", &patch).await.unwrap();

        assert!(result.is_none());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_patch_only_refreshes_updated_at() {
        let store = setup_test().await;
        let added = store.add(&new_transaction("2025-06-14", 10.0)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = store
            .update(&added.id, &TransactionPatch::default())
            .await
            .unwrap()
            .unwrap();

        assert_ne!(updated.updated_at, added.updated_at);
        assert_eq!(
            Transaction {
                updated_at: added.updated_at.clone(),
                ..updated
            },
            added
        );
    }

    #[tokio::test]
    async fn test_patch_wins_and_can_clear_optional_fields() {
        let store = setup_test().await;
        let mut data = new_transaction("2025-06-14", 10.0);
        data.activity_id = Some("maize-2025".to_string());
        let added = store.add(&data).await.unwrap();

        let patch = TransactionPatch {
            amount: Some(25.0),
            activity_id: Some(None),
            ..Default::default()
        };
        let updated = store.update(&added.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.id, added.id);
        assert_eq!(updated.amount, 25.0);
        assert_eq!(updated.activity_id, None);
        assert_eq!(updated.category, added.category);
        assert_eq!(updated.created_at, added.created_at);
        assert_eq!(store.get_by_id(&added.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = setup_test().await;
        let added = store.add(&new_transaction("2025-06-14", 10.0)).await.unwrap();

        store.delete(&added.id).await.unwrap();
        store.delete(&added.id).await.unwrap();
        store.delete("never-existed").await.unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_index_queries() {
        let store = setup_test().await;
        store.add(&new_transaction("2025-05-31", 1.0)).await.unwrap();
        store.add(&new_transaction("2025-06-01", 2.0)).await.unwrap();
        store.add(&new_transaction("2025-06-30", 3.0)).await.unwrap();
        store.add(&new_transaction("2025-07-01", 4.0)).await.unwrap();

        let june = store
            .get_by_index_range("by-date", "2025-06-01", "2025-06-30")
            .await
            .unwrap();
        let mut amounts: Vec<f64> = june.iter().map(|t| t.amount).collect();
        amounts.sort_by(f64::total_cmp);
        assert_eq!(amounts, vec![2.0, 3.0]);

        let exact = store.get_by_index("by-date", "2025-07-01").await.unwrap();
        assert_eq!(exact.len(), 1);

        let income = store.get_by_index("by-type", "income").await.unwrap();
        assert_eq!(income.len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_index_is_rejected() {
        let store = setup_test().await;
        let result = store.get_by_index("by-colour", "red").await;
        assert!(matches!(result, Err(StorageError::UnknownIndex { .. })));
    }
}

//! Whole-database export and restore.
//!
//! A backup is one JSON document with an array per store (see
//! [`ExportDocument`]). Restoring replaces every store with the document's
//! contents, keeping ids and timestamps as found.
//!
//! Restore parses and type-checks the entire document before touching the
//! database, then clears and refills every store inside a single SQLite
//! transaction. A malformed document changes nothing; a failed insert rolls the
//! whole restore back.

use serde::de::Error as _;
use serde_json::Value;
use shared::{now_timestamp, ExportDocument, ImportReport, StoreCount};
use sqlx::SqliteConnection;
use tracing::{error, info, warn};

use crate::storage::record_store::{clear_in, Record};
use crate::storage::schema::ALL_STORES;
use crate::storage::{DbConnection, RecordStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("Backup document is not valid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to restore {store}; nothing was changed")]
    Write {
        store: &'static str,
        #[source]
        source: StorageError,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct BackupService {
    db: DbConnection,
}

impl BackupService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Read every store from one consistent snapshot
    pub async fn export_document(&self) -> Result<ExportDocument, BackupError> {
        let mut tx = self.db.pool().begin().await.map_err(StorageError::from)?;

        let document = ExportDocument {
            transactions: RecordStore::fetch_all_in(&mut tx).await?,
            employees: RecordStore::fetch_all_in(&mut tx).await?,
            labor_entries: RecordStore::fetch_all_in(&mut tx).await?,
            activities: RecordStore::fetch_all_in(&mut tx).await?,
            activity_records: RecordStore::fetch_all_in(&mut tx).await?,
            assets: RecordStore::fetch_all_in(&mut tx).await?,
            rentals: RecordStore::fetch_all_in(&mut tx).await?,
            rental_payments: RecordStore::fetch_all_in(&mut tx).await?,
            settings: RecordStore::fetch_all_in(&mut tx).await?,
            exported_at: Some(now_timestamp()),
        };
        tx.commit().await.map_err(StorageError::from)?;

        info!("Exported {} records", record_counts(&document).total_records);
        Ok(document)
    }

    /// Export as pretty-printed JSON
    pub async fn export_all(&self) -> Result<String, BackupError> {
        let document = self.export_document().await?;
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Parse `document` and replace the database contents with it. Anything
    /// but a JSON object is rejected before the database is touched.
    pub async fn import_all(&self, document: &str) -> Result<ImportReport, BackupError> {
        let document = parse_document(document).map_err(|err| {
            warn!("Rejected backup document: {}", err);
            BackupError::Parse(err)
        })?;
        self.restore(&document).await
    }

    /// Replace the contents of every store with `document`
    pub async fn restore(&self, document: &ExportDocument) -> Result<ImportReport, BackupError> {
        info!(
            "Restoring backup exported at {}",
            document.exported_at.as_deref().unwrap_or("an unknown time")
        );

        let mut tx = self.db.pool().begin().await.map_err(StorageError::from)?;
        match replace_all(&mut tx, document).await {
            Ok(()) => {
                tx.commit().await.map_err(StorageError::from)?;
                let report = record_counts(document);
                info!("Restored {} records", report.total_records);
                Ok(report)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    error!("Failed to roll back restore: {}", rollback);
                } else {
                    warn!("Restore rolled back: {}", e);
                }
                Err(e)
            }
        }
    }
}

fn parse_document(document: &str) -> Result<ExportDocument, serde_json::Error> {
    match serde_json::from_str::<Value>(document)? {
        value @ Value::Object(_) => serde_json::from_value(value),
        _ => Err(serde_json::Error::custom("backup document must be a JSON object")),
    }
}

async fn replace_all(conn: &mut SqliteConnection, document: &ExportDocument) -> Result<(), BackupError> {
    for store in ALL_STORES {
        clear_in(conn, store).await.map_err(|source| BackupError::Write {
            store: store.name,
            source,
        })?;
    }

    insert_all(conn, &document.transactions).await?;
    insert_all(conn, &document.employees).await?;
    insert_all(conn, &document.labor_entries).await?;
    insert_all(conn, &document.activities).await?;
    insert_all(conn, &document.activity_records).await?;
    insert_all(conn, &document.assets).await?;
    insert_all(conn, &document.rentals).await?;
    insert_all(conn, &document.rental_payments).await?;
    insert_all(conn, &document.settings).await?;
    Ok(())
}

async fn insert_all<E: Record>(conn: &mut SqliteConnection, records: &[E]) -> Result<(), BackupError> {
    for record in records {
        RecordStore::insert_in(conn, record)
            .await
            .map_err(|source| BackupError::Write {
                store: E::SCHEMA.name,
                source,
            })?;
    }
    Ok(())
}

fn record_counts(document: &ExportDocument) -> ImportReport {
    let counts = [
        document.transactions.len(),
        document.employees.len(),
        document.labor_entries.len(),
        document.activities.len(),
        document.activity_records.len(),
        document.assets.len(),
        document.rentals.len(),
        document.rental_payments.len(),
        document.settings.len(),
    ];
    let stores: Vec<StoreCount> = ALL_STORES
        .iter()
        .zip(counts)
        .map(|(store, records)| StoreCount {
            store: store.name.to_string(),
            records,
        })
        .collect();
    ImportReport {
        total_records: counts.iter().sum(),
        stores,
    }
}

//! Store and index declarations.
//!
//! Each store is a table of `(id, data)` rows where `data` is the record's JSON
//! document. Indexes are SQLite expression indexes over
//! `json_extract(data, '$.<field>')`; queries must use the identical expression
//! for the planner to pick them up, so [`IndexSchema::expression`] is the only
//! place that spells it out.

use sqlx::SqlitePool;
use tracing::info;

/// Bump when the store layout changes and add the upgrade step to [`upgrade`]
pub const SCHEMA_VERSION: i64 = 1;

#[derive(Debug)]
pub struct IndexSchema {
    /// Name used by callers, e.g. `by-date`
    pub name: &'static str,
    /// Document field the index covers
    pub key_path: &'static str,
}

impl IndexSchema {
    pub fn expression(&self) -> String {
        format!("json_extract(data, '$.{}')", self.key_path)
    }
}

#[derive(Debug)]
pub struct StoreSchema {
    /// Store name as it appears in backup documents
    pub name: &'static str,
    pub table: &'static str,
    pub indexes: &'static [IndexSchema],
}

impl StoreSchema {
    pub fn index(&self, name: &str) -> Option<&IndexSchema> {
        self.indexes.iter().find(|index| index.name == name)
    }

    fn index_table_name(&self, index: &IndexSchema) -> String {
        format!("idx_{}_{}", self.table, index.name.replace('-', "_"))
    }

    fn create_statements(&self) -> Vec<String> {
        let mut statements = vec![format!(
            "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY NOT NULL, data TEXT NOT NULL)",
            self.table
        )];
        for index in self.indexes {
            statements.push(format!(
                "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
                self.index_table_name(index),
                self.table,
                index.expression()
            ));
        }
        statements
    }
}

const fn index(name: &'static str, key_path: &'static str) -> IndexSchema {
    IndexSchema { name, key_path }
}

pub const TRANSACTIONS: StoreSchema = StoreSchema {
    name: "transactions",
    table: "transactions",
    indexes: &[
        index("by-date", "date"),
        index("by-type", "type"),
        index("by-category", "category"),
    ],
};

pub const EMPLOYEES: StoreSchema = StoreSchema {
    name: "employees",
    table: "employees",
    indexes: &[index("by-status", "status")],
};

pub const LABOR_ENTRIES: StoreSchema = StoreSchema {
    name: "laborEntries",
    table: "labor_entries",
    indexes: &[
        index("by-date", "date"),
        index("by-employee", "employeeId"),
        index("by-activity", "activityId"),
    ],
};

pub const ACTIVITIES: StoreSchema = StoreSchema {
    name: "activities",
    table: "activities",
    indexes: &[index("by-status", "status"), index("by-type", "type")],
};

pub const ACTIVITY_RECORDS: StoreSchema = StoreSchema {
    name: "activityRecords",
    table: "activity_records",
    indexes: &[index("by-date", "date"), index("by-activity", "activityId")],
};

pub const ASSETS: StoreSchema = StoreSchema {
    name: "assets",
    table: "assets",
    indexes: &[index("by-category", "category"), index("by-status", "status")],
};

pub const RENTALS: StoreSchema = StoreSchema {
    name: "rentals",
    table: "rentals",
    indexes: &[index("by-status", "status"), index("by-asset", "assetId")],
};

pub const RENTAL_PAYMENTS: StoreSchema = StoreSchema {
    name: "rentalPayments",
    table: "rental_payments",
    indexes: &[index("by-rental", "rentalId"), index("by-date", "date")],
};

pub const SETTINGS: StoreSchema = StoreSchema {
    name: "settings",
    table: "settings",
    indexes: &[],
};

/// Every store, in backup document order
pub const ALL_STORES: [&StoreSchema; 9] = [
    &TRANSACTIONS,
    &EMPLOYEES,
    &LABOR_ENTRIES,
    &ACTIVITIES,
    &ACTIVITY_RECORDS,
    &ASSETS,
    &RENTALS,
    &RENTAL_PAYMENTS,
    &SETTINGS,
];

/// Bring the database up to [`SCHEMA_VERSION`]. Returns the version found
/// before upgrading.
///
/// `PRAGMA user_version` gates the work and is written in the same transaction
/// as the tables, so a database is either fully created or untouched.
pub(crate) async fn upgrade(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (found,): (i64,) = sqlx::query_as("PRAGMA user_version").fetch_one(pool).await?;
    if found >= SCHEMA_VERSION {
        return Ok(found);
    }

    info!("Upgrading record store schema from version {} to {}", found, SCHEMA_VERSION);

    let mut tx = pool.begin().await?;
    for store in ALL_STORES {
        for statement in store.create_statements() {
            sqlx::query(&statement).execute(&mut *tx).await?;
        }
    }
    sqlx::query(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_store_names_match_backup_keys() {
        let names: Vec<&str> = ALL_STORES.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "transactions",
                "employees",
                "laborEntries",
                "activities",
                "activityRecords",
                "assets",
                "rentals",
                "rentalPayments",
                "settings",
            ]
        );
    }

    #[test]
    fn test_index_table_names_are_unique() {
        let mut seen = HashSet::new();
        for store in ALL_STORES {
            for index in store.indexes {
                assert!(seen.insert(store.index_table_name(index)));
            }
        }
    }

    #[test]
    fn test_index_lookup() {
        assert_eq!(LABOR_ENTRIES.index("by-employee").unwrap().key_path, "employeeId");
        assert!(SETTINGS.index("by-date").is_none());
        assert_eq!(
            TRANSACTIONS.index("by-type").unwrap().expression(),
            "json_extract(data, '$.type')"
        );
    }
}

//! # Storage Module
//!
//! Handles all data persistence for the farm ledger.
//!
//! The record store is a single local SQLite file. Every entity lives in its own
//! store (one table per entity) as a JSON document keyed by `id`, and each
//! filtered lookup path is declared as a secondary index over a document field.
//! Nothing here enforces relationships between stores: foreign ids are plain
//! strings and deleting a parent never touches its children.
//!
//! ## Components
//!
//! - **connection**: opens the database and hands out the process-wide handle
//! - **schema**: store and index declarations plus the one-time upgrade
//! - **record_store**: generic CRUD over one store
//! - **repositories**: one typed repository per entity

pub mod connection;
pub mod error;
pub mod record_store;
pub mod repositories;
pub mod schema;

pub use connection::{open_store, DbConnection};
pub use error::StorageError;
pub use record_store::{Creatable, Mutable, Record, RecordStore};
pub use repositories::{
    ActivityRecordRepository, ActivityRepository, AssetRepository, EmployeeRepository,
    LaborEntryRepository, RentalPaymentRepository, RentalRepository, SettingsRepository,
    TransactionRepository,
};

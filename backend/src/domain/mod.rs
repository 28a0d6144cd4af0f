//! # Domain Module
//!
//! Business logic for the farm ledger: input validation, the aggregation
//! functions behind the dashboard and reports, and backup/restore.
//!
//! ## Module Organization
//!
//! - **cashbook_service**: transactions, cash balance and period summaries
//! - **labor_service**: employees, labor entries and labor cost totals
//! - **activity_service**: activities, activity records and profitability
//! - **asset_service**: assets and their valuations
//! - **depreciation**: pure straight-line and declining-balance formulas
//! - **rental_service**: rentals, rental payments and rental income
//! - **settings_service**: the farm settings record
//! - **report_service**: profit & loss statement and dashboard overview
//! - **backup_service**: whole-database export and restore
//! - **validation**: input checks shared by every service
//!
//! ## Consistency
//!
//! Aggregations recompute from fresh repository reads on every call and are
//! never cached. An aggregation that issues several reads does not see a
//! single snapshot: a write landing between two of its reads shows up in the
//! second but not the first. Only export reads every store inside one
//! transaction.

use serde::Deserialize;

pub mod activity_service;
pub mod asset_service;
pub mod backup_service;
pub mod cashbook_service;
pub mod depreciation;
pub mod labor_service;
pub mod rental_service;
pub mod report_service;
pub mod settings_service;
pub mod validation;

pub use activity_service::ActivityService;
pub use asset_service::AssetService;
pub use backup_service::{BackupError, BackupService};
pub use cashbook_service::CashbookService;
pub use labor_service::LaborService;
pub use rental_service::RentalService;
pub use report_service::ReportService;
pub use settings_service::SettingsService;
pub use validation::ValidationError;

/// Equality filter on one of a store's declared indexes
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndexFilter {
    pub index: String,
    pub value: String,
}

//! # Farm Ledger Backend
//!
//! Offline-first bookkeeping for a small farm: cash transactions, labor,
//! activities, assets and rentals, kept in a local SQLite record store.
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (validation, aggregations, backup)
//!     ↓
//! Storage Layer (record stores, schema)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    ActivityService, AssetService, BackupService, CashbookService, LaborService, RentalService,
    ReportService, SettingsService,
};
use crate::storage::{open_store, DbConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub cashbook_service: CashbookService,
    pub labor_service: LaborService,
    pub activity_service: ActivityService,
    pub asset_service: AssetService,
    pub rental_service: RentalService,
    pub settings_service: SettingsService,
    pub report_service: ReportService,
    pub backup_service: BackupService,
}

impl AppState {
    pub fn new(db: DbConnection) -> Self {
        let cashbook_service = CashbookService::new(db.clone());
        let labor_service = LaborService::new(db.clone());
        let activity_service = ActivityService::new(db.clone());
        let asset_service = AssetService::new(db.clone());
        let report_service = ReportService::new(
            cashbook_service.clone(),
            labor_service.clone(),
            asset_service.clone(),
            activity_service.clone(),
        );

        Self {
            cashbook_service,
            labor_service,
            activity_service,
            asset_service,
            rental_service: RentalService::new(db.clone()),
            settings_service: SettingsService::new(db.clone()),
            report_service,
            backup_service: BackupService::new(db),
        }
    }
}

/// Open the record store and build every service on top of it
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    config.ensure_data_dir()?;
    let db = open_store(&config.database_url()).await?;

    info!("Setting up application state");
    Ok(AppState::new(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/transactions", get(io::list_transactions).post(io::create_transaction))
        .route("/transactions/range", get(io::list_transactions_in_range))
        .route("/transactions/day", get(io::list_transactions_on_day))
        .route(
            "/transactions/:id",
            get(io::get_transaction)
                .put(io::update_transaction)
                .delete(io::delete_transaction),
        )
        .route("/employees", get(io::list_employees).post(io::create_employee))
        .route("/employees/active", get(io::list_active_employees))
        .route(
            "/employees/:id",
            get(io::get_employee)
                .put(io::update_employee)
                .delete(io::delete_employee),
        )
        .route("/labor", get(io::list_labor_entries).post(io::create_labor_entry))
        .route("/labor/with-names", get(io::list_labor_with_names))
        .route("/labor/day", get(io::list_labor_on_day))
        .route(
            "/labor/:id",
            get(io::get_labor_entry)
                .put(io::update_labor_entry)
                .delete(io::delete_labor_entry),
        )
        .route("/activities", get(io::list_activities).post(io::create_activity))
        .route("/activities/active", get(io::list_active_activities))
        .route(
            "/activities/:id",
            get(io::get_activity)
                .put(io::update_activity)
                .delete(io::delete_activity),
        )
        .route("/activities/:id/records", get(io::list_records_for_activity))
        .route("/activities/:id/profitability", get(io::get_activity_profitability))
        .route(
            "/activity-records",
            get(io::list_activity_records).post(io::create_activity_record),
        )
        .route(
            "/activity-records/:id",
            get(io::get_activity_record)
                .put(io::update_activity_record)
                .delete(io::delete_activity_record),
        )
        .route("/assets", get(io::list_assets).post(io::create_asset))
        .route("/assets/valuations", get(io::list_asset_valuations))
        .route(
            "/assets/:id",
            get(io::get_asset).put(io::update_asset).delete(io::delete_asset),
        )
        .route("/assets/:id/valuation", get(io::get_asset_valuation))
        .route("/rentals", get(io::list_rentals).post(io::create_rental))
        .route(
            "/rentals/:id",
            get(io::get_rental).put(io::update_rental).delete(io::delete_rental),
        )
        .route("/rentals/:id/payments", get(io::list_payments_for_rental))
        .route(
            "/rental-payments",
            get(io::list_rental_payments).post(io::create_rental_payment),
        )
        .route(
            "/rental-payments/:id",
            get(io::get_rental_payment).delete(io::delete_rental_payment),
        )
        .route("/settings", get(io::get_settings).put(io::update_settings))
        .route("/summary/cash-balance", get(io::get_cash_balance))
        .route("/summary/month-to-date", get(io::get_month_to_date_summary))
        .route("/summary/month", get(io::get_month_summary))
        .route("/summary/period", get(io::get_period_summary))
        .route("/summary/activity-ranking", get(io::get_activity_ranking))
        .route("/summary/labor-cost", get(io::get_labor_cost))
        .route("/summary/asset-value", get(io::get_total_asset_value))
        .route("/summary/depreciation-this-month", get(io::get_depreciation_this_month))
        .route("/summary/rental-income", get(io::get_rental_income_overview))
        .route("/summary/rental-income/month", get(io::get_rental_income_for_month))
        .route("/summary/dashboard", get(io::get_dashboard_overview))
        .route("/reports/profit-loss", get(io::get_profit_and_loss))
        .route("/backup/export", get(io::export_backup))
        .route("/backup/import", post(io::import_backup));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

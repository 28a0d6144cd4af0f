//! # REST API for Summaries and Reports
//!
//! Read-only aggregations over the ledger. Anything "this month" is computed
//! against the server's local calendar.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use shared::DateRange;
use tracing::info;

use super::{error_response, parse_date_param, RangeQuery, TotalResponse};
use crate::domain::ValidationError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub date: String,
}

/// Labor cost is either per activity or over a date range
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborCostQuery {
    pub activity_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn get_cash_balance(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary/cash-balance");

    match state.cashbook_service.cash_balance().await {
        Ok(total) => (StatusCode::OK, Json(TotalResponse { total })).into_response(),
        Err(e) => error_response("Failed to compute cash balance", e),
    }
}

pub async fn get_month_to_date_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary/month-to-date");

    match state.cashbook_service.month_to_date_summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response("Failed to compute month-to-date summary", e),
    }
}

pub async fn get_month_summary(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/summary/month - date: {}", query.date);

    let result = match parse_date_param("date", &query.date) {
        Ok(date) => state.cashbook_service.month_summary(date).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response("Failed to compute month summary", e),
    }
}

pub async fn get_period_summary(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> impl IntoResponse {
    info!("GET /api/summary/period - {}..={}", range.start, range.end);

    match state.cashbook_service.period_summary(&range.into()).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response("Failed to compute period summary", e),
    }
}

pub async fn get_activity_ranking(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary/activity-ranking");

    match state.activity_service.activity_ranking().await {
        Ok(ranking) => (StatusCode::OK, Json(ranking)).into_response(),
        Err(e) => error_response("Failed to rank activities", e),
    }
}

pub async fn get_labor_cost(
    State(state): State<AppState>,
    Query(query): Query<LaborCostQuery>,
) -> impl IntoResponse {
    info!("GET /api/summary/labor-cost - query: {:?}", query);

    let result = match query {
        LaborCostQuery {
            activity_id: Some(activity_id),
            ..
        } => state.labor_service.labor_cost(&activity_id).await,
        LaborCostQuery {
            start: Some(start),
            end: Some(end),
            ..
        } => state.labor_service.total_labor_cost(&DateRange::new(start, end)).await,
        _ => Err(ValidationError::EmptyField { field: "activityId" }.into()),
    };
    match result {
        Ok(total) => (StatusCode::OK, Json(TotalResponse { total })).into_response(),
        Err(e) => error_response("Failed to compute labor cost", e),
    }
}

pub async fn get_total_asset_value(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary/asset-value");

    match state.asset_service.total_asset_value().await {
        Ok(total) => (StatusCode::OK, Json(TotalResponse { total })).into_response(),
        Err(e) => error_response("Failed to compute asset value", e),
    }
}

pub async fn get_depreciation_this_month(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary/depreciation-this-month");

    match state.asset_service.total_depreciation_this_month().await {
        Ok(total) => (StatusCode::OK, Json(TotalResponse { total })).into_response(),
        Err(e) => error_response("Failed to compute monthly depreciation", e),
    }
}

pub async fn get_rental_income_overview(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary/rental-income");

    match state.rental_service.rental_income_overview().await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(e) => error_response("Failed to compute rental income", e),
    }
}

/// Rental payments received in the calendar month containing `date`
pub async fn get_rental_income_for_month(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> impl IntoResponse {
    info!("GET /api/summary/rental-income/month - date: {}", query.date);

    let result = match parse_date_param("date", &query.date) {
        Ok(date) => state.rental_service.rental_income_for_month(date).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(total) => (StatusCode::OK, Json(TotalResponse { total })).into_response(),
        Err(e) => error_response("Failed to compute rental income", e),
    }
}

pub async fn get_dashboard_overview(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary/dashboard");

    match state.report_service.dashboard_overview().await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(e) => error_response("Failed to build dashboard overview", e),
    }
}

pub async fn get_profit_and_loss(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> impl IntoResponse {
    info!("GET /api/reports/profit-loss - {}..={}", range.start, range.end);

    match state.report_service.profit_and_loss(&range.into()).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response("Failed to build profit and loss statement", e),
    }
}

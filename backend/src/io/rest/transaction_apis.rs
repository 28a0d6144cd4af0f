//! # REST API for the Cashbook
//!
//! Endpoints for creating, listing, updating and deleting cash transactions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{NewTransaction, TransactionPatch};
use tracing::info;

use super::{error_response, not_found, DayQuery, ListQuery, RangeQuery};
use crate::AppState;

/// List transactions, optionally filtered on an index
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions - query: {:?}", query);

    let result = match query.filter() {
        Ok(filter) => state.cashbook_service.list_transactions(filter.as_ref()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(transactions) => (StatusCode::OK, Json(transactions)).into_response(),
        Err(e) => error_response("Failed to list transactions", e),
    }
}

/// Transactions dated within an inclusive range
pub async fn list_transactions_in_range(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> impl IntoResponse {
    info!("GET /api/transactions/range - {}..={}", range.start, range.end);

    match state.cashbook_service.transactions_in_range(&range.into()).await {
        Ok(transactions) => (StatusCode::OK, Json(transactions)).into_response(),
        Err(e) => error_response("Failed to list transactions in range", e),
    }
}

/// Transactions dated on one day, today by default
pub async fn list_transactions_on_day(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> impl IntoResponse {
    let date = query.date_or_today();
    info!("GET /api/transactions/day - date: {}", date);

    match state.cashbook_service.transactions_on(&date).await {
        Ok(transactions) => (StatusCode::OK, Json(transactions)).into_response(),
        Err(e) => error_response("Failed to list transactions for day", e),
    }
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<NewTransaction>,
) -> impl IntoResponse {
    info!("POST /api/transactions - request: {:?}", request);

    match state.cashbook_service.create_transaction(request).await {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(e) => error_response("Failed to create transaction", e),
    }
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/transactions/{}", id);

    match state.cashbook_service.get_transaction(&id).await {
        Ok(Some(transaction)) => (StatusCode::OK, Json(transaction)).into_response(),
        Ok(None) => not_found("Transaction"),
        Err(e) => error_response("Failed to get transaction", e),
    }
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TransactionPatch>,
) -> impl IntoResponse {
    info!("PUT /api/transactions/{} - patch: {:?}", id, patch);

    match state.cashbook_service.update_transaction(&id, patch).await {
        Ok(Some(transaction)) => (StatusCode::OK, Json(transaction)).into_response(),
        Ok(None) => not_found("Transaction"),
        Err(e) => error_response("Failed to update transaction", e),
    }
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/transactions/{}", id);

    match state.cashbook_service.delete_transaction(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete transaction", e),
    }
}

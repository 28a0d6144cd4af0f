//! # REST API for Rentals and Rental Payments
//!
//! Payments are append-only, so they have no update route.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{NewRental, NewRentalPayment, RentalPatch};
use tracing::info;

use super::{error_response, not_found, ListQuery};
use crate::AppState;

pub async fn list_rentals(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/rentals - query: {:?}", query);

    let result = match query.filter() {
        Ok(filter) => state.rental_service.list_rentals(filter.as_ref()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(rentals) => (StatusCode::OK, Json(rentals)).into_response(),
        Err(e) => error_response("Failed to list rentals", e),
    }
}

pub async fn create_rental(
    State(state): State<AppState>,
    Json(request): Json<NewRental>,
) -> impl IntoResponse {
    info!("POST /api/rentals - request: {:?}", request);

    match state.rental_service.create_rental(request).await {
        Ok(rental) => (StatusCode::CREATED, Json(rental)).into_response(),
        Err(e) => error_response("Failed to create rental", e),
    }
}

pub async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/rentals/{}", id);

    match state.rental_service.get_rental(&id).await {
        Ok(Some(rental)) => (StatusCode::OK, Json(rental)).into_response(),
        Ok(None) => not_found("Rental"),
        Err(e) => error_response("Failed to get rental", e),
    }
}

pub async fn update_rental(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<RentalPatch>,
) -> impl IntoResponse {
    info!("PUT /api/rentals/{} - patch: {:?}", id, patch);

    match state.rental_service.update_rental(&id, patch).await {
        Ok(Some(rental)) => (StatusCode::OK, Json(rental)).into_response(),
        Ok(None) => not_found("Rental"),
        Err(e) => error_response("Failed to update rental", e),
    }
}

pub async fn delete_rental(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/rentals/{}", id);

    match state.rental_service.delete_rental(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete rental", e),
    }
}

pub async fn list_payments_for_rental(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/rentals/{}/payments", id);

    match state.rental_service.payments_for_rental(&id).await {
        Ok(payments) => (StatusCode::OK, Json(payments)).into_response(),
        Err(e) => error_response("Failed to list rental payments", e),
    }
}

pub async fn list_rental_payments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/rental-payments - query: {:?}", query);

    let result = match query.filter() {
        Ok(filter) => state.rental_service.list_payments(filter.as_ref()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(payments) => (StatusCode::OK, Json(payments)).into_response(),
        Err(e) => error_response("Failed to list rental payments", e),
    }
}

pub async fn create_rental_payment(
    State(state): State<AppState>,
    Json(request): Json<NewRentalPayment>,
) -> impl IntoResponse {
    info!("POST /api/rental-payments - request: {:?}", request);

    match state.rental_service.record_payment(request).await {
        Ok(payment) => (StatusCode::CREATED, Json(payment)).into_response(),
        Err(e) => error_response("Failed to record rental payment", e),
    }
}

pub async fn get_rental_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/rental-payments/{}", id);

    match state.rental_service.get_payment(&id).await {
        Ok(Some(payment)) => (StatusCode::OK, Json(payment)).into_response(),
        Ok(None) => not_found("Rental payment"),
        Err(e) => error_response("Failed to get rental payment", e),
    }
}

pub async fn delete_rental_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/rental-payments/{}", id);

    match state.rental_service.delete_payment(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete rental payment", e),
    }
}

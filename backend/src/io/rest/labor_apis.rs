//! # REST API for Employees and Labor

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{EmployeePatch, LaborEntryPatch, NewEmployee, NewLaborEntry};
use tracing::info;

use super::{error_response, not_found, DayQuery, ListQuery, RangeQuery};
use crate::AppState;

pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/employees - query: {:?}", query);

    let result = match query.filter() {
        Ok(filter) => state.labor_service.list_employees(filter.as_ref()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(e) => error_response("Failed to list employees", e),
    }
}

pub async fn list_active_employees(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/employees/active");

    match state.labor_service.active_employees().await {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(e) => error_response("Failed to list active employees", e),
    }
}

pub async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<NewEmployee>,
) -> impl IntoResponse {
    info!("POST /api/employees - request: {:?}", request);

    match state.labor_service.create_employee(request).await {
        Ok(employee) => (StatusCode::CREATED, Json(employee)).into_response(),
        Err(e) => error_response("Failed to create employee", e),
    }
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/employees/{}", id);

    match state.labor_service.get_employee(&id).await {
        Ok(Some(employee)) => (StatusCode::OK, Json(employee)).into_response(),
        Ok(None) => not_found("Employee"),
        Err(e) => error_response("Failed to get employee", e),
    }
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<EmployeePatch>,
) -> impl IntoResponse {
    info!("PUT /api/employees/{} - patch: {:?}", id, patch);

    match state.labor_service.update_employee(&id, patch).await {
        Ok(Some(employee)) => (StatusCode::OK, Json(employee)).into_response(),
        Ok(None) => not_found("Employee"),
        Err(e) => error_response("Failed to update employee", e),
    }
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/employees/{}", id);

    match state.labor_service.delete_employee(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete employee", e),
    }
}

pub async fn list_labor_entries(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/labor - query: {:?}", query);

    let result = match query.filter() {
        Ok(filter) => state.labor_service.list_labor_entries(filter.as_ref()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => error_response("Failed to list labor entries", e),
    }
}

/// Labor entries in a date range with employee and activity names resolved
pub async fn list_labor_with_names(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> impl IntoResponse {
    info!("GET /api/labor/with-names - {}..={}", range.start, range.end);

    match state.labor_service.labor_entries_with_names(&range.into()).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => error_response("Failed to list labor entries with names", e),
    }
}

/// Labor logged on one day, today by default
pub async fn list_labor_on_day(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> impl IntoResponse {
    let date = query.date_or_today();
    info!("GET /api/labor/day - date: {}", date);

    match state.labor_service.labor_entries_on(&date).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => error_response("Failed to list labor entries for day", e),
    }
}

pub async fn create_labor_entry(
    State(state): State<AppState>,
    Json(request): Json<NewLaborEntry>,
) -> impl IntoResponse {
    info!("POST /api/labor - request: {:?}", request);

    match state.labor_service.create_labor_entry(request).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => error_response("Failed to create labor entry", e),
    }
}

pub async fn get_labor_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/labor/{}", id);

    match state.labor_service.get_labor_entry(&id).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(entry)).into_response(),
        Ok(None) => not_found("Labor entry"),
        Err(e) => error_response("Failed to get labor entry", e),
    }
}

pub async fn update_labor_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<LaborEntryPatch>,
) -> impl IntoResponse {
    info!("PUT /api/labor/{} - patch: {:?}", id, patch);

    match state.labor_service.update_labor_entry(&id, patch).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(entry)).into_response(),
        Ok(None) => not_found("Labor entry"),
        Err(e) => error_response("Failed to update labor entry", e),
    }
}

pub async fn delete_labor_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/labor/{}", id);

    match state.labor_service.delete_labor_entry(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete labor entry", e),
    }
}

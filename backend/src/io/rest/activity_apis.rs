//! # REST API for Activities and Activity Records

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{ActivityPatch, ActivityRecordPatch, NewActivity, NewActivityRecord};
use tracing::info;

use super::{error_response, not_found, ListQuery};
use crate::AppState;

pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/activities - query: {:?}", query);

    let result = match query.filter() {
        Ok(filter) => state.activity_service.list_activities(filter.as_ref()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(activities) => (StatusCode::OK, Json(activities)).into_response(),
        Err(e) => error_response("Failed to list activities", e),
    }
}

pub async fn list_active_activities(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/activities/active");

    match state.activity_service.active_activities().await {
        Ok(activities) => (StatusCode::OK, Json(activities)).into_response(),
        Err(e) => error_response("Failed to list active activities", e),
    }
}

pub async fn create_activity(
    State(state): State<AppState>,
    Json(request): Json<NewActivity>,
) -> impl IntoResponse {
    info!("POST /api/activities - request: {:?}", request);

    match state.activity_service.create_activity(request).await {
        Ok(activity) => (StatusCode::CREATED, Json(activity)).into_response(),
        Err(e) => error_response("Failed to create activity", e),
    }
}

pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/activities/{}", id);

    match state.activity_service.get_activity(&id).await {
        Ok(Some(activity)) => (StatusCode::OK, Json(activity)).into_response(),
        Ok(None) => not_found("Activity"),
        Err(e) => error_response("Failed to get activity", e),
    }
}

pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ActivityPatch>,
) -> impl IntoResponse {
    info!("PUT /api/activities/{} - patch: {:?}", id, patch);

    match state.activity_service.update_activity(&id, patch).await {
        Ok(Some(activity)) => (StatusCode::OK, Json(activity)).into_response(),
        Ok(None) => not_found("Activity"),
        Err(e) => error_response("Failed to update activity", e),
    }
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/activities/{}", id);

    match state.activity_service.delete_activity(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete activity", e),
    }
}

/// Records logged against one activity
pub async fn list_records_for_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/activities/{}/records", id);

    match state.activity_service.records_for_activity(&id).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => error_response("Failed to list activity records", e),
    }
}

pub async fn get_activity_profitability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/activities/{}/profitability", id);

    match state.activity_service.activity_profitability(&id).await {
        Ok(profitability) => (StatusCode::OK, Json(profitability)).into_response(),
        Err(e) => error_response("Failed to compute activity profitability", e),
    }
}

pub async fn list_activity_records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/activity-records - query: {:?}", query);

    let result = match query.filter() {
        Ok(filter) => state.activity_service.list_records(filter.as_ref()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => error_response("Failed to list activity records", e),
    }
}

pub async fn create_activity_record(
    State(state): State<AppState>,
    Json(request): Json<NewActivityRecord>,
) -> impl IntoResponse {
    info!("POST /api/activity-records - request: {:?}", request);

    match state.activity_service.create_record(request).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response("Failed to create activity record", e),
    }
}

pub async fn get_activity_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/activity-records/{}", id);

    match state.activity_service.get_record(&id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => not_found("Activity record"),
        Err(e) => error_response("Failed to get activity record", e),
    }
}

pub async fn update_activity_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ActivityRecordPatch>,
) -> impl IntoResponse {
    info!("PUT /api/activity-records/{} - patch: {:?}", id, patch);

    match state.activity_service.update_record(&id, patch).await {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => not_found("Activity record"),
        Err(e) => error_response("Failed to update activity record", e),
    }
}

pub async fn delete_activity_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/activity-records/{}", id);

    match state.activity_service.delete_record(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete activity record", e),
    }
}

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::FarmSettingsPatch;
use tracing::info;

use super::error_response;
use crate::AppState;

/// Current farm settings, created with defaults on first access
pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings");

    match state.settings_service.get_settings().await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => error_response("Failed to get settings", e),
    }
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<FarmSettingsPatch>,
) -> impl IntoResponse {
    info!("PUT /api/settings - patch: {:?}", patch);

    match state.settings_service.update_settings(patch).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => error_response("Failed to update settings", e),
    }
}

//! # REST API for Backup
//!
//! Export returns the whole database as one JSON document. Import replaces
//! every store with the contents of such a document, or changes nothing.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error_response;
use crate::AppState;

pub async fn export_backup(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/backup/export");

    match state.backup_service.export_all().await {
        Ok(document) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            document,
        )
            .into_response(),
        Err(e) => error_response("Failed to export backup", e.into()),
    }
}

/// Takes the raw body so that malformed documents surface as a parse error
/// from the backup service rather than an extractor rejection.
pub async fn import_backup(State(state): State<AppState>, body: String) -> impl IntoResponse {
    info!("POST /api/backup/import - {} bytes", body.len());

    match state.backup_service.import_all(&body).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response("Failed to import backup", e.into()),
    }
}

//! # REST API for Assets
//!
//! Asset CRUD plus valuations. Valuations are computed as of the moment the
//! request is handled.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use shared::{AssetPatch, NewAsset};
use tracing::info;

use super::{error_response, not_found, ListQuery};
use crate::AppState;

pub async fn list_assets(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/assets - query: {:?}", query);

    let result = match query.filter() {
        Ok(filter) => state.asset_service.list_assets(filter.as_ref()).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(assets) => (StatusCode::OK, Json(assets)).into_response(),
        Err(e) => error_response("Failed to list assets", e),
    }
}

pub async fn create_asset(
    State(state): State<AppState>,
    Json(request): Json<NewAsset>,
) -> impl IntoResponse {
    info!("POST /api/assets - request: {:?}", request);

    match state.asset_service.create_asset(request).await {
        Ok(asset) => (StatusCode::CREATED, Json(asset)).into_response(),
        Err(e) => error_response("Failed to create asset", e),
    }
}

pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/assets/{}", id);

    match state.asset_service.get_asset(&id).await {
        Ok(Some(asset)) => (StatusCode::OK, Json(asset)).into_response(),
        Ok(None) => not_found("Asset"),
        Err(e) => error_response("Failed to get asset", e),
    }
}

pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<AssetPatch>,
) -> impl IntoResponse {
    info!("PUT /api/assets/{} - patch: {:?}", id, patch);

    match state.asset_service.update_asset(&id, patch).await {
        Ok(Some(asset)) => (StatusCode::OK, Json(asset)).into_response(),
        Ok(None) => not_found("Asset"),
        Err(e) => error_response("Failed to update asset", e),
    }
}

pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/assets/{}", id);

    match state.asset_service.delete_asset(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("Failed to delete asset", e),
    }
}

pub async fn get_asset_valuation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/assets/{}/valuation", id);

    match state.asset_service.asset_valuation(&id, Utc::now()).await {
        Ok(Some(valuation)) => (StatusCode::OK, Json(valuation)).into_response(),
        Ok(None) => not_found("Asset"),
        Err(e) => error_response("Failed to value asset", e),
    }
}

/// Valuations of every active asset
pub async fn list_asset_valuations(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/assets/valuations");

    match state.asset_service.valuations(Utc::now()).await {
        Ok(valuations) => (StatusCode::OK, Json(valuations)).into_response(),
        Err(e) => error_response("Failed to value assets", e),
    }
}

//! # REST API Interface Layer
//!
//! HTTP endpoints for the farm ledger, mounted under `/api`.
//!
//! Every entity gets the same five routes: list (optionally filtered on one
//! declared index with `?index=&value=`), create, get, patch and delete.
//! Aggregations live under `/summary`, the profit & loss statement under
//! `/reports`, and whole-database export/import under `/backup`.
//!
//! ## Status codes
//!
//! - `404` when the addressed record does not exist
//! - `400` for validation failures, unknown index names and unparseable
//!   backup documents
//! - `503` when the record store cannot be opened
//! - `500` for anything else

pub mod activity_apis;
pub mod asset_apis;
pub mod backup_apis;
pub mod labor_apis;
pub mod rental_apis;
pub mod settings_apis;
pub mod summary_apis;
pub mod transaction_apis;

pub use activity_apis::*;
pub use asset_apis::*;
pub use backup_apis::*;
pub use labor_apis::*;
pub use rental_apis::*;
pub use settings_apis::*;
pub use summary_apis::*;
pub use transaction_apis::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use shared::{parse_iso_date, DateRange};
use tracing::error;

use crate::domain::{BackupError, IndexFilter, ValidationError};
use crate::storage::StorageError;

/// Query string accepted by every list endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub index: Option<String>,
    pub value: Option<String>,
}

impl ListQuery {
    /// An index filter, if one was requested. `index` without `value` is an error.
    pub fn filter(self) -> anyhow::Result<Option<IndexFilter>> {
        match (self.index, self.value) {
            (Some(index), Some(value)) => Ok(Some(IndexFilter { index, value })),
            (None, _) => Ok(None),
            (Some(_), None) => Err(ValidationError::EmptyField { field: "value" }.into()),
        }
    }
}

/// Inclusive `?start=&end=` date range
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
}

impl From<RangeQuery> for DateRange {
    fn from(query: RangeQuery) -> Self {
        DateRange::new(query.start, query.end)
    }
}

/// `?date=` for single-day listings; today's local date when absent
#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

impl DayQuery {
    pub fn date_or_today(self) -> String {
        self.date.unwrap_or_else(shared::today)
    }
}

/// Wrapper for endpoints that return a single figure
#[derive(Debug, Serialize, Deserialize)]
pub struct TotalResponse {
    pub total: f64,
}

pub(crate) fn parse_date_param(field: &'static str, value: &str) -> anyhow::Result<chrono::NaiveDate> {
    parse_iso_date(value).ok_or_else(|| {
        ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        }
        .into()
    })
}

/// Map a service error onto a status code
pub(crate) fn status_for(err: &anyhow::Error) -> StatusCode {
    if err.downcast_ref::<ValidationError>().is_some() {
        return StatusCode::BAD_REQUEST;
    }
    let storage = err.downcast_ref::<StorageError>().or_else(|| {
        match err.downcast_ref::<BackupError>() {
            Some(BackupError::Storage(storage)) => Some(storage),
            _ => None,
        }
    });
    match storage {
        Some(StorageError::Unavailable { .. }) => return StatusCode::SERVICE_UNAVAILABLE,
        Some(StorageError::UnknownIndex { .. }) => return StatusCode::BAD_REQUEST,
        _ => {}
    }
    if let Some(BackupError::Parse(_)) = err.downcast_ref::<BackupError>() {
        return StatusCode::BAD_REQUEST;
    }
    StatusCode::INTERNAL_SERVER_ERROR
}

pub(crate) fn error_response(context: &str, err: anyhow::Error) -> Response {
    let status = status_for(&err);
    error!("{}: {:#}", context, err);
    (status, err.to_string()).into_response()
}

pub(crate) fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("{what} not found")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_router, AppState};
    use axum::{
        body::{to_bytes, Body},
        http::{header, HeaderValue, Method, Request},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::storage::DbConnection;

    async fn setup_test() -> Router {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        create_router(
            AppState::new(db),
            HeaderValue::from_static("http://localhost:8080"),
        )
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json_body(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let validation: anyhow::Error = ValidationError::NonPositiveUsefulLife.into();
        assert_eq!(status_for(&validation), StatusCode::BAD_REQUEST);

        let unknown: anyhow::Error = StorageError::UnknownIndex {
            store: "transactions",
            index: "by-colour".to_string(),
        }
        .into();
        assert_eq!(status_for(&unknown), StatusCode::BAD_REQUEST);

        let unavailable: anyhow::Error = StorageError::Unavailable {
            location: "sqlite://nowhere".to_string(),
            source: sqlx::Error::PoolTimedOut,
        }
        .into();
        assert_eq!(status_for(&unavailable), StatusCode::SERVICE_UNAVAILABLE);

        let parse = serde_json::from_str::<Value>("{").unwrap_err();
        let parse: anyhow::Error = BackupError::Parse(parse).into();
        assert_eq!(status_for(&parse), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_transaction_crud_over_http() {
        let app = setup_test().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/transactions",
            Some(json!({
                "date": "2025-06-14",
                "type": "income",
                "category": "Milk",
                "amount": 1500.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created = json_body(&body);
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["description"], "");

        let (status, body) = send(&app, Method::GET, &format!("/api/transactions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), created);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/transactions/{id}"),
            Some(json!({ "amount": 1750.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["amount"], 1750.0);

        let (status, body) = send(&app, Method::GET, "/api/transactions?index=by-type&value=income", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body).as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/transactions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &format!("/api/transactions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, &format!("/api/transactions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_error_statuses_over_http() {
        let app = setup_test().await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/assets",
            Some(json!({
                "name": "Tractor",
                "category": "vehicle",
                "purchaseDate": "2020-01-01",
                "purchasePrice": 120000.0,
                "currentValue": 120000.0,
                "depreciationRate": 10.0,
                "depreciationMethod": "straight-line",
                "usefulLife": 0.0,
                "status": "active"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/employees?index=by-colour&value=red", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::PUT, "/api/rentals/missing", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::GET, "/api/summary/month?date=2025-6-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_backup_round_trip_over_http() {
        let app = setup_test().await;
        send(
            &app,
            Method::POST,
            "/api/employees",
            Some(json!({
                "name": "Okello",
                "role": "Herdsman",
                "dailyRate": 15000.0,
                "status": "active"
            })),
        )
        .await;

        let (status, exported) = send(&app, Method::GET, "/api/backup/export", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&exported)["employees"].as_array().unwrap().len(), 1);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/backup/import")
            .body(Body::from("not a backup"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/backup/import")
            .body(Body::from(exported))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(json_body(&bytes)["totalRecords"], 1);
    }

    #[tokio::test]
    async fn test_day_listings_over_http() {
        let app = setup_test().await;
        send(
            &app,
            Method::POST,
            "/api/transactions",
            Some(json!({
                "date": "2025-06-14",
                "type": "expense",
                "category": "Feed",
                "amount": 300.0
            })),
        )
        .await;

        let (status, body) = send(&app, Method::GET, "/api/transactions/day?date=2025-06-14", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body).as_array().unwrap().len(), 1);

        let (status, _) = send(&app, Method::GET, "/api/transactions/day", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/api/labor/day?date=2025-06-14", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json_body(&body).as_array().unwrap().is_empty());

        let (status, _) = send(&app, Method::GET, "/api/labor/day?date=+2025-6-14", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_settings_created_on_first_read() {
        let app = setup_test().await;
        let (status, body) = send(&app, Method::GET, "/api/settings", None).await;
        assert_eq!(status, StatusCode::OK);
        let settings = json_body(&body);
        assert_eq!(settings["id"], "main");
        assert_eq!(settings["currency"], "UGX");
    }
}

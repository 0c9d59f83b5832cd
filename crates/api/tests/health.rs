//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, get};
use formreturn_core::form_return::SortDirection;
use formreturn_core::types::DbId;
use formreturn_db::models::form_return::{CreateFormReturn, FormReturn, UpdateFormReturn};
use formreturn_db::store::{FormReturnStore, StoreError};

/// A store whose backend is never reachable.
struct UnreachableStore;

#[async_trait]
impl FormReturnStore for UnreachableStore {
    async fn get(&self, _id: DbId) -> Result<Option<FormReturn>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list(&self, _search: &str, _sort: SortDirection) -> Result<Vec<FormReturn>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _input: &CreateFormReturn) -> Result<FormReturn, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn update(
        &self,
        _id: DbId,
        _input: &UpdateFormReturn,
    ) -> Result<Option<FormReturn>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: DbId) -> Result<Option<FormReturn>, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn phone_exists(&self, _phone_number: &str) -> Result<bool, StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}

fn unreachable_app(public_dir: &std::path::Path) -> axum::Router {
    common::build_test_app_with(Arc::new(UnreachableStore), common::test_config(public_dir))
}

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(tmp.path());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store_healthy"], true);
}

#[tokio::test]
async fn health_check_reports_degraded_store() {
    let tmp = tempfile::tempdir().unwrap();
    let response = get(unreachable_app(tmp.path()), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

// ---------------------------------------------------------------------------
// Test: store failures are sanitized 500s
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_returns_sanitized_500() {
    let tmp = tempfile::tempdir().unwrap();
    let response = get(unreachable_app(tmp.path()), "/api/records").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(tmp.path());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let tmp = tempfile::tempdir().unwrap();
    let app = common::build_test_app(tmp.path());
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // A generated UUID: 36 chars with hyphens.
    let id_str = request_id.to_str().unwrap();
    assert_eq!(id_str.len(), 36);
    assert_eq!(id_str.matches('-').count(), 4);
}

//! Shared helpers for the HTTP integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use formreturn_api::config::ServerConfig;
use formreturn_api::router::build_app_router;
use formreturn_api::state::AppState;
use formreturn_db::store::{MemoryFormReturnStore, SharedStore};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const BOUNDARY: &str = "formreturn-test-boundary";

/// Configuration pointing the public directory at `public_dir`.
pub fn test_config(public_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_dir: public_dir.to_path_buf(),
        max_upload_bytes: 10 * 1024 * 1024,
        database_url: None,
    }
}

/// Full router over a fresh in-memory store.
pub fn build_test_app(public_dir: &Path) -> Router {
    build_test_app_with(Arc::new(MemoryFormReturnStore::new()), test_config(public_dir))
}

pub fn build_test_app_with(store: SharedStore, config: ServerConfig) -> Router {
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_multipart(app: Router, uri: &str, form: MultipartForm) -> Response<Body> {
    send(app, form.into_request(Method::POST, uri)).await
}

pub async fn put_multipart(app: Router, uri: &str, form: MultipartForm) -> Response<Body> {
    send(app, form.into_request(Method::PUT, uri)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

/// Hand-built `multipart/form-data` body.
#[derive(Debug, Default, Clone)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, method: Method, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// A complete record form; override fields with further `.text()` calls
/// (later parts win).
pub fn record_form(first: &str, last: &str, phone: &str, signers: &str) -> MultipartForm {
    MultipartForm::new()
        .text("firstName", first)
        .text("lastName", last)
        .text("organizationName", "Community Group")
        .text("addressLine1", "99/1 Moo 3")
        .text("district", "Si Phum")
        .text("amphoe", "Mueang Chiang Mai")
        .text("province", "Chiang Mai")
        .text("zipcode", "50200")
        .text("type", "tambon")
        .text("phoneNumber", phone)
        .text("numberOfSigners", signers)
}

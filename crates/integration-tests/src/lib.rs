//! Shared fixtures for the HTTP-level tests: a fully wired router over
//! in-memory or SQLite stores, plus request helpers.

use std::path::PathBuf;
use std::sync::Arc;

use api_adapters::{build_router, AppState, HttpOptions};
use auth_adapters::Argon2Hasher;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use services::{EntityService, MediaService, MessageService, OwnerService};
use storage_adapters::media_local::LocalMediaStorage;
use storage_adapters::sqlite::SqliteStore;
use storage_adapters::Repositories;
use tower::ServiceExt;

pub const UPLOAD_PREFIX: &str = "/api/images/uploads";

pub struct TestApp {
    router: Router,
    upload_dir: PathBuf,
}

impl TestApp {
    pub fn in_memory() -> Self {
        Self::with_repositories(Repositories::in_memory())
    }

    /// In-memory stores with uploads published under `url_prefix`.
    pub fn with_media_prefix(url_prefix: &str) -> Self {
        Self::build(Repositories::in_memory(), url_prefix)
    }

    /// Fresh `sqlite::memory:` database with the bundled schema applied.
    pub async fn sqlite() -> anyhow::Result<Self> {
        let store = SqliteStore::connect("sqlite::memory:", 1).await?;
        store.migrate().await?;
        Ok(Self::with_repositories(Repositories::sqlite(store)))
    }

    fn with_repositories(repos: Repositories) -> Self {
        Self::build(repos, UPLOAD_PREFIX)
    }

    fn build(repos: Repositories, url_prefix: &str) -> Self {
        let upload_dir = std::env::temp_dir().join(format!("furluv-it-{}", uuid::Uuid::new_v4()));
        let media = LocalMediaStorage::new(&upload_dir, url_prefix);
        let state = AppState {
            pets: EntityService::new(repos.pets),
            breeders: EntityService::new(repos.breeders),
            listings: EntityService::new(repos.listings),
            posts: EntityService::new(repos.posts),
            transactions: EntityService::new(repos.transactions),
            owners: OwnerService::new(repos.owners, Arc::new(Argon2Hasher::new())),
            messages: MessageService::new(repos.messages),
            media: MediaService::new(Arc::new(media)),
        };
        let options = HttpOptions { media_url_prefix: url_prefix.to_string(), ..HttpOptions::default() };
        let router = build_router(state, &options);
        Self { router, upload_dir }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// JSON in, JSON out. An empty response body reads as `Value::Null`.
    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");
        let response = self.send(request).await;
        let status = response.status();
        let bytes = read_body(response).await;
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.json(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.json(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.json(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.json(Method::DELETE, uri, None).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

pub async fn read_body(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body")
        .to_vec()
}

const BOUNDARY: &str = "furluv-test-boundary";

/// Builds a multipart request with a single file field.
pub fn multipart_request(
    uri: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .expect("valid multipart request")
}

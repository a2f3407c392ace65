//! Route table and middleware stack.

use axum::extract::{DefaultBodyLimit, Request};
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use domains::models::{BreederProfile, Pet, PetListing, Post, Transaction};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{crud, health, media, messages, owners};
use crate::state::AppState;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Transport-level knobs, filled in from settings by the binary.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Exact browser origin allowed by CORS.
    pub cors_origin: String,
    pub max_body_bytes: usize,
    /// Path under which stored uploads are served. Must match the prefix the
    /// media storage puts into upload URLs.
    pub media_url_prefix: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            cors_origin: "http://127.0.0.1:5173".to_string(),
            max_body_bytes: 10 * 1024 * 1024,
            media_url_prefix: "/api/images/uploads".to_string(),
        }
    }
}

pub fn build_router(state: AppState, options: &HttpOptions) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .merge(crud::routes::<Pet>("/api/pets"))
        .merge(crud::routes::<BreederProfile>("/api/breeder-profiles"))
        .merge(crud::routes::<PetListing>("/api/pet-listings"))
        .merge(crud::routes::<Post>("/api/posts"))
        .merge(crud::routes::<Transaction>("/api/transactions"))
        .merge(owners::routes())
        .merge(messages::routes())
        .merge(media::routes(&options.media_url_prefix))
        .layer(DefaultBodyLimit::max(options.max_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(REQUEST_ID, MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-");
                    tracing::info_span!(
                        "http",
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::new(REQUEST_ID))
                .layer(cors(&options.cors_origin)),
        )
        .with_state(state)
}

fn cors(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, REQUEST_ID]);
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!(origin, "invalid CORS origin, cross-origin requests disabled");
            layer
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use domains::MockCredentialHasher;
    use domains::MockMediaStorage;
    use services::{EntityService, MediaService, MessageService, OwnerService};
    use storage_adapters::Repositories;
    use tower::ServiceExt;

    use super::*;

    fn bytes_of(data: &'static [u8]) -> axum::body::Bytes {
        axum::body::Bytes::from_static(data)
    }

    fn state() -> AppState {
        let repos = Repositories::in_memory();
        AppState {
            pets: EntityService::new(repos.pets),
            breeders: EntityService::new(repos.breeders),
            listings: EntityService::new(repos.listings),
            posts: EntityService::new(repos.posts),
            transactions: EntityService::new(repos.transactions),
            owners: OwnerService::new(repos.owners, Arc::new(MockCredentialHasher::new())),
            messages: MessageService::new(repos.messages),
            media: MediaService::new(Arc::new(MockMediaStorage::new())),
        }
    }

    fn app() -> Router {
        build_router(state(), &HttpOptions::default())
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let resp = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let resp = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(resp.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_json_400() {
        let resp = app()
            .oneshot(Request::get("/api/pets/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn oversized_upload_keeps_payload_too_large() {
        let options = HttpOptions { max_body_bytes: 64, ..HttpOptions::default() };
        let app = build_router(state(), &options);
        let mut body = b"--XX\r\nContent-Disposition: form-data; name=\"file\"; filename=\"a.png\"\r\nContent-Type: image/png\r\n\r\n".to_vec();
        body.extend(std::iter::repeat(b'x').take(4096));
        body.extend_from_slice(b"\r\n--XX--\r\n");

        let resp = app
            .oneshot(
                Request::post("/api/images/upload")
                    .header("content-type", "multipart/form-data; boundary=XX")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn uploads_are_served_under_the_configured_prefix() {
        let mut storage = MockMediaStorage::new();
        storage
            .expect_load()
            .withf(|name| name == "abcd.png")
            .returning(|_| Ok(Some(bytes_of(b"png"))));
        let mut state = state();
        state.media = MediaService::new(Arc::new(storage));
        let options = HttpOptions { media_url_prefix: "/files/".into(), ..HttpOptions::default() };

        let resp = build_router(state, &options)
            .oneshot(Request::get("/files/abcd.png").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn cors_allows_the_configured_origin() {
        let resp = app()
            .oneshot(
                Request::get("/health")
                    .header("origin", "http://127.0.0.1:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "http://127.0.0.1:5173"
        );
    }
}

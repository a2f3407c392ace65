use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use integration_tests::{multipart_request, read_body, TestApp, UPLOAD_PREFIX};
use serde_json::Value;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', 0, 0, 0, 13];

async fn upload(app: &TestApp, uri: &str, name: &str, content_type: &str, data: &[u8]) -> (StatusCode, Value) {
    let response = app
        .send(multipart_request(uri, "file", name, content_type, data))
        .await;
    let status = response.status();
    let body = read_body(response).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn image_upload_is_served_back() {
    let app = TestApp::in_memory();
    let (status, receipt) = upload(&app, "/api/images/upload", "cat.png", "image/png", PNG).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["message"], "Image uploaded successfully");
    let filename = receipt["filename"].as_str().unwrap();
    assert!(filename.ends_with(".png"));
    assert_eq!(receipt["url"], format!("{UPLOAD_PREFIX}/{filename}"));

    let response = app
        .send(Request::get(receipt["url"].as_str().unwrap()).body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(read_body(response).await, PNG);
}

#[tokio::test]
async fn identical_uploads_share_a_name() {
    let app = TestApp::in_memory();
    let (_, a) = upload(&app, "/api/images/upload", "a.png", "image/png", PNG).await;
    let (_, b) = upload(&app, "/api/images/upload", "b.png", "image/png", PNG).await;
    assert_eq!(a["filename"], b["filename"]);
}

#[tokio::test]
async fn image_endpoint_rejects_non_images() {
    let app = TestApp::in_memory();
    let (status, body) =
        upload(&app, "/api/images/upload", "notes.txt", "text/plain", b"hello").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File must be an image");
}

#[tokio::test]
async fn empty_file_is_rejected() {
    let app = TestApp::in_memory();
    let (status, body) = upload(&app, "/api/images/upload", "cat.png", "image/png", b"").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File is empty");
}

#[tokio::test]
async fn document_endpoint_accepts_pdf_by_extension() {
    let app = TestApp::in_memory();
    let (status, receipt) = upload(
        &app,
        "/api/images/upload-document",
        "vaccination.pdf",
        "application/octet-stream",
        b"%PDF-1.4",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(receipt["message"], "Document uploaded successfully");
    assert!(receipt["filename"].as_str().unwrap().ends_with(".pdf"));
}

#[tokio::test]
async fn document_endpoint_rejects_executables() {
    let app = TestApp::in_memory();
    let (status, body) = upload(
        &app,
        "/api/images/upload-document",
        "setup.exe",
        "application/octet-stream",
        b"MZ",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("File type not allowed"));
}

#[tokio::test]
async fn missing_file_field_is_400() {
    let app = TestApp::in_memory();
    let response = app
        .send(multipart_request("/api/images/upload", "avatar", "cat.png", "image/png", PNG))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_and_traversing_names_are_refused() {
    let app = TestApp::in_memory();
    let get = |uri: &str| Request::get(uri.to_string()).body(Body::empty()).unwrap();

    let missing = app.send(get(&format!("{UPLOAD_PREFIX}/deadbeef.png"))).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let sneaky = app.send(get(&format!("{UPLOAD_PREFIX}/..secret"))).await;
    assert_eq!(sneaky.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn custom_url_prefix_is_served() {
    let app = TestApp::with_media_prefix("/media/files");
    let (status, receipt) = upload(&app, "/api/images/upload", "cat.png", "image/png", PNG).await;
    assert_eq!(status, StatusCode::OK);

    let url = receipt["url"].as_str().unwrap();
    assert!(url.starts_with("/media/files/"));
    let response = app.send(Request::get(url).body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, PNG);

    let old = app
        .send(Request::get(url.replace("/media/files", UPLOAD_PREFIX)).body(Body::empty()).unwrap())
        .await;
    assert_eq!(old.status(), StatusCode::NOT_FOUND);
}

//! Multipart uploads and download of stored files.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use services::{MediaService, Upload, UploadKind, UploadReceipt};

use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::state::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// `url_prefix` is where stored files are served from, e.g. `/api/images/uploads`.
pub fn routes(url_prefix: &str) -> Router<AppState> {
    let url_prefix = url_prefix.trim_end_matches('/');
    Router::new()
        .route("/api/images/upload", post(upload_image))
        .route("/api/images/upload-document", post(upload_document))
        .route(&format!("{url_prefix}/{{filename}}"), get(serve))
}

async fn upload_image(
    State(media): State<MediaService>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadReceipt>, ApiError> {
    let upload = read_file_field(multipart?).await?;
    Ok(Json(media.upload(UploadKind::Image, upload).await?))
}

async fn upload_document(
    State(media): State<MediaService>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadReceipt>, ApiError> {
    let upload = read_file_field(multipart?).await?;
    Ok(Json(media.upload(UploadKind::Document, upload).await?))
}

async fn serve(
    State(media): State<MediaService>,
    ApiPath(filename): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let file = media.fetch(&filename).await?;
    Ok(([(header::CONTENT_TYPE, file.content_type)], file.data))
}

/// Reads the first `file` field; other fields are skipped.
async fn read_file_field(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await?;
        return Ok(Upload { file_name, content_type, data });
    }
    Err(ApiError::BadRequest(format!("missing multipart field '{FILE_FIELD}'")))
}

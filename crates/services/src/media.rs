//! # Upload Gateway
//!
//! Validates uploads before handing the bytes to a [`MediaStorage`], and
//! resolves stored files for download.

use std::sync::Arc;

use bytes::Bytes;
use domains::{DomainError, DomainResult, MediaStorage};
use serde::Serialize;
use tracing::{info, warn};

/// Fallback content type when the stored name has no recognizable extension.
const DEFAULT_CONTENT_TYPE: &str = "image/png";

const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".txt", ".png", ".jpg", ".jpeg", ".gif"];

const DOCUMENT_MIMES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// `image/*` only.
    Image,
    /// Images, PDF, Word and text files.
    Document,
}

/// One multipart file as received by the web layer.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadReceipt {
    pub filename: String,
    pub url: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub data: Bytes,
    pub content_type: String,
}

#[derive(Clone)]
pub struct MediaService {
    storage: Arc<dyn MediaStorage>,
}

impl MediaService {
    pub fn new(storage: Arc<dyn MediaStorage>) -> Self {
        Self { storage }
    }

    pub async fn upload(&self, kind: UploadKind, upload: Upload) -> DomainResult<UploadReceipt> {
        if upload.data.is_empty() {
            return Err(DomainError::invalid("File is empty"));
        }

        let extension = extension_of(upload.file_name.as_deref());
        let parsed = upload
            .content_type
            .as_deref()
            .and_then(|ct| ct.parse::<mime::Mime>().ok());

        let accepted = match kind {
            UploadKind::Image => parsed.as_ref().is_some_and(|m| m.type_() == mime::IMAGE),
            UploadKind::Document => is_allowed_document(parsed.as_ref(), &extension),
        };
        if !accepted {
            warn!(?kind, content_type = ?upload.content_type, %extension, "upload rejected");
            return Err(DomainError::invalid(match kind {
                UploadKind::Image => "File must be an image",
                UploadKind::Document => {
                    "File type not allowed. Allowed: PDF, DOCX, DOC, TXT, PNG, JPG, JPEG, GIF"
                }
            }));
        }

        let size = upload.data.len();
        let filename = self.storage.store(upload.data, &extension).await?;
        let url = self.storage.url_for(&filename);
        info!(?kind, %filename, size, %url, "upload stored");

        Ok(UploadReceipt {
            message: match kind {
                UploadKind::Image => "Image uploaded successfully",
                UploadKind::Document => "Document uploaded successfully",
            }
            .to_string(),
            filename,
            url,
        })
    }

    pub async fn fetch(&self, filename: &str) -> DomainResult<StoredFile> {
        if filename.is_empty()
            || filename.contains(['/', '\\'])
            || filename.contains("..")
        {
            return Err(DomainError::invalid(format!("bad file name: {filename}")));
        }

        let data = self
            .storage
            .load(filename)
            .await?
            .ok_or_else(|| DomainError::not_found("Upload", filename))?;

        let content_type = mime_guess::from_path(filename)
            .first_raw()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        Ok(StoredFile { data, content_type })
    }
}

/// Lower-cased `.ext` of the client file name, or empty. Anything that is not
/// a short alphanumeric suffix is dropped so it cannot leak into a path.
fn extension_of(file_name: Option<&str>) -> String {
    let Some((_, ext)) = file_name.and_then(|n| n.rsplit_once('.')) else {
        return String::new();
    };
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return String::new();
    }
    format!(".{}", ext.to_ascii_lowercase())
}

fn is_allowed_document(content_type: Option<&mime::Mime>, extension: &str) -> bool {
    let by_type = content_type.is_some_and(|m| {
        m.type_() == mime::IMAGE
            || m.type_() == mime::TEXT
            || DOCUMENT_MIMES.contains(&m.essence_str())
    });
    by_type || DOCUMENT_EXTENSIONS.contains(&extension)
}

//! # Local media storage
//!
//! Filesystem implementation of `MediaStorage`.
//! Content-addressable: the file name is the SHA-256 of the bytes plus the
//! client's extension, so identical uploads deduplicate. On disk the files are
//! sharded two levels deep; the public name stays flat.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use domains::{DomainError, DomainResult, MediaStorage};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::debug;

pub struct LocalMediaStorage {
    /// Root directory for all uploads (e.g., "./uploads")
    root_path: PathBuf,
    /// Public URL prefix (e.g., "/api/images/uploads")
    url_prefix: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self { root_path: root.into(), url_prefix: url_prefix.into() }
    }

    /// "ab/cd/abcdef...ext". `None` for names too short to shard.
    fn sharded_path(&self, filename: &str) -> Option<PathBuf> {
        let (a, b) = (filename.get(0..2)?, filename.get(2..4)?);
        let mut path = self.root_path.clone();
        path.push(a);
        path.push(b);
        path.push(filename);
        Some(path)
    }
}

fn io_err(e: std::io::Error) -> DomainError {
    DomainError::internal(format!("media storage: {e}"))
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn store(&self, data: Bytes, extension: &str) -> DomainResult<String> {
        let hash = hex::encode(Sha256::digest(&data));
        let filename = format!("{hash}{extension}");

        let target = self
            .sharded_path(&filename)
            .ok_or_else(|| DomainError::internal("hash shorter than shard prefix"))?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        if fs::try_exists(&target).await.map_err(io_err)? {
            debug!(%filename, "upload already stored");
        } else {
            fs::write(&target, &data).await.map_err(io_err)?;
        }
        Ok(filename)
    }

    async fn load(&self, filename: &str) -> DomainResult<Option<Bytes>> {
        let Some(path) = self.sharded_path(filename) else {
            return Ok(None);
        };
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(e)),
        }
    }

    fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.url_prefix.trim_end_matches('/'), filename)
    }
}

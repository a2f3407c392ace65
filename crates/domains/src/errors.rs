//! # DomainError
//!
//! Centralized error handling for the FurLuv backend.
//! Every port and service returns these; the API layer maps them to HTTP.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Target identifier is absent from the store (e.g., Pet, Post)
    #[error("{kind} not found with id {id}")]
    NotFound { kind: &'static str, id: String },

    /// Malformed request shape (e.g., non-numeric age, empty upload)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Credential check failed
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Store-level uniqueness violation (e.g., duplicate owner email)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down, disk full)
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound { kind, id: id.to_string() }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// A specialized Result type for domain logic.
pub type DomainResult<T> = std::result::Result<T, DomainError>;

//! # Ports
//!
//! Any adapter must implement these traits to be wired into the binary.

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::DomainResult;
use crate::models::{Message, NewMessage, PetOwner};
use crate::patch::Entity;

/// Data persistence contract shared by every CRUD entity.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<E>>;

    /// All records, ascending by id.
    async fn find_all(&self) -> DomainResult<Vec<E>>;

    /// Stores a new record and assigns its identifier.
    async fn insert(&self, draft: E::Draft) -> DomainResult<E>;

    /// Overwrites the record with the same id. `NotFound` if there is none.
    async fn save(&self, entity: E) -> DomainResult<E>;

    /// Returns whether a record was removed.
    async fn delete_by_id(&self, id: i64) -> DomainResult<bool>;
}

/// Owners are additionally looked up by email at login.
#[async_trait]
pub trait PetOwnerRepository: Repository<PetOwner> {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<PetOwner>>;
}

/// Append-only message log.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn append(&self, draft: NewMessage) -> DomainResult<Message>;
    async fn find_all(&self) -> DomainResult<Vec<Message>>;
    /// Messages of one conversation, ascending by id.
    async fn find_by_conversation(&self, conversation_id: &str) -> DomainResult<Vec<Message>>;
}

/// One-way password hashing.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &str) -> DomainResult<String>;
    async fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Media storage contract for uploaded images and documents.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Saves raw bytes and returns the stored file name.
    /// `extension` includes the leading dot, or is empty.
    async fn store(&self, data: Bytes, extension: &str) -> DomainResult<String>;

    /// Reads a stored file back. `None` if it does not exist.
    async fn load(&self, filename: &str) -> DomainResult<Option<Bytes>>;

    /// Public URL under which `filename` is served.
    fn url_for(&self, filename: &str) -> String;
}

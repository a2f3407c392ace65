//! # storage-adapters
//!
//! Implementations of the domain persistence and media ports.
//! `memory` is always compiled; SQLite and local media sit behind features.

pub mod memory;

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

#[cfg(feature = "media-local")]
pub mod media_local;

use std::sync::Arc;

use domains::models::{BreederProfile, Pet, PetListing, Post, Transaction};
use domains::{MessageRepository, PetOwnerRepository, Repository};

/// Every repository the services need, as trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub pets: Arc<dyn Repository<Pet>>,
    pub owners: Arc<dyn PetOwnerRepository>,
    pub breeders: Arc<dyn Repository<BreederProfile>>,
    pub listings: Arc<dyn Repository<PetListing>>,
    pub posts: Arc<dyn Repository<Post>>,
    pub transactions: Arc<dyn Repository<Transaction>>,
    pub messages: Arc<dyn MessageRepository>,
}

impl Repositories {
    /// Process-local tables; contents are lost on restart.
    pub fn in_memory() -> Self {
        use memory::{MemoryMessageLog, MemoryRepository};
        Self {
            pets: Arc::new(MemoryRepository::<Pet>::new()),
            owners: Arc::new(MemoryRepository::<domains::models::PetOwner>::new()),
            breeders: Arc::new(MemoryRepository::<BreederProfile>::new()),
            listings: Arc::new(MemoryRepository::<PetListing>::new()),
            posts: Arc::new(MemoryRepository::<Post>::new()),
            transactions: Arc::new(MemoryRepository::<Transaction>::new()),
            messages: Arc::new(MemoryMessageLog::new()),
        }
    }

    /// All tables backed by one SQLite pool.
    #[cfg(feature = "db-sqlite")]
    pub fn sqlite(store: sqlite::SqliteStore) -> Self {
        let store = Arc::new(store);
        Self {
            pets: store.clone(),
            owners: store.clone(),
            breeders: store.clone(),
            listings: store.clone(),
            posts: store.clone(),
            transactions: store.clone(),
            messages: store,
        }
    }
}

use axum::extract::FromRef;
use domains::models::{BreederProfile, Pet, PetListing, Post, Transaction};
use services::{EntityService, MediaService, MessageService, OwnerService};

/// Shared across every handler. Each field is its own substate so handlers
/// extract only the service they use.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pets: EntityService<Pet>,
    pub breeders: EntityService<BreederProfile>,
    pub listings: EntityService<PetListing>,
    pub posts: EntityService<Post>,
    pub transactions: EntityService<Transaction>,
    pub owners: OwnerService,
    pub messages: MessageService,
    pub media: MediaService,
}

//! # Domain Models
//!
//! Records of the FurLuv app. Identifiers are `i64`, assigned by the store in
//! strictly increasing order. JSON uses camelCase keys to match the web client.

mod breeder;
pub(crate) mod lenient;
mod listing;
mod message;
mod owner;
mod pet;
mod post;
mod transaction;

pub use breeder::{BreederProfile, BreederProfilePatch, NewBreederProfile};
pub use listing::{NewPetListing, PetListing, PetListingPatch};
pub use message::{ConversationSummary, Message, NewMessage};
pub use owner::{Credentials, LoginProfile, NewPetOwner, PetOwner, PetOwnerPatch};
pub use pet::{NewPet, Pet, PetPatch};
pub use post::{NewPost, Post, PostPatch};
pub use transaction::{NewTransaction, Transaction, TransactionPatch};

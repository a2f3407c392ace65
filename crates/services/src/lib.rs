//! # services
//!
//! Business operations over the domain ports. Handlers call these; these call
//! repositories and storage through trait objects only.

pub mod conversation;
pub mod entity;
pub mod media;
pub mod messages;
pub mod owners;

pub use conversation::summarize;
pub use entity::EntityService;
pub use media::{MediaService, StoredFile, Upload, UploadKind, UploadReceipt};
pub use messages::MessageService;
pub use owners::OwnerService;

//! furluv/crates/domains/src/lib.rs
//!
//! The central domain logic and port definitions for the FurLuv backend.

pub mod errors;
pub mod models;
pub mod patch;
pub mod ports;

// Re-exporting for easier access in other crates
pub use errors::*;
pub use models::*;
pub use patch::{merge, merge_update, Entity};
pub use ports::*;

//! # api-adapters
//!
//! HTTP surface of the FurLuv backend. Handlers translate requests into
//! service calls and `DomainError`s into status codes; nothing here touches
//! a store directly.

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod router;
#[cfg(feature = "web-axum")]
pub mod state;

#[cfg(feature = "web-axum")]
pub use error::ApiError;
#[cfg(feature = "web-axum")]
pub use router::{build_router, HttpOptions};
#[cfg(feature = "web-axum")]
pub use state::AppState;

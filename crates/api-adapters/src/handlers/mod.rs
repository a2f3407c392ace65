//! # Handlers
//!
//! Thin request adapters. Validation lives in serde types and services.

pub mod crud;
pub mod health;
pub mod media;
pub mod messages;
pub mod owners;

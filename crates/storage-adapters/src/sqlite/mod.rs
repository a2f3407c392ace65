//! # SQLite adapters
//!
//! Maps the SQLite relational model to the domain models. One `SqliteStore`
//! serves every repository port; each table lives in its own submodule.

mod breeders;
mod listings;
mod messages;
mod owners;
mod pets;
mod posts;
mod transactions;

use std::str::FromStr;

use anyhow::Context;
use domains::DomainError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url`.
    ///
    /// `sqlite::memory:` gives every connection its own database, so the pool
    /// is pinned to a single connection that never expires.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("parse sqlite url {url}"))?
            .create_if_missing(true);

        let in_memory = url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("connect to sqlite via {url}"))?;
        info!(in_memory, "sqlite pool ready");
        Ok(Self { pool })
    }

    /// Applies the bundled schema. Idempotent.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run sqlite migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Unique violations surface as `Conflict`; everything else is infrastructure.
/// Raw driver text only goes to the logs.
pub(crate) fn db_err(e: sqlx::Error) -> DomainError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            warn!(error = %db.message(), "unique constraint violated");
            let msg = if db.message().contains("pet_owners.email") {
                "email already registered"
            } else {
                "record already exists"
            };
            return DomainError::Conflict(msg.to_string());
        }
    }
    error!(error = %e, "sqlite failure");
    DomainError::internal(e.to_string())
}

#[cfg(test)]
pub(crate) async fn test_store() -> SqliteStore {
    let store = SqliteStore::connect("sqlite::memory:", 1).await.unwrap();
    store.migrate().await.unwrap();
    store
}

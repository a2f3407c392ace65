//! # FurLuv Binary
//!
//! Assembles settings, stores, services and the HTTP router, then serves
//! until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{build_router, AppState, HttpOptions};
use auth_adapters::Argon2Hasher;
use configs::{LogFormat, Settings, StorageBackend};
use services::{EntityService, MediaService, MessageService, OwnerService};
use storage_adapters::media_local::LocalMediaStorage;
use storage_adapters::Repositories;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("load settings")?;
    init_tracing(&settings);

    let repos = open_repositories(&settings).await?;
    let media = LocalMediaStorage::new(&settings.media.upload_dir, &settings.media.url_prefix);

    let state = AppState {
        pets: EntityService::new(repos.pets),
        breeders: EntityService::new(repos.breeders),
        listings: EntityService::new(repos.listings),
        posts: EntityService::new(repos.posts),
        transactions: EntityService::new(repos.transactions),
        owners: OwnerService::new(repos.owners, Arc::new(Argon2Hasher::new())),
        messages: MessageService::new(repos.messages),
        media: MediaService::new(Arc::new(media)),
    };
    let options = HttpOptions {
        cors_origin: settings.server.cors_origin.clone(),
        max_body_bytes: settings.server.max_upload_bytes,
        media_url_prefix: settings.media.url_prefix.clone(),
    };
    let app = build_router(state, &options);

    let addr = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(%addr, backend = ?settings.database.backend, "FurLuv listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down cleanly");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match settings.log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn open_repositories(settings: &Settings) -> anyhow::Result<Repositories> {
    match settings.database.backend {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on restart");
            Ok(Repositories::in_memory())
        }
        StorageBackend::Sqlite => open_sqlite(settings).await,
    }
}

#[cfg(feature = "db-sqlite")]
async fn open_sqlite(settings: &Settings) -> anyhow::Result<Repositories> {
    use secrecy::ExposeSecret;

    let store = storage_adapters::sqlite::SqliteStore::connect(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await
    .context("connect to sqlite")?;
    store.migrate().await.context("run migrations")?;
    Ok(Repositories::sqlite(store))
}

#[cfg(not(feature = "db-sqlite"))]
async fn open_sqlite(_settings: &Settings) -> anyhow::Result<Repositories> {
    anyhow::bail!("built without the db-sqlite feature; set database.backend = \"memory\"")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

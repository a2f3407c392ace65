//! Generic list/get/create/update/delete for every plain entity.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use domains::Entity;
use serde::de::DeserializeOwned;
use serde::Serialize;
use services::EntityService;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// `GET|POST {base}` and `GET|PUT|DELETE {base}/{id}`.
pub fn routes<E>(base: &str) -> Router<AppState>
where
    E: Entity + Serialize,
    E::Draft: DeserializeOwned,
    E::Patch: DeserializeOwned,
    EntityService<E>: FromRef<AppState>,
{
    Router::new()
        .route(base, get(list::<E>).post(create::<E>))
        .route(
            &format!("{base}/{{id}}"),
            get(fetch::<E>).put(update::<E>).delete(remove::<E>),
        )
}

pub async fn list<E>(State(service): State<EntityService<E>>) -> Result<Json<Vec<E>>, ApiError>
where
    E: Entity + Serialize,
{
    Ok(Json(service.list().await?))
}

pub async fn fetch<E>(
    State(service): State<EntityService<E>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<E>, ApiError>
where
    E: Entity + Serialize,
{
    Ok(Json(service.get(id).await?))
}

pub async fn create<E>(
    State(service): State<EntityService<E>>,
    ApiJson(draft): ApiJson<E::Draft>,
) -> Result<(StatusCode, Json<E>), ApiError>
where
    E: Entity + Serialize,
    E::Draft: DeserializeOwned,
{
    Ok((StatusCode::CREATED, Json(service.create(draft).await?)))
}

pub async fn update<E>(
    State(service): State<EntityService<E>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<E::Patch>,
) -> Result<Json<E>, ApiError>
where
    E: Entity + Serialize,
    E::Patch: DeserializeOwned,
{
    Ok(Json(service.update(id, patch).await?))
}

pub async fn remove<E>(
    State(service): State<EntityService<E>>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError>
where
    E: Entity,
{
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

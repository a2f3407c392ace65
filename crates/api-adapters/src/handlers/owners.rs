//! Pet owner accounts. Same CRUD shape as the other entities, plus login,
//! with passwords hashed by the service before they reach the store.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use domains::models::{Credentials, LoginProfile, NewPetOwner, PetOwner, PetOwnerPatch};
use services::OwnerService;

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/petowners", get(list).post(register))
        .route("/api/petowners/login", post(login))
        .route("/api/petowners/{id}", get(fetch).put(update).delete(remove))
}

async fn list(State(owners): State<OwnerService>) -> Result<Json<Vec<PetOwner>>, ApiError> {
    Ok(Json(owners.list().await?))
}

async fn fetch(
    State(owners): State<OwnerService>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PetOwner>, ApiError> {
    Ok(Json(owners.get(id).await?))
}

async fn register(
    State(owners): State<OwnerService>,
    ApiJson(draft): ApiJson<NewPetOwner>,
) -> Result<(StatusCode, Json<PetOwner>), ApiError> {
    Ok((StatusCode::CREATED, Json(owners.register(draft).await?)))
}

async fn update(
    State(owners): State<OwnerService>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<PetOwnerPatch>,
) -> Result<Json<PetOwner>, ApiError> {
    Ok(Json(owners.update(id, patch).await?))
}

async fn remove(
    State(owners): State<OwnerService>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    owners.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn login(
    State(owners): State<OwnerService>,
    ApiJson(creds): ApiJson<Credentials>,
) -> Result<Json<LoginProfile>, ApiError> {
    Ok(Json(owners.login(creds).await?))
}

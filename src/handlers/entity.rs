//! Entity CRUD handlers, generic over the record type. Instantiated once per table in the router.

use super::NOT_FOUND;
use crate::error::AppError;
use crate::extractors::{ItemId, JsonBody};
use crate::model::Entity;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{extract::State, Json};

/// `POST /{collection}`
pub async fn create<E: Entity>(
    State(state): State<AppState>,
    JsonBody(record): JsonBody<E>,
) -> Result<Json<E>, AppError> {
    let created = CrudService::create(&*state.store, record).await?;
    Ok(Json(created))
}

/// `GET /{collection}`. Always an array, `[]` when the table is empty.
pub async fn list<E: Entity>(State(state): State<AppState>) -> Result<Json<Vec<E>>, AppError> {
    let records = CrudService::list::<E>(&*state.store).await?;
    Ok(Json(records))
}

/// `GET /{item}/{id}`. The single record is wrapped in a one-element array;
/// existing clients index `[0]`.
pub async fn read<E: Entity>(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<Vec<E>>, AppError> {
    let records = CrudService::get::<E>(&*state.store, id).await?;
    if records.is_empty() {
        return Err(AppError::NotFound(NOT_FOUND));
    }
    tracing::info!(entity = E::DEF.item, id, "record retrieved");
    Ok(Json(records))
}

/// `PUT /{item}/{id}`
pub async fn update<E: Entity>(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    JsonBody(record): JsonBody<E>,
) -> Result<Json<E>, AppError> {
    let updated = CrudService::update(&*state.store, id, record).await?;
    Ok(Json(updated))
}

/// `DELETE /{item}/{id}`
pub async fn delete<E: Entity>(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<E>, AppError> {
    let deleted = CrudService::delete::<E>(&*state.store, id).await?;
    Ok(Json(deleted))
}

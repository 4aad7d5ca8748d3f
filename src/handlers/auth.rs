//! `POST /authorize`: credential lookup only. Nothing downstream checks the result.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{Login, UserAccount};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn authorize(
    State(state): State<AppState>,
    JsonBody(login): JsonBody<Login>,
) -> Result<Json<UserAccount>, AppError> {
    match CrudService::authorize(&*state.store, &login).await? {
        Some(user) => Ok(Json(user)),
        None => Err(AppError::NotFound("Not Found")),
    }
}

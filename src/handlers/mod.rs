//! HTTP handlers for entity CRUD, login, and unmatched requests.

pub mod auth;
pub mod entity;
pub use auth::authorize;
pub use entity::{create, delete, list, read, update};

use crate::error::AppError;

/// Body for any path that names no resource, and for a keyed lookup with no row.
pub const NOT_FOUND: &str = "Not Found!";

/// Fallback for verbs a known path does not define.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Router fallback.
pub async fn not_found() -> AppError {
    AppError::NotFound(NOT_FOUND)
}

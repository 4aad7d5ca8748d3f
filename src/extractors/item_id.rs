//! Extract the numeric id from `/{item}/{id}`.

use crate::error::AppError;
use crate::handlers::NOT_FOUND;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Trailing integer of an item path. A segment that is not an integer means the path
/// names no resource, so the rejection is 404 rather than 400.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemId(pub i32);

pub(crate) fn parse_id(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

#[async_trait]
impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound(NOT_FOUND))?;
        parse_id(&raw)
            .map(ItemId)
            .ok_or(AppError::NotFound(NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_integers_parse() {
        assert_eq!(parse_id("7"), Some(7));
        assert_eq!(parse_id("-2"), Some(-2));
        assert_eq!(parse_id("+3"), Some(3));
    }

    #[test]
    fn anything_else_is_not_an_id() {
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("7abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("99999999999"), None);
    }
}

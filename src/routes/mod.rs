//! Router assembly: operational routes, entity routes, and the 404 fallback.

mod common;
mod entity;

pub use common::common_routes;
pub use entity::{api_routes, entity_routes};

use crate::handlers::not_found;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Request bodies above this are rejected before decoding.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application router. Unmatched paths answer 404 instead of an empty 200.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

//! Entity CRUD routes built from each record type's descriptor.
//! `/{collection}` takes GET/POST, `/{item}/{id}` takes GET/PUT/DELETE; any other verb is 405.

use crate::handlers::{authorize, create, delete, list, method_not_allowed, read, update};
use crate::model::{BankAccount, Bucket, Entity, LineItem, UserAccount};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn entity_routes<E: Entity>() -> Router<AppState> {
    let def = E::DEF;
    Router::new()
        .route(
            &format!("/{}", def.collection),
            get(list::<E>).post(create::<E>).fallback(method_not_allowed),
        )
        .route(
            &format!("/{}/:id", def.item),
            get(read::<E>)
                .put(update::<E>)
                .delete(delete::<E>)
                .fallback(method_not_allowed),
        )
}

/// Every entity plus `POST /authorize`.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(entity_routes::<UserAccount>())
        .merge(entity_routes::<BankAccount>())
        .merge(entity_routes::<Bucket>())
        .merge(entity_routes::<LineItem>())
        .route("/authorize", post(authorize).fallback(method_not_allowed))
        .with_state(state)
}

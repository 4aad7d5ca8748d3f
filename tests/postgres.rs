//! Router tests against a live PostgreSQL. Each test bootstraps its own schema and drops it
//! afterwards. Skipped unless `DATABASE_URL` points at a database.

mod common;

use axum::{http::StatusCode, Router};
use budget_ledger::{build_router, ensure_schema, AppState, PgStore};
use common::{parse, send};
use serde_json::json;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

static SCHEMA_SEQ: AtomicU32 = AtomicU32::new(0);

struct TestDb {
    pool: PgPool,
    schema: String,
    app: Router,
}

impl TestDb {
    async fn drop_schema(self) {
        sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", self.schema))
            .execute(&self.pool)
            .await
            .expect("failed to drop test schema");
    }
}

async fn test_db() -> Option<TestDb> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() && url != "memory" => url,
        _ => {
            eprintln!("DATABASE_URL not set; skipping PostgreSQL test");
            return None;
        }
    };
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("failed to connect to DATABASE_URL");
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    let schema = format!(
        "ledger_test_{}_{}_{}",
        std::process::id(),
        nanos,
        SCHEMA_SEQ.fetch_add(1, Ordering::Relaxed)
    );
    ensure_schema(&pool, &schema).await.expect("schema bootstrap failed");
    let store = PgStore::new(pool.clone(), schema.clone());
    let app = build_router(AppState::new(Arc::new(store)));
    Some(TestDb { pool, schema, app })
}

#[tokio::test]
async fn duplicate_username_is_forbidden_and_consumes_an_id() {
    let Some(db) = test_db().await else { return };
    let app = &db.app;

    let ann = r#"{"username":"ann","name":"Ann","pin":1234}"#;
    let (status, body) = send(app, "POST", "/users", Some(ann)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["id"], json!(1));

    let (status, body) = send(app, "POST", "/users", Some(ann)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "Username already in use.");

    let (_, body) = send(app, "GET", "/users", None).await;
    assert_eq!(parse(&body).as_array().map(Vec::len), Some(1));

    let bob = r#"{"username":"bob","name":"Bob","pin":1}"#;
    let (_, body) = send(app, "POST", "/users", Some(bob)).await;
    assert_eq!(parse(&body)["id"], json!(3));

    db.drop_schema().await;
}

#[tokio::test]
async fn put_to_taken_username_is_forbidden() {
    let Some(db) = test_db().await else { return };
    let app = &db.app;

    send(app, "POST", "/users", Some(r#"{"username":"ann","name":"Ann","pin":1}"#)).await;
    send(app, "POST", "/users", Some(r#"{"username":"bob","name":"Bob","pin":2}"#)).await;

    let rename = r#"{"username":"ann","name":"Bob","pin":2}"#;
    let (status, body) = send(app, "PUT", "/user/2", Some(rename)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, "Username already in use.");

    let keep = r#"{"username":"bob","name":"Robert","pin":2}"#;
    let (status, _) = send(app, "PUT", "/user/2", Some(keep)).await;
    assert_eq!(status, StatusCode::OK);

    db.drop_schema().await;
}

#[tokio::test]
async fn delete_returns_prior_row_and_missing_id_is_internal_error() {
    let Some(db) = test_db().await else { return };
    let app = &db.app;

    send(app, "POST", "/banks", Some(r#"{"name":"Westpac","ownerid":4}"#)).await;
    let (status, body) = send(app, "DELETE", "/bank/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!({"id": 1, "name": "Westpac", "ownerid": 4}));

    let (status, body) = send(app, "GET", "/bank/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not Found!");

    let (status, body) = send(app, "DELETE", "/bank/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "sql: no rows in result set");

    db.drop_schema().await;
}

#[tokio::test]
async fn line_item_round_trips_every_field() {
    let Some(db) = test_db().await else { return };
    let app = &db.app;

    let submitted = json!({
        "title": "Groceries run",
        "description": "weekly shop",
        "amount": 82.45,
        "bucket": 3,
        "bank": 2,
        "ownerid": 1
    });
    let (status, body) = send(app, "POST", "/lineitems", Some(&submitted.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    let id = parse(&body)["id"].as_i64().expect("id assigned");

    let (status, body) = send(app, "GET", &format!("/lineitem/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = submitted.clone();
    expected["id"] = json!(id);
    assert_eq!(parse(&body), json!([expected]));

    let (_, body) = send(app, "GET", "/lineitems", None).await;
    assert_eq!(parse(&body), json!([expected]));

    db.drop_schema().await;
}

#[tokio::test]
async fn authorize_matches_stored_credentials() {
    let Some(db) = test_db().await else { return };
    let app = &db.app;

    send(app, "POST", "/users", Some(r#"{"username":"Ann","name":"Ann","pin":1234}"#)).await;

    let good = r#"{"username":"Ann","pin":1234}"#;
    let (status, body) = send(app, "POST", "/authorize", Some(good)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["username"], json!("Ann"));

    let wrong_pin = r#"{"username":"Ann","pin":1}"#;
    let (status, body) = send(app, "POST", "/authorize", Some(wrong_pin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not Found");

    db.drop_schema().await;
}

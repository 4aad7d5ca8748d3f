//! Data access: one statement per operation against one table.

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::{create_table_ddl, ensure_schema};

use crate::config::{Settings, StoreKind};
use crate::error::AppError;
use crate::model::EntityDef;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Text PostgreSQL reports for a unique-constraint violation.
pub const DUPLICATE_KEY: &str = "duplicate key value violates unique constraint";

/// Persisted state. Rows are JSON objects keyed by column name, `id` included.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert the mutable columns (in descriptor order) and return the generated id.
    async fn insert(&self, entity: &'static EntityDef, values: Vec<Value>) -> Result<i32, AppError>;

    async fn list(&self, entity: &'static EntityDef) -> Result<Vec<Value>, AppError>;

    /// Zero or one row.
    async fn get(&self, entity: &'static EntityDef, id: i32) -> Result<Vec<Value>, AppError>;

    /// Replace every mutable column. `None` when no row has that id.
    async fn update(
        &self,
        entity: &'static EntityDef,
        id: i32,
        values: Vec<Value>,
    ) -> Result<Option<i32>, AppError>;

    /// Remove the row and return its prior state. `None` when no row has that id.
    async fn delete(&self, entity: &'static EntityDef, id: i32) -> Result<Option<Value>, AppError>;

    /// First user whose username and pin both match exactly.
    async fn find_login(&self, username: &str, pin: i32) -> Result<Option<Value>, AppError>;

    /// Cheap round trip used by the readiness check.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Build the configured store. Postgres connects eagerly and optionally bootstraps the tables.
pub async fn connect(settings: &Settings) -> Result<Arc<dyn Store>, AppError> {
    match &settings.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreKind::Postgres { url } => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(url)
                .await?;
            tracing::info!("Connected to Database!");
            if settings.bootstrap_schema {
                ensure_schema(&pool, &settings.db_schema).await?;
            }
            Ok(Arc::new(PgStore::new(pool, settings.db_schema.clone())))
        }
    }
}

/// Map a uniqueness violation to the entity's conflict message.
/// Entities without one keep the raw store error.
pub(crate) fn conflict_or(entity: &EntityDef, raw: String, fallback: AppError) -> AppError {
    match entity.conflict_message {
        Some(msg) if raw.contains(DUPLICATE_KEY) => AppError::Conflict(msg.to_string()),
        _ => fallback,
    }
}

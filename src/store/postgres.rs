//! PostgreSQL store. Every operation holds one pooled connection for a single statement;
//! the connection goes back to the pool when it is dropped, on success and error alike.

use super::{conflict_or, Store, DUPLICATE_KEY};
use crate::error::AppError;
use crate::model::{EntityDef, PK_COLUMN};
use crate::sql::{self, PgBindValue, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: String) -> Self {
        PgStore { pool, schema }
    }
}

fn bound(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = query.bind(PgBindValue::from_json(p));
    }
    query
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() || db.message().contains(DUPLICATE_KEY)
        }
        _ => false,
    }
}

fn classify(entity: &EntityDef, err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        // Normalise so the conflict text check also holds for drivers reporting only SQLSTATE.
        let raw = format!("{}: {}", DUPLICATE_KEY, err);
        conflict_or(entity, raw, AppError::Db(err))
    } else {
        AppError::Db(err)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert(
        &self,
        entity: &'static EntityDef,
        values: Vec<Value>,
    ) -> Result<i32, AppError> {
        let q = sql::insert(entity, &self.schema, values);
        let mut conn = self.pool.acquire().await?;
        let row = bound(&q)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| classify(entity, e))?;
        Ok(row.try_get::<i32, _>(PK_COLUMN)?)
    }

    async fn list(&self, entity: &'static EntityDef) -> Result<Vec<Value>, AppError> {
        let q = sql::select_all(entity, &self.schema);
        let mut conn = self.pool.acquire().await?;
        let rows = bound(&q).fetch_all(&mut *conn).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn get(&self, entity: &'static EntityDef, id: i32) -> Result<Vec<Value>, AppError> {
        let q = sql::select_by_id(entity, &self.schema, id);
        let mut conn = self.pool.acquire().await?;
        let rows = bound(&q).fetch_all(&mut *conn).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn update(
        &self,
        entity: &'static EntityDef,
        id: i32,
        values: Vec<Value>,
    ) -> Result<Option<i32>, AppError> {
        let q = sql::update(entity, &self.schema, id, values);
        let mut conn = self.pool.acquire().await?;
        let row = bound(&q)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| classify(entity, e))?;
        match row {
            Some(r) => Ok(Some(r.try_get::<i32, _>(PK_COLUMN)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, entity: &'static EntityDef, id: i32) -> Result<Option<Value>, AppError> {
        let q = sql::delete(entity, &self.schema, id);
        let mut conn = self.pool.acquire().await?;
        let row = bound(&q).fetch_optional(&mut *conn).await?;
        Ok(row.map(|r| row_to_json(&r)))
    }

    async fn find_login(&self, username: &str, pin: i32) -> Result<Option<Value>, AppError> {
        let q = sql::select_login(&self.schema, username, pin);
        let mut conn = self.pool.acquire().await?;
        let row = bound(&q).fetch_optional(&mut *conn).await?;
        Ok(row.map(|r| row_to_json(&r)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn row_to_json(row: &PgRow) -> Value {
    use sqlx::Column;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

/// Only the column types the four tables use: integer, double precision, text.
fn cell_to_value(row: &PgRow, name: &str) -> Value {
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::from(n);
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::from(n);
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        return Value::from(n);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    Value::Null
}

//! In-process store with the same contract as PostgreSQL: serial ids from 1 that are
//! consumed even by a rejected insert, unique columns enforced with the same error text,
//! rows returned in insertion order.

use super::{conflict_or, Store, DUPLICATE_KEY};
use crate::error::AppError;
use crate::model::{Entity, EntityDef, UserAccount, PK_COLUMN};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Map<String, Value>>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_table<T>(
        &self,
        entity: &EntityDef,
        f: impl FnOnce(&mut Table) -> T,
    ) -> Result<T, AppError> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))?;
        Ok(f(tables.entry(entity.table).or_default()))
    }
}

fn to_row(entity: &EntityDef, id: i32, values: Vec<Value>) -> Map<String, Value> {
    let mut row = Map::new();
    row.insert(PK_COLUMN.to_string(), Value::from(id));
    for (c, v) in entity.columns.iter().zip(values) {
        row.insert(c.name.to_string(), v);
    }
    row
}

/// Error for the first unique column whose value another row already holds.
fn unique_violation(
    entity: &EntityDef,
    table: &Table,
    row: &Map<String, Value>,
    except: Option<i32>,
) -> Option<AppError> {
    for c in entity.columns.iter().filter(|c| c.unique) {
        let taken = table
            .rows
            .iter()
            .any(|(id, other)| Some(*id) != except && other.get(c.name) == row.get(c.name));
        if taken {
            let raw = format!("{} \"{}_{}_key\"", DUPLICATE_KEY, entity.table, c.name);
            return Some(conflict_or(entity, raw.clone(), AppError::Internal(raw)));
        }
    }
    None
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert(
        &self,
        entity: &'static EntityDef,
        values: Vec<Value>,
    ) -> Result<i32, AppError> {
        self.with_table(entity, |table| {
            // A sequence advances before the constraint check.
            table.last_id += 1;
            let id = table.last_id;
            let row = to_row(entity, id, values);
            if let Some(err) = unique_violation(entity, table, &row, None) {
                return Err(err);
            }
            table.rows.insert(id, row);
            Ok(id)
        })?
    }

    async fn list(&self, entity: &'static EntityDef) -> Result<Vec<Value>, AppError> {
        self.with_table(entity, |table| {
            table.rows.values().cloned().map(Value::Object).collect()
        })
    }

    async fn get(&self, entity: &'static EntityDef, id: i32) -> Result<Vec<Value>, AppError> {
        self.with_table(entity, |table| {
            table.rows.get(&id).cloned().map(Value::Object).into_iter().collect()
        })
    }

    async fn update(
        &self,
        entity: &'static EntityDef,
        id: i32,
        values: Vec<Value>,
    ) -> Result<Option<i32>, AppError> {
        self.with_table(entity, |table| {
            if !table.rows.contains_key(&id) {
                return Ok(None);
            }
            let row = to_row(entity, id, values);
            if let Some(err) = unique_violation(entity, table, &row, Some(id)) {
                return Err(err);
            }
            table.rows.insert(id, row);
            Ok(Some(id))
        })?
    }

    async fn delete(&self, entity: &'static EntityDef, id: i32) -> Result<Option<Value>, AppError> {
        self.with_table(entity, |table| table.rows.remove(&id).map(Value::Object))
    }

    async fn find_login(&self, username: &str, pin: i32) -> Result<Option<Value>, AppError> {
        self.with_table(UserAccount::DEF, |table| {
            table
                .rows
                .values()
                .find(|row| {
                    row.get("username").and_then(Value::as_str) == Some(username)
                        && row.get("pin").and_then(Value::as_i64) == Some(i64::from(pin))
                })
                .cloned()
                .map(Value::Object)
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

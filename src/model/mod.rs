//! Entity records and the static table descriptors that drive SQL generation.

mod bank;
mod bucket;
mod line_item;
mod user;

pub use bank::BankAccount;
pub use bucket::Bucket;
pub use line_item::LineItem;
pub use user::{Login, UserAccount};

use crate::error::AppError;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Primary key column shared by every table. Generated by the store, never written by clients.
pub const PK_COLUMN: &str = "id";

/// One mutable column: its name and the PostgreSQL type used for parameter casts and DDL.
#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub pg_type: &'static str,
    pub unique: bool,
}

impl ColumnDef {
    pub const fn new(name: &'static str, pg_type: &'static str) -> Self {
        ColumnDef {
            name,
            pg_type,
            unique: false,
        }
    }

    pub const fn unique(name: &'static str, pg_type: &'static str) -> Self {
        ColumnDef {
            name,
            pg_type,
            unique: true,
        }
    }
}

/// Static description of one table and the HTTP paths that expose it.
#[derive(Debug)]
pub struct EntityDef {
    pub table: &'static str,
    /// Collection path segment, e.g. `users` for `/users`.
    pub collection: &'static str,
    /// Item path segment, e.g. `user` for `/user/{id}`.
    pub item: &'static str,
    /// Mutable columns in binding order. The primary key is not listed.
    pub columns: &'static [ColumnDef],
    /// Response body for a uniqueness violation on create/update.
    /// `None` passes the store text through.
    pub conflict_message: Option<&'static str>,
}

impl EntityDef {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }
}

/// A persisted record type bound to its table descriptor.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const DEF: &'static EntityDef;

    fn id(&self) -> i32;

    fn set_id(&mut self, id: i32);

    /// Mutable field values, in the same order as `DEF.columns`.
    fn values(&self) -> Vec<Value>;

    /// Decode a row returned by the store (a JSON object keyed by column name).
    fn from_row(row: Value) -> Result<Self, AppError> {
        serde_json::from_value(row)
            .map_err(|e| AppError::Internal(format!("{} row decode: {}", Self::DEF.table, e)))
    }
}

/// Field decoder: JSON `null` reads as the zero value, like an absent field.
pub(crate) fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

/// Every table, in the order schema bootstrap creates them.
pub fn all_entities() -> [&'static EntityDef; 4] {
    [
        UserAccount::DEF,
        BankAccount::DEF,
        Bucket::DEF,
        LineItem::DEF,
    ]
}

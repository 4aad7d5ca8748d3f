//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from a static entity descriptor.

use crate::model::{Entity, EntityDef, UserAccount, PK_COLUMN};
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from descriptors and config).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub(crate) fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Push a value and return its `$n::type` placeholder.
    fn push_param(&mut self, v: Value, pg_type: &str) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), pg_type)
    }
}

/// `id` followed by every mutable column, in descriptor order.
fn select_column_list(entity: &EntityDef) -> String {
    std::iter::once(PK_COLUMN)
        .chain(entity.column_names())
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// INSERT of every mutable column; the store generates the id and returns it.
pub fn insert(entity: &EntityDef, schema: &str, values: Vec<Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, entity.table);
    let mut cols = Vec::with_capacity(entity.columns.len());
    let mut placeholders = Vec::with_capacity(entity.columns.len());
    for (c, v) in entity.columns.iter().zip(values) {
        cols.push(quoted(c.name));
        placeholders.push(q.push_param(v, c.pg_type));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        cols.join(", "),
        placeholders.join(", "),
        quoted(PK_COLUMN)
    );
    q
}

/// SELECT every row. No ORDER BY: rows come back in store order.
pub fn select_all(entity: &EntityDef, schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {}",
        select_column_list(entity),
        qualified_table(schema, entity.table)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(entity: &EntityDef, schema: &str, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id), "integer");
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {}",
        select_column_list(entity),
        qualified_table(schema, entity.table),
        quoted(PK_COLUMN),
        ph
    );
    q
}

/// UPDATE by id: full replace of every mutable column.
/// RETURNING id tells the caller whether the row existed.
pub fn update(entity: &EntityDef, schema: &str, id: i32, values: Vec<Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = qualified_table(schema, entity.table);
    let mut sets = Vec::with_capacity(entity.columns.len());
    for (c, v) in entity.columns.iter().zip(values) {
        let ph = q.push_param(v, c.pg_type);
        sets.push(format!("{} = {}", quoted(c.name), ph));
    }
    let id_ph = q.push_param(Value::from(id), "integer");
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        table,
        sets.join(", "),
        quoted(PK_COLUMN),
        id_ph,
        quoted(PK_COLUMN)
    );
    q
}

/// DELETE by id, returning the prior row.
pub fn delete(entity: &EntityDef, schema: &str, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id), "integer");
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {} RETURNING {}",
        qualified_table(schema, entity.table),
        quoted(PK_COLUMN),
        ph,
        select_column_list(entity)
    );
    q
}

/// Exact, case-sensitive credential match on the user table.
pub fn select_login(schema: &str, username: &str, pin: i32) -> QueryBuf {
    let entity = UserAccount::DEF;
    let mut q = QueryBuf::new();
    let user_ph = q.push_param(Value::from(username), "text");
    let pin_ph = q.push_param(Value::from(pin), "integer");
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = {} AND {} = {} LIMIT 1",
        select_column_list(entity),
        qualified_table(schema, entity.table),
        quoted("username"),
        user_ph,
        quoted("pin"),
        pin_ph
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bucket, LineItem};
    use serde_json::json;

    #[test]
    fn insert_binds_every_mutable_column() {
        let q = insert(UserAccount::DEF, "public", vec![json!("ann"), json!("Ann"), json!(1234)]);
        assert_eq!(
            q.sql,
            r#"INSERT INTO "public"."useraccount" ("username", "name", "pin") VALUES ($1::text, $2::text, $3::integer) RETURNING "id""#
        );
        assert_eq!(q.params, vec![json!("ann"), json!("Ann"), json!(1234)]);
    }

    #[test]
    fn select_all_has_no_params_or_ordering() {
        let q = select_all(Bucket::DEF, "public");
        assert_eq!(q.sql, r#"SELECT "id", "name", "ownerid" FROM "public"."bucket""#);
        assert!(q.params.is_empty());
    }

    #[test]
    fn update_puts_id_last() {
        let item = LineItem {
            title: "Rent".into(),
            amount: 950.0,
            ..Default::default()
        };
        let q = update(LineItem::DEF, "ledger", 9, item.values());
        assert_eq!(
            q.sql,
            r#"UPDATE "ledger"."lineitem" SET "title" = $1::text, "description" = $2::text, "amount" = $3::double precision, "bucket" = $4::integer, "bank" = $5::integer, "ownerid" = $6::integer WHERE "id" = $7::integer RETURNING "id""#
        );
        assert_eq!(q.params.len(), 7);
        assert_eq!(q.params[6], json!(9));
    }

    #[test]
    fn delete_returns_prior_row() {
        let q = delete(Bucket::DEF, "public", 4);
        assert_eq!(
            q.sql,
            r#"DELETE FROM "public"."bucket" WHERE "id" = $1::integer RETURNING "id", "name", "ownerid""#
        );
        assert_eq!(q.params, vec![json!(4)]);
    }

    #[test]
    fn login_values_are_never_inlined() {
        let q = select_login("public", "bob' OR '1'='1", 1);
        assert!(!q.sql.contains("bob"));
        assert!(q.sql.ends_with("LIMIT 1"));
        assert_eq!(q.params, vec![json!("bob' OR '1'='1"), json!(1)]);
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quoted(r#"we"ird"#), r#""we""ird""#);
    }
}

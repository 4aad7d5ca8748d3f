//! Table bootstrap. Creates the schema and any missing tables; existing tables are never altered.

use crate::error::AppError;
use crate::model::{all_entities, EntityDef, PK_COLUMN};
use crate::sql::{qualified_table, quoted};
use sqlx::PgPool;

/// `CREATE TABLE IF NOT EXISTS` for one entity.
/// No foreign keys: owner/bucket/bank ids are stored as given.
pub fn create_table_ddl(entity: &EntityDef, schema: &str) -> String {
    let mut col_defs = vec![format!("{} SERIAL PRIMARY KEY", quoted(PK_COLUMN))];
    for c in entity.columns {
        let mut def = format!("{} {} NOT NULL", quoted(c.name), c.pg_type);
        if c.unique {
            def.push_str(" UNIQUE");
        }
        col_defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        qualified_table(schema, entity.table),
        col_defs.join(", ")
    )
}

pub async fn ensure_schema(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;
    for entity in all_entities() {
        sqlx::query(&create_table_ddl(entity, schema))
            .execute(pool)
            .await?;
        tracing::debug!(table = entity.table, "table ready");
    }
    tracing::info!(schema, "schema bootstrap complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, UserAccount};

    #[test]
    fn user_table_has_unique_username() {
        assert_eq!(
            create_table_ddl(UserAccount::DEF, "public"),
            r#"CREATE TABLE IF NOT EXISTS "public"."useraccount" ("id" SERIAL PRIMARY KEY, "username" text NOT NULL UNIQUE, "name" text NOT NULL, "pin" integer NOT NULL)"#
        );
    }
}

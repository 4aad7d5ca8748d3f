//! Generic CRUD over any [`Entity`], one store statement per call.

use crate::error::AppError;
use crate::model::{Entity, Login, UserAccount};
use crate::store::Store;

/// Body of the 500 returned when `DELETE` finds no row.
pub const NO_ROWS: &str = "sql: no rows in result set";

pub struct CrudService;

impl CrudService {
    /// Insert and return the record carrying its generated id.
    pub async fn create<E: Entity>(store: &dyn Store, mut record: E) -> Result<E, AppError> {
        let id = store.insert(E::DEF, record.values()).await?;
        record.set_id(id);
        tracing::info!(entity = E::DEF.item, id, "record created");
        Ok(record)
    }

    pub async fn list<E: Entity>(store: &dyn Store) -> Result<Vec<E>, AppError> {
        let rows = store.list(E::DEF).await?;
        let records = rows.into_iter().map(E::from_row).collect::<Result<Vec<_>, _>>()?;
        tracing::info!(entity = E::DEF.item, count = records.len(), "records listed");
        Ok(records)
    }

    /// Zero or one record; the caller decides what "none" means.
    pub async fn get<E: Entity>(store: &dyn Store, id: i32) -> Result<Vec<E>, AppError> {
        let rows = store.get(E::DEF, id).await?;
        rows.into_iter().map(E::from_row).collect()
    }

    /// Full replace by id. The returned record is the submitted one with the path id,
    /// not a re-read; an id with no row is logged and still answered.
    pub async fn update<E: Entity>(
        store: &dyn Store,
        id: i32,
        mut record: E,
    ) -> Result<E, AppError> {
        match store.update(E::DEF, id, record.values()).await? {
            Some(_) => tracing::info!(entity = E::DEF.item, id, "record updated"),
            None => tracing::warn!(entity = E::DEF.item, id, "update matched no row"),
        }
        record.set_id(id);
        Ok(record)
    }

    /// Delete by id and return the prior state.
    pub async fn delete<E: Entity>(store: &dyn Store, id: i32) -> Result<E, AppError> {
        let row = store
            .delete(E::DEF, id)
            .await?
            .ok_or_else(|| AppError::DeleteMissing(NO_ROWS.to_string()))?;
        tracing::info!(entity = E::DEF.item, id, "record deleted");
        E::from_row(row)
    }

    /// Exact username and pin match. No token or session is issued.
    pub async fn authorize(
        store: &dyn Store,
        login: &Login,
    ) -> Result<Option<UserAccount>, AppError> {
        tracing::info!("Authorization request received.");
        store
            .find_login(&login.username, login.pin)
            .await?
            .map(UserAccount::from_row)
            .transpose()
    }
}

//! Budget ledger: JSON CRUD over users, bank accounts, budget buckets and line items,
//! backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Settings, StoreKind};
pub use error::{AppError, ConfigError};
pub use model::{BankAccount, Bucket, Entity, LineItem, Login, UserAccount};
pub use routes::build_router;
pub use service::CrudService;
pub use state::AppState;
pub use store::{ensure_schema, MemoryStore, PgStore, Store};

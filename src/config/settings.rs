use crate::error::ConfigError;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://admin:admin@db:5432/goproject?sslmode=disable";
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 9000));
pub const DEFAULT_LOG_FILE: &str = "logs.txt";
pub const DEFAULT_LOG_FILTER: &str = "budget_ledger=info,server=info,tower_http=info";

/// `DATABASE_URL=memory` selects the in-process store.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreKind {
    Memory,
    Postgres { url: String },
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub store: StoreKind,
    /// PostgreSQL schema holding the four tables.
    pub db_schema: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    /// Append-only log file, written alongside stdout.
    pub log_file: PathBuf,
    /// Create missing tables at startup.
    pub bootstrap_schema: bool,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let store = if url.eq_ignore_ascii_case("memory") {
            StoreKind::Memory
        } else {
            StoreKind::Postgres { url }
        };

        let db_schema = get("DB_SCHEMA").unwrap_or_else(|| "public".into());
        let max_connections = parse("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5u32)?;
        if max_connections == 0 {
            return Err(invalid("DB_MAX_CONNECTIONS", "0", "must be at least 1"));
        }
        let bind_addr = parse("BIND_ADDR", get("BIND_ADDR"), DEFAULT_BIND_ADDR)?;
        let log_file = PathBuf::from(get("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.into()));
        let bootstrap_schema = match get("BOOTSTRAP_SCHEMA") {
            Some(v) => parse_bool("BOOTSTRAP_SCHEMA", &v)?,
            None => true,
        };
        let log_filter = get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.into());

        Ok(Settings {
            store,
            db_schema,
            max_connections,
            bind_addr,
            log_file,
            bootstrap_schema,
            log_filter,
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(v) => v.parse().map_err(|e: T::Err| invalid(key, &v, &e.to_string())),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, v: &str) -> Result<bool, ConfigError> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, v, "expected true or false")),
    }
}

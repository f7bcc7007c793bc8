//! # Storage
//!
//! A sqlite database shared by both actors through one [`Database`] handle.
//!
//! Statements are built with sea-query against the identifiers in [`schema`] and bound with
//! sea-query-binder. Multi-step writes run inside a transaction obtained from
//! [`Database::begin`]; a transaction that is dropped without `commit` rolls back, so an
//! early `?` return leaves no partial rows behind.
//!
//! Identifiers are stored as hyphenated UUID text and timestamps as RFC 3339 text.
//!
//! An in-memory database (`sqlite::memory:`) lives exactly as long as its connection, so the
//! pool is pinned to a single connection that never expires. File databases get a pool of
//! `max_connections` in WAL mode, shared by both actors.
//!
//! Write transactions open with `BEGIN IMMEDIATE`. A deferred transaction that reads first
//! and writes later cannot wait for a concurrent writer: sqlite fails the lock upgrade with
//! `SQLITE_BUSY` at once. Taking the write lock at `BEGIN` lets the busy timeout apply.

pub mod error;
pub mod schema;

pub use error::StorageError;

use crate::config::AppSettings;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Row, Sqlite, Transaction};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn connect(settings: &AppSettings) -> Result<Self, StorageError> {
        let in_memory = settings.is_in_memory();
        let mut options = SqliteConnectOptions::from_str(&settings.database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(settings.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        info!(url = %settings.database_url, in_memory, "Database connected");
        Ok(Self { pool })
    }

    /// A fresh, migrated in-memory database.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let database = Self::connect(&AppSettings::default()).await?;
        database.migrate().await?;
        Ok(database)
    }

    /// Creates missing tables. Safe to run on every start.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        for statement in schema::SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!(statements = schema::SCHEMA.len(), "Schema ready");
        Ok(())
    }

    /// Opens a write transaction holding the database write lock until commit or drop.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, StorageError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StorageError> {
        Ok(self.pool.acquire().await?)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Reads a text column and parses it, e.g. into an id newtype.
pub(crate) fn parse_column<T: FromStr>(
    row: &SqliteRow,
    column: &'static str,
) -> Result<T, StorageError> {
    let raw: String = row.try_get(column)?;
    match raw.parse() {
        Ok(value) => Ok(value),
        Err(_) => Err(StorageError::InvalidValue { column, value: raw }),
    }
}

pub(crate) fn optional_column<T: FromStr>(
    row: &SqliteRow,
    column: &'static str,
) -> Result<Option<T>, StorageError> {
    let raw: Option<String> = row.try_get(column)?;
    match raw {
        None => Ok(None),
        Some(raw) => match raw.parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(StorageError::InvalidValue { column, value: raw }),
        },
    }
}

pub(crate) fn u32_column(row: &SqliteRow, column: &'static str) -> Result<u32, StorageError> {
    let raw: i64 = row.try_get(column)?;
    u32::try_from(raw).map_err(|_| StorageError::InvalidValue {
        column,
        value: raw.to_string(),
    })
}

/// Fixed-width RFC 3339 text, so stored timestamps sort chronologically as strings.
pub(crate) fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn timestamp_column(
    row: &SqliteRow,
    column: &'static str,
) -> Result<DateTime<Utc>, StorageError> {
    let raw: String = row.try_get(column)?;
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(time) => Ok(time.with_timezone(&Utc)),
        Err(_) => Err(StorageError::InvalidValue { column, value: raw }),
    }
}

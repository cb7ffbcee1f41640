//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with SQLite.
//! Each table gets a repository struct that borrows a connection or an open transaction.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  (api::handlers - validation and HTTP mapping)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        │
//!        ↓
//! ┌─────────────┐
//! │   SQLite    │
//! └─────────────┘
//! ```
//!
//! # Connections
//!
//! Handlers acquire one pooled connection per request (or begin a transaction for writes) and
//! hand it to a repository. The connection returns to the pool when the guard is dropped, on the
//! success and the error path alike:
//!
//! ```ignore
//! let mut conn = pool.acquire().await?;
//! let students = Students::new(&mut conn).list().await?;
//!
//! let mut tx = pool.begin().await?;
//! Attendance::new(&mut tx).upsert_day(&request).await?;
//! tx.commit().await?; // dropped without commit = rollback
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
pub mod schema;

use crate::config::DatabaseConfig;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;

/// Build the process-wide connection pool from configuration.
///
/// Callers beyond `max_connections` wait for a free connection (up to the acquire timeout)
/// instead of failing immediately.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(config.busy_timeout());

    let pool = &config.pool;
    SqlitePoolOptions::new()
        .max_connections(pool.max_connections)
        .min_connections(pool.min_connections)
        .acquire_timeout(pool.acquire_timeout())
        .idle_timeout(pool.idle_timeout())
        .max_lifetime(pool.max_lifetime())
        .connect_with(options)
        .await
}

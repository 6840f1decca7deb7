// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! [`Database`] owns the single `tokio_rusqlite::Connection` for the process
//! lifetime. All statements are serialized through tokio-rusqlite's single
//! background thread, which eliminates SQLITE_BUSY under concurrent access
//! and makes every `call` closure atomic with respect to other callers.
//! Do NOT create additional Connection instances for writes.

use rusqlite::types::Value;
use tokio_rusqlite::Connection;
use tracing::{debug, error};

use guildstore_core::GuildStoreError;

/// Handle to the single live connection.
///
/// Query modules accept `&Database` and go through [`Database::connection`]
/// or the generic helpers; the raw connection is never handed to callers
/// outside this crate.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens the backing file, creating its parent directory if needed, and
    /// configures the connection (foreign keys on, busy timeout, and WAL
    /// journaling when `wal_mode` is set).
    ///
    /// Fails fatally on an inaccessible directory or file; the hosting
    /// process should abort startup on error.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, GuildStoreError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    error!(path, error = %e, "failed to create database directory");
                    GuildStoreError::Connection {
                        source: Box::new(e),
                    }
                })?;
            }
        }

        let conn = Connection::open(path).await.map_err(|e| {
            error!(path, error = %e, "failed to open database");
            GuildStoreError::Connection {
                source: Box::new(e),
            }
        })?;

        conn.call(move |conn| -> rusqlite::Result<()> {
            conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
            if wal_mode {
                conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
            }
            Ok(())
        })
        .await
        .map_err(|e| {
            error!(path, error = %e, "failed to configure connection");
            GuildStoreError::Connection {
                source: Box::new(e),
            }
        })?;

        debug!(path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// Returns the shared connection handle for query modules.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Brings the schema up to date by running all pending embedded
    /// migrations. Idempotent: safe to call on every process start.
    pub async fn migrate(&self) -> Result<(), GuildStoreError> {
        let result = self
            .conn
            .call(|conn| -> rusqlite::Result<Result<(), GuildStoreError>> {
                Ok(crate::migrations::run_migrations(conn))
            })
            .await
            .map_err(map_tr_err)?;
        result?;
        debug!("schema migrations applied");
        Ok(())
    }

    /// Checkpoints the WAL and closes the connection.
    pub async fn close(self) -> Result<(), GuildStoreError> {
        self.conn
            .call(|conn| -> rusqlite::Result<()> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(map_tr_err)?;
        debug!("database connection closed");
        Ok(())
    }

    // --- Generic query helpers ---
    //
    // All values originating from a caller are bound via parameter
    // placeholders, never interpolated into SQL text.

    /// Runs a parameterized mutating statement. Auto-commits per statement;
    /// no implicit multi-statement transactions across calls. Returns the
    /// number of rows affected.
    pub async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<usize, GuildStoreError> {
        let sql = sql.to_string();
        self.conn
            .call(move |conn| -> rusqlite::Result<usize> {
                Ok(conn.execute(&sql, rusqlite::params_from_iter(params))?)
            })
            .await
            .map_err(map_tr_err)
    }

    /// Runs a parameterized query and maps at most one row, or `None` when
    /// no row matches.
    pub async fn fetch_one<T, F>(
        &self,
        sql: &str,
        params: Vec<Value>,
        map: F,
    ) -> Result<Option<T>, GuildStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&rusqlite::Row<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        let sql = sql.to_string();
        self.conn
            .call(move |conn| -> rusqlite::Result<Option<T>> {
                let mut stmt = conn.prepare(&sql)?;
                match stmt.query_row(rusqlite::params_from_iter(params), map) {
                    Ok(value) => Ok(Some(value)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(map_tr_err)
    }

    /// Runs a parameterized query and maps every matching row, empty when
    /// none match.
    pub async fn fetch_all<T, F>(
        &self,
        sql: &str,
        params: Vec<Value>,
        map: F,
    ) -> Result<Vec<T>, GuildStoreError>
    where
        T: Send + 'static,
        F: Fn(&rusqlite::Row<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        let sql = sql.to_string();
        self.conn
            .call(move |conn| -> rusqlite::Result<Vec<T>> {
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(rusqlite::params_from_iter(params), |row| map(row))?;
                let mut out = Vec::new();
                for row in rows {
                    out.push(row?);
                }
                Ok(out)
            })
            .await
            .map_err(map_tr_err)
    }
}

/// Maps a tokio-rusqlite error into the store's error taxonomy.
///
/// Unique-key and foreign-key violations become `ConstraintConflict` so the
/// get-or-create path can distinguish them; everything else is a `Query`
/// failure that should propagate and fail fast.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error) -> GuildStoreError {
    match e {
        tokio_rusqlite::Error::Error(rusqlite::Error::SqliteFailure(err, msg))
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            GuildStoreError::ConstraintConflict {
                source: Box::new(rusqlite::Error::SqliteFailure(err, msg)),
            }
        }
        other => GuildStoreError::Query {
            source: Box::new(other),
        },
    }
}

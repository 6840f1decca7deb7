// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the GuildStore data layer.

use thiserror::Error;

/// The primary error type used across the store trait and its implementations.
///
/// An absent row is never an error: read operations return `Option`/empty
/// `Vec` and callers branch on presence.
#[derive(Debug, Error)]
pub enum GuildStoreError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The backing file or its directory could not be opened or created.
    /// Fatal at startup; the hosting process should abort.
    #[error("connection error: {source}")]
    Connection {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A schema bootstrap (migration) statement failed.
    #[error("schema error: {source}")]
    Schema {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A unique-key or foreign-key constraint rejected a statement.
    /// Expected and recoverable on get-or-create insert paths; unexpected
    /// anywhere else.
    #[error("constraint conflict: {source}")]
    ConstraintConflict {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Query execution failed (malformed SQL, type mismatch). A programming
    /// error, not expected at runtime; fail fast.
    #[error("query error: {source}")]
    Query {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors (lifecycle misuse and the like).
    #[error("internal error: {0}")]
    Internal(String),
}

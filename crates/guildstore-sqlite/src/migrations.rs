// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Refinery tracks applied migrations in its own
//! `refinery_schema_history` table, so running on every process start is
//! idempotent regardless of prior state.

use guildstore_core::GuildStoreError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), GuildStoreError> {
    embedded::migrations::runner().run(conn).map_err(|e| {
        tracing::error!(error = %e, "schema migration failed");
        GuildStoreError::Schema {
            source: Box::new(e),
        }
    })?;
    Ok(())
}

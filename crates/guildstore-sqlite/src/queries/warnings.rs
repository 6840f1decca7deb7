// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only moderation warning records.

use rusqlite::params;
use rusqlite::types::Value;

use guildstore_core::GuildStoreError;

use crate::database::Database;
use crate::models::Warning;

/// Append a warning with a server-generated ISO-8601 UTC timestamp.
/// Returns the new warning id. Existing rows are never touched.
pub async fn add_warning(
    db: &Database,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    reason: Option<&str>,
) -> Result<i64, GuildStoreError> {
    let reason = reason.map(|r| r.to_string());
    db.connection()
        .call(move |conn| -> rusqlite::Result<i64> {
            conn.execute(
                "INSERT INTO warnings (guild_id, user_id, moderator_id, reason, timestamp)
                 VALUES (?1, ?2, ?3, ?4, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))",
                params![guild_id, user_id, moderator_id, reason],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All warnings for the key, in insertion order.
pub async fn get_warnings(
    db: &Database,
    guild_id: i64,
    user_id: i64,
) -> Result<Vec<Warning>, GuildStoreError> {
    db.fetch_all(
        "SELECT id, guild_id, user_id, moderator_id, reason, timestamp
         FROM warnings WHERE guild_id = ?1 AND user_id = ?2
         ORDER BY id ASC",
        vec![Value::from(guild_id), Value::from(user_id)],
        |row| {
            Ok(Warning {
                id: row.get(0)?,
                guild_id: row.get(1)?,
                user_id: row.get(2)?,
                moderator_id: row.get(3)?,
                reason: row.get(4)?,
                timestamp: row.get(5)?,
            })
        },
    )
    .await
}

// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-guild user-progress accessors: get-or-create, overwrite updates,
//! and the leaderboard.

use rusqlite::params;
use rusqlite::types::Value;

use guildstore_core::GuildStoreError;

use crate::database::Database;
use crate::models::{LeaderboardEntry, UserProgress};

/// Leaderboard size used when the caller passes a non-positive limit.
const DEFAULT_LEADERBOARD_LIMIT: i64 = 10;

/// Get the progress row for `(guild_id, user_id)`, creating it with default
/// values if absent. Always returns a row.
///
/// The insert uses `ON CONFLICT DO NOTHING`, so two callers racing on the
/// same new key both succeed and exactly one row is created; the re-read
/// then returns it to both. Both statements run inside one `call` closure
/// and are therefore serialized on the connection thread.
pub async fn get_user_data(
    db: &Database,
    guild_id: i64,
    user_id: i64,
) -> Result<UserProgress, GuildStoreError> {
    db.connection()
        .call(move |conn| -> rusqlite::Result<UserProgress> {
            conn.execute(
                "INSERT INTO user_data (guild_id, user_id)
                 VALUES (?1, ?2)
                 ON CONFLICT (guild_id, user_id) DO NOTHING",
                params![guild_id, user_id],
            )?;
            let row = conn.query_row(
                "SELECT guild_id, user_id, xp, level, money
                 FROM user_data WHERE guild_id = ?1 AND user_id = ?2",
                params![guild_id, user_id],
                |row| {
                    Ok(UserProgress {
                        guild_id: row.get(0)?,
                        user_id: row.get(1)?,
                        xp: row.get(2)?,
                        level: row.get(3)?,
                        money: row.get(4)?,
                    })
                },
            )?;
            Ok(row)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Overwrite `xp` and `level` for an existing row. Returns the affected-row
/// count: zero when the key does not exist.
pub async fn update_user_xp(
    db: &Database,
    guild_id: i64,
    user_id: i64,
    xp: i64,
    level: i64,
) -> Result<usize, GuildStoreError> {
    db.execute(
        "UPDATE user_data SET xp = ?1, level = ?2 WHERE guild_id = ?3 AND user_id = ?4",
        vec![
            Value::from(xp),
            Value::from(level),
            Value::from(guild_id),
            Value::from(user_id),
        ],
    )
    .await
}

/// Overwrite `money` for an existing row. Returns the affected-row count:
/// zero when the key does not exist.
pub async fn update_user_balance(
    db: &Database,
    guild_id: i64,
    user_id: i64,
    money: i64,
) -> Result<usize, GuildStoreError> {
    db.execute(
        "UPDATE user_data SET money = ?1 WHERE guild_id = ?2 AND user_id = ?3",
        vec![Value::from(money), Value::from(guild_id), Value::from(user_id)],
    )
    .await
}

/// Top rows for the guild ordered by level, with xp as the explicit
/// tie-break. Non-positive limits fall back to the default of 10.
pub async fn get_leaderboard(
    db: &Database,
    guild_id: i64,
    limit: i64,
) -> Result<Vec<LeaderboardEntry>, GuildStoreError> {
    let limit = if limit > 0 {
        limit
    } else {
        DEFAULT_LEADERBOARD_LIMIT
    };
    db.fetch_all(
        "SELECT user_id, xp, level FROM user_data
         WHERE guild_id = ?1
         ORDER BY level DESC, xp DESC
         LIMIT ?2",
        vec![Value::from(guild_id), Value::from(limit)],
        |row| {
            Ok(LeaderboardEntry {
                user_id: row.get(0)?,
                xp: row.get(1)?,
                level: row.get(2)?,
            })
        },
    )
    .await
}

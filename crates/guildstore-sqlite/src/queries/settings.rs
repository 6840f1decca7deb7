// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-guild settings with a typed configuration blob.
//!
//! The `leveling_config` column holds JSON, but (de)serialization is
//! confined to this module: callers only ever see the typed
//! [`LevelingConfig`] structure.

use rusqlite::types::Value;

use guildstore_core::GuildStoreError;

use crate::database::Database;
use crate::models::{GuildSettings, LevelingConfig};

/// Typed settings for a guild, or `None` if the guild was never configured.
pub async fn get_guild_settings(
    db: &Database,
    guild_id: i64,
) -> Result<Option<GuildSettings>, GuildStoreError> {
    let row = db
        .fetch_one(
            "SELECT guild_id, leveling_config FROM guild_settings WHERE guild_id = ?1",
            vec![Value::from(guild_id)],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            },
        )
        .await?;

    match row {
        Some((guild_id, blob)) => {
            let leveling = match blob {
                Some(json) => serde_json::from_str(&json).map_err(|e| {
                    GuildStoreError::Query {
                        source: Box::new(e),
                    }
                })?,
                None => LevelingConfig::default(),
            };
            Ok(Some(GuildSettings { guild_id, leveling }))
        }
        None => Ok(None),
    }
}

/// Create or replace the settings row for the guild. At most one row per
/// guild exists; the upsert keeps it that way.
pub async fn set_guild_settings(
    db: &Database,
    settings: &GuildSettings,
) -> Result<(), GuildStoreError> {
    let json = serde_json::to_string(&settings.leveling).map_err(|e| {
        GuildStoreError::Query {
            source: Box::new(e),
        }
    })?;
    db.execute(
        "INSERT INTO guild_settings (guild_id, leveling_config) VALUES (?1, ?2)
         ON CONFLICT (guild_id) DO UPDATE SET leveling_config = excluded.leveling_config",
        vec![Value::from(settings.guild_id), Value::from(json)],
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        db.migrate().await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn settings_round_trip() {
        let (db, _dir) = setup_db().await;

        let settings = GuildSettings {
            guild_id: 42,
            leveling: LevelingConfig { enabled: false },
        };
        set_guild_settings(&db, &settings).await.unwrap();

        let loaded = get_guild_settings(&db, 42).await.unwrap().unwrap();
        assert_eq!(loaded, settings);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn unconfigured_guild_returns_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_guild_settings(&db, 1).await.unwrap().is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_keeps_one_row_per_guild() {
        let (db, _dir) = setup_db().await;

        let mut settings = GuildSettings {
            guild_id: 7,
            leveling: LevelingConfig { enabled: true },
        };
        set_guild_settings(&db, &settings).await.unwrap();

        settings.leveling.enabled = false;
        set_guild_settings(&db, &settings).await.unwrap();

        let count: i64 = db
            .fetch_one(
                "SELECT COUNT(*) FROM guild_settings WHERE guild_id = 7",
                vec![],
                |row| row.get(0),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(count, 1);

        let loaded = get_guild_settings(&db, 7).await.unwrap().unwrap();
        assert!(!loaded.leveling.enabled);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn null_blob_yields_default_leveling_config() {
        let (db, _dir) = setup_db().await;

        db.execute(
            "INSERT INTO guild_settings (guild_id) VALUES (?1)",
            vec![Value::from(3_i64)],
        )
        .await
        .unwrap();

        let loaded = get_guild_settings(&db, 3).await.unwrap().unwrap();
        assert!(loaded.leveling.enabled);

        db.close().await.unwrap();
    }
}

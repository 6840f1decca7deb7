// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command feature-toggle accessors.

use rusqlite::params;
use rusqlite::types::Value;

use guildstore_core::GuildStoreError;

use crate::database::Database;
use crate::models::{CommandToggle, NewCommandToggle};

/// Every command-toggle row, unfiltered, in a stable listing order.
pub async fn get_commands(db: &Database) -> Result<Vec<CommandToggle>, GuildStoreError> {
    db.fetch_all(
        "SELECT id, name, category, description, enabled, required_role
         FROM commands ORDER BY category, name",
        vec![],
        |row| {
            Ok(CommandToggle {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
                description: row.get(3)?,
                enabled: row.get(4)?,
                required_role: row.get(5)?,
            })
        },
    )
    .await
}

/// Insert a command-toggle row (bootstrap seeding). Returns the new id.
pub async fn insert_command(
    db: &Database,
    command: &NewCommandToggle,
) -> Result<i64, GuildStoreError> {
    let command = command.clone();
    db.connection()
        .call(move |conn| -> rusqlite::Result<i64> {
            conn.execute(
                "INSERT INTO commands (name, category, description, enabled, required_role)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    command.name,
                    command.category,
                    command.description,
                    command.enabled,
                    command.required_role,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set `enabled` for the row with that id. Returns the affected-row count:
/// zero when the id does not exist (no row created, no error). There is no
/// implicit flip here; callers compute the target value themselves.
pub async fn toggle_command(
    db: &Database,
    command_id: i64,
    enabled: bool,
) -> Result<usize, GuildStoreError> {
    db.execute(
        "UPDATE commands SET enabled = ?1 WHERE id = ?2",
        vec![Value::from(enabled), Value::from(command_id)],
    )
    .await
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

    fn make_command(name: &str, category: &str) -> NewCommandToggle {
        NewCommandToggle {
            name: name.to_string(),
            category: Some(category.to_string()),
            description: Some(format!("the {name} command")),
            enabled: true,
            required_role: "member".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_and_list_commands() {
        let (db, _dir) = setup_db().await;

        insert_command(&db, &make_command("ban", "moderation")).await.unwrap();
        insert_command(&db, &make_command("daily", "economy")).await.unwrap();

        let commands = get_commands(&db).await.unwrap();
        assert_eq!(commands.len(), 2);
        // Ordered by category, then name.
        assert_eq!(commands[0].name, "daily");
        assert_eq!(commands[1].name, "ban");
        assert!(commands.iter().all(|c| c.enabled));
        assert!(commands.iter().all(|c| c.required_role == "member"));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn toggle_is_idempotent_with_explicit_target() {
        let (db, _dir) = setup_db().await;

        let id = insert_command(&db, &make_command("ban", "moderation")).await.unwrap();

        assert_eq!(toggle_command(&db, id, false).await.unwrap(), 1);
        assert_eq!(toggle_command(&db, id, false).await.unwrap(), 1);

        let commands = get_commands(&db).await.unwrap();
        assert!(!commands[0].enabled);

        assert_eq!(toggle_command(&db, id, true).await.unwrap(), 1);
        assert_eq!(toggle_command(&db, id, true).await.unwrap(), 1);
        let commands = get_commands(&db).await.unwrap();
        assert!(commands[0].enabled);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn toggle_missing_id_is_a_noop() {
        let (db, _dir) = setup_db().await;

        let affected = toggle_command(&db, 12345, true).await.unwrap();
        assert_eq!(affected, 0);
        assert!(get_commands(&db).await.unwrap().is_empty(), "no row created");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_commands_empty_table() {
        let (db, _dir) = setup_db().await;
        assert!(get_commands(&db).await.unwrap().is_empty());
        db.close().await.unwrap();
    }
}

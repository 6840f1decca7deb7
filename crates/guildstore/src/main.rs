// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GuildStore - operator CLI for the per-guild data store.
//!
//! The store instance is constructed here, at the composition root, and
//! passed by reference to each subcommand; there is no process-wide
//! singleton.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use guildstore_config::GuildStoreConfig;
use guildstore_core::{GuildStore, GuildStoreError, HealthStatus, NewCommandToggle};
use guildstore_sqlite::SqliteGuildStore;

/// GuildStore - operator CLI for the per-guild data store.
#[derive(Parser, Debug)]
#[command(name = "guildstore", version, about, long_about = None)]
struct Cli {
    /// Path to a config file (overrides the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the database file and bring the schema up to date.
    Init,
    /// Seed command-toggle rows from a TOML file, skipping existing names.
    SeedCommands {
        /// TOML file with `[[command]]` entries.
        file: PathBuf,
    },
    /// Print the top users of a guild by level, then XP.
    Leaderboard {
        #[arg(long)]
        guild: i64,
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// Print the moderation warnings for a guild member.
    Warnings {
        #[arg(long)]
        guild: i64,
        #[arg(long)]
        user: i64,
    },
    /// Verify the store is reachable and healthy.
    Status,
}

/// Seed file layout: a list of `[[command]]` tables.
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default, rename = "command")]
    commands: Vec<NewCommandToggle>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => guildstore_config::load_config_from_path(path),
        None => guildstore_config::load_config(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("guildstore: invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    let store = SqliteGuildStore::new(config.storage.clone());
    if let Err(e) = store.initialize().await {
        error!(error = %e, "store initialization failed");
        std::process::exit(1);
    }

    let code = run(&cli.command, &store).await;
    if let Err(e) = store.close().await {
        error!(error = %e, "store close failed");
    }
    std::process::exit(code);
}

fn init_tracing(config: &GuildStoreConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Dispatch one subcommand. Read paths degrade to empty output on storage
/// errors; write paths surface the error so the operator can retry.
async fn run(command: &Commands, store: &SqliteGuildStore) -> i32 {
    match command {
        Commands::Init => {
            // initialize() in main already opened and migrated.
            info!("database initialized");
            println!("guildstore: database ready");
            0
        }
        Commands::SeedCommands { file } => match seed_commands(store, file).await {
            Ok((inserted, skipped)) => {
                println!("guildstore: seeded {inserted} commands ({skipped} already present)");
                0
            }
            Err(e) => {
                error!(error = %e, "seeding failed");
                eprintln!("guildstore: seeding failed: {e}");
                1
            }
        },
        Commands::Leaderboard { guild, limit } => {
            match store.get_leaderboard(*guild, *limit).await {
                Ok(board) => {
                    for (rank, entry) in board.iter().enumerate() {
                        println!(
                            "{:>3}. user {:<20} level {:<4} xp {}",
                            rank + 1,
                            entry.user_id,
                            entry.level,
                            entry.xp
                        );
                    }
                    0
                }
                Err(e) => {
                    error!(error = %e, guild, "leaderboard unavailable");
                    0
                }
            }
        }
        Commands::Warnings { guild, user } => match store.get_warnings(*guild, *user).await {
            Ok(warnings) => {
                for warning in &warnings {
                    println!(
                        "#{} {} by moderator {}: {}",
                        warning.id,
                        format_timestamp(&warning.timestamp),
                        warning.moderator_id,
                        warning.reason.as_deref().unwrap_or("(no reason)")
                    );
                }
                0
            }
            Err(e) => {
                error!(error = %e, guild, user, "warnings unavailable");
                0
            }
        },
        Commands::Status => match store.health_check().await {
            Ok(HealthStatus::Healthy) => {
                println!("guildstore: healthy");
                0
            }
            Ok(HealthStatus::Unhealthy(reason)) => {
                println!("guildstore: unhealthy: {reason}");
                1
            }
            Err(e) => {
                error!(error = %e, "health check failed");
                eprintln!("guildstore: health check failed: {e}");
                1
            }
        },
    }
}

/// Insert the commands from the seed file that are not already present by
/// name, so re-seeding on every deploy is idempotent.
async fn seed_commands(
    store: &SqliteGuildStore,
    file: &PathBuf,
) -> Result<(usize, usize), GuildStoreError> {
    let content = std::fs::read_to_string(file).map_err(|e| {
        GuildStoreError::Config(format!("cannot read seed file {}: {e}", file.display()))
    })?;
    let seed: SeedFile = toml::from_str(&content)
        .map_err(|e| GuildStoreError::Config(format!("invalid seed file: {e}")))?;

    let existing: std::collections::HashSet<String> = store
        .get_commands()
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();

    let mut inserted = 0;
    let mut skipped = 0;
    for command in &seed.commands {
        if existing.contains(&command.name) {
            skipped += 1;
            continue;
        }
        store.insert_command(command).await?;
        inserted += 1;
    }
    info!(inserted, skipped, "command seeding complete");
    Ok((inserted, skipped))
}

/// Render a stored ISO-8601 timestamp without the sub-second part; fall back
/// to the raw string if it does not parse.
fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn seed_file_parses_with_defaults() {
        let toml = r#"
[[command]]
name = "ban"
category = "moderation"
description = "Ban a member"
required_role = "admin"

[[command]]
name = "ping"
"#;
        let seed: SeedFile = toml::from_str(toml).unwrap();
        assert_eq!(seed.commands.len(), 2);
        assert_eq!(seed.commands[0].required_role, "admin");
        assert_eq!(seed.commands[1].required_role, "member");
        assert!(seed.commands[1].enabled);
    }

    #[test]
    fn empty_seed_file_is_valid() {
        let seed: SeedFile = toml::from_str("").unwrap();
        assert!(seed.commands.is_empty());
    }

    #[test]
    fn timestamp_formatting_handles_millis_and_garbage() {
        assert_eq!(
            format_timestamp("2026-08-24T12:34:56.789Z"),
            "2026-08-24 12:34:56 UTC"
        );
        assert_eq!(format_timestamp("not-a-timestamp"), "not-a-timestamp");
    }

    #[tokio::test]
    async fn seed_commands_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("seed.db");
        let seed_path = dir.path().join("commands.toml");
        std::fs::write(
            &seed_path,
            r#"
[[command]]
name = "ban"
category = "moderation"

[[command]]
name = "daily"
category = "economy"
"#,
        )
        .unwrap();

        let store = SqliteGuildStore::new(guildstore_config::StorageConfig {
            database_path: db_path.to_str().unwrap().to_string(),
            wal_mode: true,
        });
        store.initialize().await.unwrap();

        let (inserted, skipped) = seed_commands(&store, &seed_path).await.unwrap();
        assert_eq!((inserted, skipped), (2, 0));

        let (inserted, skipped) = seed_commands(&store, &seed_path).await.unwrap();
        assert_eq!((inserted, skipped), (0, 2));

        assert_eq!(store.get_commands().await.unwrap().len(), 2);
    }
}

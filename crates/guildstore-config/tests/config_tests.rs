// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the GuildStore configuration system.

use guildstore_config::model::GuildStoreConfig;
use guildstore_config::{load_config_from_path, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[storage]
database_path = "/tmp/test.db"
wal_mode = false

[log]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.log.level, "debug");
}

/// Missing sections fall back to compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should deserialize");
    let defaults = GuildStoreConfig::default();
    assert_eq!(config.storage.database_path, defaults.storage.database_path);
    assert_eq!(config.storage.wal_mode, defaults.storage.wal_mode);
    assert_eq!(config.log.level, defaults.log.level);
}

/// Partial section keeps defaults for omitted fields.
#[test]
fn partial_storage_section_keeps_other_defaults() {
    let toml = r#"
[storage]
database_path = "./data/bot.db"
"#;

    let config = load_config_from_str(toml).expect("partial TOML should deserialize");
    assert_eq!(config.storage.database_path, "./data/bot.db");
    assert!(config.storage.wal_mode, "omitted wal_mode keeps default");
}

/// Unknown field in [storage] section is rejected.
#[test]
fn unknown_field_in_storage_produces_error() {
    let toml = r#"
[storage]
databse_path = "/tmp/oops.db"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("databse_path"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_produces_error() {
    let toml = r#"
[webserver]
port = 8080
"#;

    let result = load_config_from_str(toml);
    assert!(result.is_err(), "unknown section should be rejected");
}

/// Loading from an explicit file path works.
#[test]
fn load_from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guildstore.toml");
    std::fs::write(
        &path,
        r#"
[storage]
database_path = "/var/lib/guildstore/guilds.db"
"#,
    )
    .unwrap();

    let config = load_config_from_path(&path).expect("file config should load");
    assert_eq!(config.storage.database_path, "/var/lib/guildstore/guilds.db");
}

/// A missing file path yields defaults rather than an error.
#[test]
fn load_from_missing_path_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    let config = load_config_from_path(&path).expect("missing file should fall back to defaults");
    assert_eq!(config.log.level, "info");
}

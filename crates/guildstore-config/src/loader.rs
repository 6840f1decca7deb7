// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./guildstore.toml` > `~/.config/guildstore/guildstore.toml`
//! > `/etc/guildstore/guildstore.toml` with environment variable overrides
//! via `GUILDSTORE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::GuildStoreConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/guildstore/guildstore.toml` (system-wide)
/// 3. `~/.config/guildstore/guildstore.toml` (user XDG config)
/// 4. `./guildstore.toml` (local directory)
/// 5. `GUILDSTORE_*` environment variables
pub fn load_config() -> Result<GuildStoreConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GuildStoreConfig::default()))
        .merge(Toml::file("/etc/guildstore/guildstore.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("guildstore/guildstore.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("guildstore.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<GuildStoreConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GuildStoreConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GuildStoreConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GuildStoreConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `GUILDSTORE_STORAGE_DATABASE_PATH` must
/// map to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("GUILDSTORE_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: GUILDSTORE_STORAGE_DATABASE_PATH -> "storage_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("storage_", "storage.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}

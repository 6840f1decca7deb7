// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the GuildStore data layer.
//!
//! Layered TOML configuration (system, XDG user, local directory) merged
//! with `GUILDSTORE_*` environment overrides via Figment. Unknown keys are
//! rejected at load time.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{GuildStoreConfig, LogConfig, StorageConfig};

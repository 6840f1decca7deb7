// SPDX-FileCopyrightText: 2026 GuildStore Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for store backends.

pub mod store;

pub use store::GuildStore;

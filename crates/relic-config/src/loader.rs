// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./relic.toml` > `~/.config/relic/relic.toml` > `/etc/relic/relic.toml`
//! with environment variable overrides via `RELIC_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::RelicConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/relic/relic.toml`
/// 3. `~/.config/relic/relic.toml`
/// 4. `./relic.toml`
/// 5. `RELIC_*` environment variables
pub fn load_config() -> Result<RelicConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
pub fn load_config_from_str(toml_content: &str) -> Result<RelicConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RelicConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<RelicConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RelicConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Config files consulted by [`load_config`], lowest precedence first.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/relic/relic.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("relic").join("relic.toml"));
    }
    paths.push(PathBuf::from("relic.toml"));
    paths
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    config_paths()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(RelicConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        .merge(env_provider())
}

/// Environment provider mapping `RELIC_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that keys containing
/// underscores survive: `RELIC_SERVER_BASE_URL` must become `server.base_url`.
fn env_provider() -> Env {
    Env::prefixed("RELIC_").map(|key| {
        key.as_str()
            .replacen("server_", "server.", 1)
            .replacen("executor_", "executor.", 1)
            .into()
    })
}

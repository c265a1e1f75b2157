// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Relic action client.
//!
//! `[server]` and `[executor]` sections are read from layered TOML files and
//! `RELIC_*` environment variables, rejected on unknown keys, and validated.
//! Failures come back as [`ConfigError`]s that render with source spans and
//! typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use relic_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Server: {}", config.server.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{config_paths, load_config, load_config_from_path, load_config_from_str};
pub use model::{ExecutorConfig, RelicConfig, ServerConfig};

/// Loads the layered configuration and validates it.
///
/// Extraction errors are resolved against the TOML files that exist, so
/// each diagnostic can point at its key.
pub fn load_and_validate() -> Result<RelicConfig, Vec<ConfigError>> {
    let config = loader::load_config()
        .map_err(|err| diagnostic::figment_to_config_errors(err, &read_sources()))?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// Like [`load_and_validate`], for a single inline TOML document.
pub fn load_and_validate_str(toml_content: &str) -> Result<RelicConfig, Vec<ConfigError>> {
    let config = loader::load_config_from_str(toml_content).map_err(|err| {
        let sources = [("<inline>".to_string(), toml_content.to_string())];
        diagnostic::figment_to_config_errors(err, &sources)
    })?;
    validation::validate_config(&config)?;
    Ok(config)
}

/// `(path, contents)` of every readable config file, highest precedence first.
fn read_sources() -> Vec<(String, String)> {
    loader::config_paths()
        .into_iter()
        .rev()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}

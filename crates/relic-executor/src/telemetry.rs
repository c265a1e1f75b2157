// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscriber set-up for hosts that have no tracing configuration of their own.

use relic_config::model::ExecutorConfig;
use relic_core::RelicError;
use tracing_subscriber::EnvFilter;

const RELIC_TARGETS: [&str; 3] = ["relic_executor", "relic_http", "relic_config"];

/// Filter directive enabling `log_level` for Relic crates and `warn` elsewhere.
pub fn filter_directive(log_level: &str) -> String {
    let mut directive = RELIC_TARGETS
        .iter()
        .map(|target| format!("{target}={log_level}"))
        .collect::<Vec<_>>()
        .join(",");
    directive.push_str(",warn");
    directive
}

/// Installs a global `fmt` subscriber. `RUST_LOG` overrides the configured level.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &ExecutorConfig) -> Result<(), RelicError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init()
        .map_err(|e| RelicError::Internal(format!("failed to install tracing subscriber: {e}")))
}

// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Relic action client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Relic configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelicConfig {
    /// Game server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Action executor settings.
    #[serde(default)]
    pub executor: ExecutorConfig,
}

/// Game server connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Base URL of the game API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account bearer token. `None` sends unauthenticated requests.
    #[serde(default)]
    pub token: Option<String>,

    /// Upper bound on a single action request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.artifactsmmo.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("relic/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Action executor configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Longest time `execute` waits for a character's cooldown before giving up.
    /// `None` waits indefinitely.
    #[serde(default)]
    pub max_cooldown_wait_secs: Option<u64>,

    /// Tracing filter directive the host should install (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ExecutorConfig {
    pub fn max_cooldown_wait(&self) -> Option<Duration> {
        self.max_cooldown_wait_secs.map(Duration::from_secs)
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_cooldown_wait_secs: None,
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_follow_seconds_fields() {
        let mut config = RelicConfig::default();
        assert_eq!(config.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.executor.max_cooldown_wait(), None);

        config.executor.max_cooldown_wait_secs = Some(90);
        assert_eq!(
            config.executor.max_cooldown_wait(),
            Some(Duration::from_secs(90))
        );
    }

    #[test]
    fn user_agent_carries_crate_version() {
        let config = ServerConfig::default();
        assert!(config.user_agent.starts_with("relic/"));
    }
}

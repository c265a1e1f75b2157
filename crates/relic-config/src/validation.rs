// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::RelicConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &RelicConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.server.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.base_url must not be empty".to_string(),
        });
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        || base_url.contains(char::is_whitespace)
    {
        errors.push(ConfigError::Validation {
            message: format!("server.base_url `{base_url}` is not an http(s) URL"),
        });
    }

    if let Some(token) = &config.server.token
        && token.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "server.token must not be blank when set".to_string(),
        });
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "server.request_timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.executor.max_cooldown_wait_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "executor.max_cooldown_wait_secs must be greater than 0 when set"
                .to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.executor.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "executor.log_level `{}` is not one of: {}",
                config.executor.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&RelicConfig::default()).is_ok());
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = RelicConfig::default();
        config.server.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "server.base_url"));
    }

    #[test]
    fn zero_timeouts_fail_validation() {
        let mut config = RelicConfig::default();
        config.server.request_timeout_secs = 0;
        config.executor.max_cooldown_wait_secs = Some(0);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(has_message(&errors, "request_timeout_secs"));
        assert!(has_message(&errors, "max_cooldown_wait_secs"));
    }

    #[test]
    fn blank_token_fails_validation() {
        let mut config = RelicConfig::default();
        config.server.token = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "server.token"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = RelicConfig::default();
        config.executor.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "executor.log_level"));
    }
}

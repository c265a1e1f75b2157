// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Relic action client.

use std::time::Duration;

use thiserror::Error;

/// The primary error type used across Relic crates.
///
/// Note that action execution itself never surfaces this type: failures of a
/// submitted action are reported as data through
/// [`JobOutcome`](crate::types::JobOutcome).
#[derive(Debug, Error)]
pub enum RelicError {
    /// Configuration errors (invalid TOML, bad URL, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// An action request could not be constructed.
    #[error("invalid action request: {0}")]
    InvalidRequest(String),

    /// Payload encoding or decoding failed.
    #[error("codec error: {message}")]
    Codec {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The transport could not be set up.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RelicError {
    /// Shorthand for a codec error wrapping an underlying cause.
    pub fn codec(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Codec {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// A failure to obtain any server response for a submitted action.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established or was reset.
    #[error("connection failed: {message}")]
    Connect { message: String },

    /// No response arrived within the allowed time.
    #[error("request timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// The request was cancelled before a response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// Any other HTTP-level failure (bad request construction, redirect loop).
    #[error("http error: {message}")]
    Http { message: String },

    /// The response body could not be read.
    #[error("failed to read response body: {message}")]
    Body { message: String },
}

impl TransportError {
    /// Returns true if this error was caused by a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of raw transport results to classified [`JobOutcome`]s.
//!
//! Server error codes are mapped explicitly. An error body without a code
//! falls back to the numeric status conventions of the game API; anything
//! still unrecognized becomes [`JobStatus::Undefined`] with the server's
//! message preserved.

use std::str::FromStr;

use relic_core::{
    ActionCodec, ActionKind, ErrorCode, JobOutcome, JobStatus, RawResponse, ServerError,
    TransportError,
};
use strum::{Display, EnumString};
use tracing::{debug, error, warn, Span};

/// Error codes the game server is known to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ServerErrorCode {
    CharacterNotFound,
    MapNotFound,
    ItemNotFound,
    ResourceNotFound,
    MonsterNotFound,
    InsufficientSkillLevel,
    /// Placeholder until the server documents its "too early" signal.
    CharacterInCooldown,
}

impl ServerErrorCode {
    pub fn status(self) -> JobStatus {
        match self {
            Self::CharacterNotFound
            | Self::MapNotFound
            | Self::ItemNotFound
            | Self::ResourceNotFound
            | Self::MonsterNotFound => JobStatus::NotFound,
            Self::InsufficientSkillLevel => JobStatus::InsufficientSkill,
            Self::CharacterInCooldown => JobStatus::CooldownViolation,
        }
    }
}

/// Classification by HTTP status when the body carries no error code.
fn status_from_http(status: u16) -> JobStatus {
    match status {
        404 | 498 => JobStatus::NotFound,
        493 => JobStatus::InsufficientSkill,
        499 => JobStatus::CooldownViolation,
        _ => JobStatus::Undefined,
    }
}

fn classify_server_error(http_status: u16, error: &ServerError) -> JobStatus {
    match &error.code {
        Some(ErrorCode::Text(code)) => ServerErrorCode::from_str(code)
            .map(ServerErrorCode::status)
            .unwrap_or(JobStatus::Undefined),
        Some(ErrorCode::Number(code)) => status_from_http(*code),
        None => status_from_http(http_status),
    }
}

/// Classifies the result of one submission.
///
/// Pure apart from logging: never retries, sleeps, or touches gate state.
/// `span` is the parent for the diagnostic events.
pub fn classify(
    kind: ActionKind,
    result: Result<RawResponse, TransportError>,
    codec: &dyn ActionCodec,
    span: &Span,
) -> JobOutcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            warn!(parent: span, verb = kind.verb(), error = %err, "no response from server");
            return JobOutcome::transport_failure(err.to_string());
        }
    };

    let decoded = codec.decode(kind, &response.body);

    if response.is_success() {
        return match decoded {
            Ok(decoded) => match (decoded.error, decoded.data) {
                (None, data @ Some(_)) => {
                    debug!(
                        parent: span,
                        verb = kind.verb(),
                        cooldown_seconds = decoded.cooldown_seconds,
                        "action succeeded"
                    );
                    JobOutcome::success(decoded.cooldown_seconds, data)
                }
                (Some(server_error), _) => {
                    finish_error(kind, response.status, server_error, decoded.cooldown_seconds, span)
                }
                (None, None) => {
                    warn!(parent: span, verb = kind.verb(), "success response without data");
                    JobOutcome::transport_failure("response contained no result data")
                }
            },
            Err(err) => {
                warn!(parent: span, verb = kind.verb(), error = %err, "malformed success payload");
                JobOutcome::transport_failure(err.to_string())
            }
        };
    }

    match decoded {
        Ok(decoded) => {
            let server_error = decoded.error.unwrap_or_else(|| ServerError {
                code: None,
                message: format!("server returned status {}", response.status),
            });
            finish_error(kind, response.status, server_error, decoded.cooldown_seconds, span)
        }
        // An unreadable error body still is a server response.
        Err(_) => {
            let server_error = ServerError {
                code: None,
                message: format!(
                    "server returned status {}: {}",
                    response.status,
                    String::from_utf8_lossy(&response.body).trim()
                ),
            };
            finish_error(kind, response.status, server_error, 0, span)
        }
    }
}

fn finish_error(
    kind: ActionKind,
    http_status: u16,
    server_error: ServerError,
    cooldown_seconds: u32,
    span: &Span,
) -> JobOutcome {
    let status = classify_server_error(http_status, &server_error);
    let code = server_error
        .code
        .as_ref()
        .map_or_else(|| "-".to_string(), ErrorCode::to_string);

    if status == JobStatus::CooldownViolation {
        error!(
            parent: span,
            verb = kind.verb(),
            http_status,
            code = %code,
            message = %server_error.message,
            "server rejected action during cooldown; gate and server disagree"
        );
    } else {
        warn!(
            parent: span,
            verb = kind.verb(),
            http_status,
            code = %code,
            status = %status,
            message = %server_error.message,
            "action failed"
        );
    }

    JobOutcome::failed(status, server_error.message, cooldown_seconds)
}

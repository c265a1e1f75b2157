// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for game API response bodies in the JSON envelope format.

use relic_core::RawResponse;
use serde_json::{json, Value};

fn respond(status: u16, body: Value) -> RawResponse {
    RawResponse::new(status, body.to_string())
}

fn cooldown(seconds: u32) -> Value {
    json!({"total_seconds": seconds, "remaining_seconds": seconds})
}

/// A successful move to `(x, y)`.
pub fn moved(x: i32, y: i32, cooldown_seconds: u32) -> RawResponse {
    respond(
        200,
        json!({"data": {
            "cooldown": cooldown(cooldown_seconds),
            "destination": {"x": x, "y": y},
        }}),
    )
}

/// A won fight without drops.
pub fn fight_won(xp: u32, gold: u32, cooldown_seconds: u32) -> RawResponse {
    respond(
        200,
        json!({"data": {
            "cooldown": cooldown(cooldown_seconds),
            "fight": {"result": "win", "xp": xp, "gold": gold, "drops": []},
        }}),
    )
}

/// A successful gathering of one `item`.
pub fn gathered(item: &str, xp: u32, cooldown_seconds: u32) -> RawResponse {
    respond(
        200,
        json!({"data": {
            "cooldown": cooldown(cooldown_seconds),
            "details": {"xp": xp, "items": [{"code": item, "quantity": 1}]},
        }}),
    )
}

/// A successful rest.
pub fn rested(hp_restored: u32, cooldown_seconds: u32) -> RawResponse {
    respond(
        200,
        json!({"data": {
            "cooldown": cooldown(cooldown_seconds),
            "hp_restored": hp_restored,
        }}),
    )
}

/// An error envelope carrying a server error code.
pub fn error(status: u16, code: &str, message: &str) -> RawResponse {
    respond(status, json!({"error": {"code": code, "message": message}}))
}

/// An error envelope without a code, as older endpoints send.
pub fn error_without_code(status: u16, message: &str) -> RawResponse {
    respond(status, json!({"error": {"message": message}}))
}

/// An error envelope whose code is the numeric game status.
pub fn error_with_numeric_code(status: u16, code: u16, message: &str) -> RawResponse {
    respond(status, json!({"error": {"code": code, "message": message}}))
}

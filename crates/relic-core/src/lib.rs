// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Relic action client.
//!
//! This crate provides the request and outcome types for character actions,
//! the error types, and the transport and codec traits that the executor
//! consumes.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{RelicError, TransportError};
pub use traits::{ActionCodec, Transport};
pub use types::{
    Action, ActionData, ActionKind, ActionRequest, CharacterName, Decoded, ErrorCode,
    FightResult, ItemStack, JobOutcome, JobStatus, RawResponse, ServerError,
};

// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Codec trait for the action wire format.

use crate::error::RelicError;
use crate::types::{Action, ActionKind, Decoded};

/// Encodes action parameters and decodes server response bodies.
pub trait ActionCodec: Send + Sync + 'static {
    /// Encodes the parameters of `action` into a request body.
    fn encode(&self, action: &Action) -> Result<Vec<u8>, RelicError>;

    /// Decodes a response body for an action of the given kind.
    ///
    /// Returns an error only when the body is not a recognizable response at
    /// all; server-reported errors are returned in [`Decoded::error`].
    fn decode(&self, kind: ActionKind, body: &[u8]) -> Result<Decoded, RelicError>;
}

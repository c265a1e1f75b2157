// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport trait for submitting encoded actions to the game server.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::RawResponse;

/// Submits one encoded action for one character and returns the raw response.
///
/// Implementations own connection and authentication details. They must not
/// retry: any retry policy lives above the executor, driven by the returned
/// [`JobOutcome`](crate::types::JobOutcome).
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn submit(
        &self,
        character: &str,
        verb: &str,
        payload: Vec<u8>,
    ) -> Result<RawResponse, TransportError>;
}

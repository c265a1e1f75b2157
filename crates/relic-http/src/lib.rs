// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP collaborators for the Relic action executor.
//!
//! [`HttpTransport`] submits encoded actions with `reqwest`; [`JsonCodec`]
//! speaks the game API's JSON envelope.

pub mod codec;
pub mod transport;

pub use codec::JsonCodec;
pub use transport::HttpTransport;

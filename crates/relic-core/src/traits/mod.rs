// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits consumed by the action executor.
//!
//! The transport owns the network session; the codec owns the wire format.
//! Both are injected as trait objects so tests can substitute scripted fakes.

pub mod codec;
pub mod transport;

pub use codec::ActionCodec;
pub use transport::Transport;

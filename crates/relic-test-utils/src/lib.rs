// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Relic action executor.
//!
//! - [`MockTransport`]: scripted transport that records every submission
//! - [`responses`]: builders for game API JSON bodies

pub mod mock_transport;
pub mod responses;

pub use mock_transport::{MockTransport, Step, Submission};

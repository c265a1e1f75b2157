// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action execution and job-status core for Relic.
//!
//! - [`gate`]: per-character cooldown gate (single flight plus "not before")
//! - [`classifier`]: maps transport results to classified outcomes
//! - [`executor`]: the `execute` entry point tying both together
//! - [`telemetry`]: optional subscriber set-up driven by configuration

pub mod classifier;
pub mod executor;
pub mod gate;
pub mod telemetry;

pub use classifier::{classify, ServerErrorCode};
pub use executor::{ActionExecutor, ExecutorSettings, COOLDOWN_WAIT_EXCEEDED};
pub use gate::{CooldownGate, CooldownPermit, CooldownSnapshot};
pub use telemetry::init_tracing;

// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The character action executor.
//!
//! [`ActionExecutor::execute`] is the single entry point of the core: it
//! serializes the request behind the character's cooldown gate, submits it
//! through the transport, classifies the response, and moves the gate's
//! cooldown forward before returning. It never returns an error; every
//! failure is reported through the [`JobOutcome`].

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use relic_config::RelicConfig;
use relic_core::{
    ActionCodec, ActionKind, ActionRequest, JobOutcome, JobStatus, RawResponse, Transport,
    TransportError,
};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, warn, Instrument, Span};

use crate::classifier;
use crate::gate::{CooldownGate, CooldownSnapshot};

/// Message of the synthetic outcome returned when the gate wait times out.
pub const COOLDOWN_WAIT_EXCEEDED: &str = "cooldown wait exceeded";

/// Tunables for [`ActionExecutor`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutorSettings {
    /// Upper bound on the wait for a character's turn and cooldown.
    /// `None` waits indefinitely.
    pub max_cooldown_wait: Option<Duration>,
    /// Upper bound on the network wait of one submission.
    pub request_timeout: Option<Duration>,
}

impl ExecutorSettings {
    pub fn from_config(config: &RelicConfig) -> Self {
        Self {
            max_cooldown_wait: config.executor.max_cooldown_wait(),
            request_timeout: Some(config.server.request_timeout()),
        }
    }
}

/// Executes character actions against the game server.
pub struct ActionExecutor {
    transport: Arc<dyn Transport>,
    codec: Arc<dyn ActionCodec>,
    gate: CooldownGate,
    settings: ExecutorSettings,
    span: Span,
}

impl ActionExecutor {
    /// Creates an executor. All diagnostics are emitted under `span`;
    /// pass [`Span::none()`] for a silent executor.
    pub fn new(
        transport: Arc<dyn Transport>,
        codec: Arc<dyn ActionCodec>,
        settings: ExecutorSettings,
        span: Span,
    ) -> Self {
        Self {
            transport,
            codec,
            gate: CooldownGate::new(span.clone()),
            settings,
            span,
        }
    }

    pub fn settings(&self) -> &ExecutorSettings {
        &self.settings
    }

    /// Current cooldown state of `character`, if it has been used.
    pub fn cooldown(&self, character: &str) -> Option<CooldownSnapshot> {
        self.gate.snapshot(character)
    }

    /// Executes one action and returns its classified outcome.
    pub async fn execute(&self, request: ActionRequest) -> JobOutcome {
        self.execute_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Like [`execute`](Self::execute), but the network wait is abandoned
    /// when `cancel` fires. A cancelled submission yields a
    /// [`JobStatus::TransportFailure`] outcome and releases the gate without
    /// a cooldown penalty.
    pub async fn execute_with_cancel(
        &self,
        request: ActionRequest,
        cancel: CancellationToken,
    ) -> JobOutcome {
        let character = request.character().as_str();
        let kind = request.kind();
        let span = info_span!(parent: &self.span, "execute", character, verb = kind.verb());

        async {
            let permit = match self.settings.max_cooldown_wait {
                Some(limit) => {
                    match tokio::time::timeout(limit, self.gate.acquire(character)).await {
                        Ok(permit) => permit,
                        Err(_) => {
                            warn!(wait_secs = limit.as_secs(), "gave up waiting for cooldown");
                            return JobOutcome::failed(
                                JobStatus::Undefined,
                                COOLDOWN_WAIT_EXCEEDED,
                                0,
                            );
                        }
                    }
                }
                None => self.gate.acquire(character).await,
            };

            let payload = match self.codec.encode(request.action()) {
                Ok(payload) => payload,
                Err(err) => {
                    warn!(error = %err, "failed to encode action");
                    permit.release(Instant::now());
                    return JobOutcome::failed(JobStatus::Undefined, err.to_string(), 0);
                }
            };

            let result = self.submit(character, kind, payload, &cancel).await;
            let outcome = classifier::classify(kind, result, self.codec.as_ref(), &Span::current());

            let cooldown = Duration::from_secs(u64::from(outcome.cooldown_seconds()));
            permit.release(Instant::now() + cooldown);
            debug!(status = %outcome.status(), cooldown_seconds = outcome.cooldown_seconds(), "action finished");
            outcome
        }
        .instrument(span)
        .await
    }

    /// Executes a batch concurrently and returns outcomes in input order.
    ///
    /// Requests for the same character still run one at a time, in the
    /// order they appear in `requests`.
    pub async fn execute_all(&self, requests: Vec<ActionRequest>) -> Vec<JobOutcome> {
        join_all(requests.into_iter().map(|request| self.execute(request))).await
    }

    async fn submit(
        &self,
        character: &str,
        kind: ActionKind,
        payload: Vec<u8>,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, TransportError> {
        let call = self.transport.submit(character, kind.verb(), payload);
        let bounded = async {
            match self.settings.request_timeout {
                Some(duration) => tokio::time::timeout(duration, call)
                    .await
                    .unwrap_or(Err(TransportError::Timeout { duration })),
                None => call.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportError::Cancelled),
            result = bounded => result,
        }
    }
}

// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted transport for deterministic executor tests.
//!
//! `MockTransport` answers each submission with the next scripted [`Step`],
//! taken from the character's own script first and the shared script
//! otherwise, and records when every submission started and finished.
//! Timestamps use `tokio::time::Instant`, so tests running with paused time
//! see exact virtual instants.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use relic_core::{RawResponse, Transport, TransportError};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// One scripted reaction to a submission.
#[derive(Debug)]
pub enum Step {
    /// Answer with this response.
    Respond(RawResponse),
    /// Fail without a response.
    Fail(TransportError),
    /// Never answer. Used to exercise timeouts and cancellation.
    Hang,
}

/// A submission seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub character: String,
    pub verb: String,
    pub payload: Vec<u8>,
    pub started_at: Instant,
    /// `None` while the submission is still pending (or was abandoned).
    pub finished_at: Option<Instant>,
}

/// A transport that replays scripted steps.
#[derive(Debug, Default)]
pub struct MockTransport {
    shared: Mutex<VecDeque<Step>>,
    per_character: Mutex<HashMap<String, VecDeque<Step>>>,
    latency: Duration,
    submissions: Mutex<Vec<Submission>>,
}

impl MockTransport {
    /// Create a mock with empty scripts and no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated network latency applied to every answered submission.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Append steps to the shared script.
    pub fn with_script(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.shared.get_mut().extend(steps);
        self
    }

    /// Append steps to the script used only for `character`.
    pub fn with_script_for(
        mut self,
        character: &str,
        steps: impl IntoIterator<Item = Step>,
    ) -> Self {
        self.per_character
            .get_mut()
            .entry(character.to_string())
            .or_default()
            .extend(steps);
        self
    }

    /// Append a step to the shared script.
    pub async fn push(&self, step: Step) {
        self.shared.lock().await.push_back(step);
    }

    /// All submissions seen so far, in the order they started.
    pub async fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().await.clone()
    }

    /// Submissions made for one character, in the order they started.
    pub async fn submissions_for(&self, character: &str) -> Vec<Submission> {
        self.submissions
            .lock()
            .await
            .iter()
            .filter(|s| s.character == character)
            .cloned()
            .collect()
    }

    async fn next_step(&self, character: &str) -> Option<Step> {
        if let Some(step) = self
            .per_character
            .lock()
            .await
            .get_mut(character)
            .and_then(VecDeque::pop_front)
        {
            return Some(step);
        }
        self.shared.lock().await.pop_front()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn submit(
        &self,
        character: &str,
        verb: &str,
        payload: Vec<u8>,
    ) -> Result<RawResponse, TransportError> {
        let index = {
            let mut submissions = self.submissions.lock().await;
            submissions.push(Submission {
                character: character.to_string(),
                verb: verb.to_string(),
                payload,
                started_at: Instant::now(),
                finished_at: None,
            });
            submissions.len() - 1
        };

        let step = self.next_step(character).await;
        if !matches!(step, Some(Step::Hang)) && !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = match step {
            Some(Step::Respond(response)) => Ok(response),
            Some(Step::Fail(err)) => Err(err),
            Some(Step::Hang) => std::future::pending().await,
            None => Err(TransportError::Connect {
                message: format!("no scripted response for {character}/{verb}"),
            }),
        };

        self.submissions.lock().await[index].finished_at = Some(Instant::now());
        result
    }
}

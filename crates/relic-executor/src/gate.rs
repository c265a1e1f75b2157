// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-character cooldown gate.
//!
//! Each character owns a slot holding a FIFO turn lock and its cooldown
//! state. Acquiring a permit takes the turn lock, waits out the remaining
//! cooldown, and marks the character in flight. The permit returns the turn
//! when it is released or dropped, so the next queued caller proceeds.
//!
//! Slots for different characters share nothing but the concurrent map that
//! indexes them; no lock is ever held across characters or across an await
//! on the map.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use tokio::sync::{Mutex as TurnLock, OwnedMutexGuard};
use tokio::time::Instant;
use tracing::{debug, Span};

/// Read-only copy of a character's cooldown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownSnapshot {
    /// Earliest instant the next action may be submitted.
    pub available_at: Instant,
    /// Whether an action currently holds the character's permit.
    pub in_flight: bool,
}

#[derive(Debug)]
struct CooldownState {
    available_at: Instant,
    in_flight: bool,
}

#[derive(Debug)]
struct CharacterSlot {
    /// Tokio's mutex queues waiters fairly, which gives FIFO turns.
    turn: Arc<TurnLock<()>>,
    state: Mutex<CooldownState>,
}

impl CharacterSlot {
    fn new() -> Self {
        Self {
            turn: Arc::new(TurnLock::new(())),
            state: Mutex::new(CooldownState {
                available_at: Instant::now(),
                in_flight: false,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, CooldownState> {
        // The state is two plain fields; a panic mid-update cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Serializes actions per character and enforces server-declared cooldowns.
#[derive(Debug)]
pub struct CooldownGate {
    slots: DashMap<String, Arc<CharacterSlot>>,
    span: Span,
}

impl CooldownGate {
    /// Creates an empty gate. Diagnostics are emitted under `span`;
    /// pass [`Span::none()`] to silence them.
    pub fn new(span: Span) -> Self {
        Self {
            slots: DashMap::new(),
            span,
        }
    }

    fn slot(&self, character: &str) -> Arc<CharacterSlot> {
        if let Some(slot) = self.slots.get(character) {
            return Arc::clone(slot.value());
        }
        let entry = self
            .slots
            .entry(character.to_string())
            .or_insert_with(|| Arc::new(CharacterSlot::new()));
        Arc::clone(entry.value())
    }

    /// Waits for the character's turn and cooldown, then marks it in flight.
    ///
    /// Callers for the same character are served in the order they called
    /// `acquire`. Dropping the returned future before it completes gives up
    /// the place in the queue without touching the cooldown state.
    pub async fn acquire(&self, character: &str) -> CooldownPermit {
        let slot = self.slot(character);
        let turn = Arc::clone(&slot.turn).lock_owned().await;

        let available_at = slot.state().available_at;
        let now = Instant::now();
        if available_at > now {
            debug!(
                parent: &self.span,
                character,
                wait_ms = (available_at - now).as_millis() as u64,
                "waiting for cooldown"
            );
            tokio::time::sleep_until(available_at).await;
        }

        slot.state().in_flight = true;
        debug!(parent: &self.span, character, "permit acquired");

        CooldownPermit {
            slot,
            _turn: turn,
            character: character.to_string(),
            released: false,
            span: self.span.clone(),
        }
    }

    /// Returns the character's current cooldown state, or `None` if the
    /// character has never been seen.
    pub fn snapshot(&self, character: &str) -> Option<CooldownSnapshot> {
        let slot = self.slots.get(character)?;
        let state = slot.state();
        Some(CooldownSnapshot {
            available_at: state.available_at,
            in_flight: state.in_flight,
        })
    }

    /// Number of characters the gate has created state for.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Exclusive right to submit one action for one character.
///
/// Release it with [`release`](Self::release) once the server's cooldown is
/// known. A permit dropped without release (error, panic, or cancelled
/// future) releases itself with `now` as the next available instant.
#[derive(Debug)]
#[must_use = "dropping a permit releases it immediately"]
pub struct CooldownPermit {
    slot: Arc<CharacterSlot>,
    _turn: OwnedMutexGuard<()>,
    character: String,
    released: bool,
    span: Span,
}

impl CooldownPermit {
    pub fn character(&self) -> &str {
        &self.character
    }

    /// Clears the in-flight flag and moves `available_at` forward to
    /// `new_available_at`. An earlier instant never moves it back.
    pub fn release(mut self, new_available_at: Instant) {
        self.finish(new_available_at);
    }

    fn finish(&mut self, new_available_at: Instant) {
        if self.released {
            return;
        }
        let available_at = {
            let mut state = self.slot.state();
            state.in_flight = false;
            state.available_at = state.available_at.max(new_available_at);
            state.available_at
        };
        self.released = true;

        let now = Instant::now();
        debug!(
            parent: &self.span,
            character = %self.character,
            cooldown_ms = available_at.saturating_duration_since(now).as_millis() as u64,
            "permit released"
        );
    }
}

impl Drop for CooldownPermit {
    fn drop(&mut self) {
        if !self.released {
            debug!(
                parent: &self.span,
                character = %self.character,
                "permit dropped without release"
            );
            self.finish(Instant::now());
        }
        // `_turn` is dropped after this body, so the next waiter only sees
        // the state written above.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn gate() -> CooldownGate {
        CooldownGate::new(Span::none())
    }

    #[tokio::test(start_paused = true)]
    async fn first_acquire_is_immediate() {
        let gate = gate();
        let start = Instant::now();
        let permit = gate.acquire("Alice").await;
        assert_eq!(Instant::now(), start);
        assert!(gate.snapshot("Alice").unwrap().in_flight);
        permit.release(start);
        assert!(!gate.snapshot("Alice").unwrap().in_flight);
    }

    #[tokio::test(start_paused = true)]
    async fn acquire_waits_for_released_cooldown() {
        let gate = gate();
        let start = Instant::now();
        gate.acquire("Alice")
            .await
            .release(start + Duration::from_secs(5));

        let _permit = gate.acquire("Alice").await;
        assert!(Instant::now() >= start + Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_release_never_moves_cooldown_back() {
        let gate = gate();
        let start = Instant::now();
        gate.acquire("Alice")
            .await
            .release(start + Duration::from_secs(10));
        let after_first = gate.snapshot("Alice").unwrap().available_at;

        // Second permit waits 10s, then releases with an instant already past.
        gate.acquire("Alice").await.release(start);
        let after_second = gate.snapshot("Alice").unwrap().available_at;
        assert_eq!(after_first, after_second);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_permit_releases_without_penalty() {
        let gate = gate();
        let start = Instant::now();
        {
            let _permit = gate.acquire("Alice").await;
        }
        let snap = gate.snapshot("Alice").unwrap();
        assert!(!snap.in_flight);
        assert_eq!(snap.available_at, start);

        let _again = gate.acquire("Alice").await;
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn same_character_waiters_are_served_in_order() {
        let gate = Arc::new(gate());
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = gate.acquire("Alice").await;
        let mut handles = Vec::new();
        for i in 0..3 {
            let gate = Arc::clone(&gate);
            let order = Arc::clone(&order);
            handles.push(tokio::spawn(async move {
                let permit = gate.acquire("Alice").await;
                order.lock().unwrap().push(i);
                permit.release(Instant::now() + Duration::from_secs(1));
            }));
            // Let the task reach the turn lock before spawning the next one.
            tokio::task::yield_now().await;
        }
        first.release(Instant::now());
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn other_characters_are_not_blocked() {
        let gate = gate();
        let start = Instant::now();
        let _alice = gate.acquire("Alice").await;
        let bob = gate.acquire("Bob").await;
        assert_eq!(Instant::now(), start);
        assert_eq!(bob.character(), "Bob");
        assert_eq!(gate.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_wait_leaves_state_untouched() {
        let gate = gate();
        let start = Instant::now();
        gate.acquire("Alice")
            .await
            .release(start + Duration::from_secs(30));

        let waited =
            tokio::time::timeout(Duration::from_secs(1), gate.acquire("Alice")).await;
        assert!(waited.is_err());

        let snap = gate.snapshot("Alice").unwrap();
        assert!(!snap.in_flight);
        assert_eq!(snap.available_at, start + Duration::from_secs(30));
    }

    #[test]
    fn unknown_character_has_no_snapshot() {
        let gate = gate();
        assert!(gate.snapshot("Nobody").is_none());
        assert!(gate.is_empty());
    }
}

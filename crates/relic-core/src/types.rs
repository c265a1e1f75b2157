// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action requests, job outcomes, and the raw exchange types shared with
//! the transport and codec collaborators.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::RelicError;

/// Name of a game character. Always non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Validates and wraps a character name.
    pub fn new(name: impl Into<String>) -> Result<Self, RelicError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RelicError::InvalidRequest(
                "character name must not be empty".into(),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CharacterName {
    type Error = RelicError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> Self {
        name.0
    }
}

impl AsRef<str> for CharacterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Discriminant of [`Action`]. Renders to the server's action verb.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Move,
    Fight,
    #[strum(serialize = "gathering")]
    Gather,
    #[strum(serialize = "crafting")]
    Craft,
    #[strum(serialize = "use")]
    UseItem,
    Rest,
}

impl ActionKind {
    /// The verb used in the action endpoint path.
    pub fn verb(self) -> &'static str {
        self.into()
    }
}

/// A single character action with its typed parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Walk to the map tile at `(x, y)`.
    Move { x: i32, y: i32 },
    /// Fight the monster on the current tile.
    Fight,
    /// Gather the resource on the current tile.
    Gather,
    /// Craft `quantity` units of the item `code`.
    Craft { code: String, quantity: u32 },
    /// Consume `quantity` units of the item `code`.
    UseItem { code: String, quantity: u32 },
    /// Recover hit points.
    Rest,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Move { .. } => ActionKind::Move,
            Self::Fight => ActionKind::Fight,
            Self::Gather => ActionKind::Gather,
            Self::Craft { .. } => ActionKind::Craft,
            Self::UseItem { .. } => ActionKind::UseItem,
            Self::Rest => ActionKind::Rest,
        }
    }
}

/// An immutable request to perform one action as one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    character: CharacterName,
    action: Action,
}

impl ActionRequest {
    /// Builds a request, rejecting empty character names.
    pub fn new(character: impl Into<String>, action: Action) -> Result<Self, RelicError> {
        Ok(Self {
            character: CharacterName::new(character)?,
            action,
        })
    }

    pub fn character(&self) -> &CharacterName {
        &self.character
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn kind(&self) -> ActionKind {
        self.action.kind()
    }
}

/// Classified status of one executed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Success,
    /// A server error without a more specific classification.
    Undefined,
    NotFound,
    InsufficientSkill,
    /// The server rejected the action because the character was still cooling down.
    CooldownViolation,
    /// No usable server response was obtained.
    TransportFailure,
}

/// Outcome of a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FightResult {
    Win,
    Loss,
}

/// A quantity of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub code: String,
    pub quantity: u32,
}

/// Typed result data of a successful action, one variant per [`ActionKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionData {
    Moved {
        x: i32,
        y: i32,
    },
    Fought {
        result: FightResult,
        xp: u32,
        gold: u32,
        drops: Vec<ItemStack>,
    },
    Gathered {
        xp: u32,
        items: Vec<ItemStack>,
    },
    Crafted {
        xp: u32,
        items: Vec<ItemStack>,
    },
    UsedItem {
        code: String,
        quantity: u32,
    },
    Rested {
        hp_restored: u32,
    },
}

impl ActionData {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Moved { .. } => ActionKind::Move,
            Self::Fought { .. } => ActionKind::Fight,
            Self::Gathered { .. } => ActionKind::Gather,
            Self::Crafted { .. } => ActionKind::Craft,
            Self::UsedItem { .. } => ActionKind::UseItem,
            Self::Rested { .. } => ActionKind::Rest,
        }
    }
}

/// The typed result of one action execution.
///
/// Fields are private: an outcome is built once by the executor and only
/// read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOutcome {
    status: JobStatus,
    message: String,
    cooldown_seconds: u32,
    data: Option<ActionData>,
}

impl JobOutcome {
    /// A successful action with its server-declared cooldown.
    pub fn success(cooldown_seconds: u32, data: Option<ActionData>) -> Self {
        Self {
            status: JobStatus::Success,
            message: String::new(),
            cooldown_seconds,
            data,
        }
    }

    /// A classified failure reported by the server or synthesized locally.
    pub fn failed(status: JobStatus, message: impl Into<String>, cooldown_seconds: u32) -> Self {
        Self {
            status,
            message: message.into(),
            cooldown_seconds,
            data: None,
        }
    }

    /// No usable response was obtained. Never carries a cooldown.
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::failed(JobStatus::TransportFailure, message, 0)
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cooldown_seconds(&self) -> u32 {
        self.cooldown_seconds
    }

    pub fn data(&self) -> Option<&ActionData> {
        self.data.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Success
    }

    /// Whether resubmitting the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.status,
            JobStatus::TransportFailure | JobStatus::CooldownViolation
        )
    }
}

/// A raw server response as handed back by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error code carried in a server error body. Some endpoints send a
/// symbolic name, others the numeric game status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Text(String),
    Number(u16),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(code) => f.write_str(code),
            Self::Number(code) => write!(f, "{code}"),
        }
    }
}

/// An error reported in a server response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerError {
    /// Machine-readable error code, when the server sent one.
    #[serde(default)]
    pub code: Option<ErrorCode>,
    #[serde(default)]
    pub message: String,
}

/// A response body decoded by an [`ActionCodec`](crate::traits::ActionCodec).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decoded {
    pub data: Option<ActionData>,
    pub cooldown_seconds: u32,
    pub error: Option<ServerError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn empty_character_name_is_rejected() {
        assert!(ActionRequest::new("", Action::Rest).is_err());
        assert!(ActionRequest::new("   ", Action::Fight).is_err());
        let req = ActionRequest::new("Alice", Action::Move { x: 3, y: 4 }).unwrap();
        assert_eq!(req.character().as_str(), "Alice");
        assert_eq!(req.kind(), ActionKind::Move);
    }

    #[test]
    fn verbs_match_endpoint_names() {
        assert_eq!(ActionKind::Move.verb(), "move");
        assert_eq!(ActionKind::Fight.verb(), "fight");
        assert_eq!(ActionKind::Gather.verb(), "gathering");
        assert_eq!(ActionKind::Craft.verb(), "crafting");
        assert_eq!(ActionKind::UseItem.verb(), "use");
        assert_eq!(ActionKind::Rest.verb(), "rest");
        assert_eq!(ActionKind::from_str("crafting").unwrap(), ActionKind::Craft);
    }

    #[test]
    fn action_and_data_kinds_agree() {
        let action = Action::Craft {
            code: "copper_ring".into(),
            quantity: 2,
        };
        let data = ActionData::Crafted {
            xp: 10,
            items: vec![ItemStack {
                code: "copper_ring".into(),
                quantity: 2,
            }],
        };
        assert_eq!(action.kind(), data.kind());
    }

    #[test]
    fn transport_failure_has_no_cooldown() {
        let outcome = JobOutcome::transport_failure("connection reset");
        assert_eq!(outcome.status(), JobStatus::TransportFailure);
        assert_eq!(outcome.cooldown_seconds(), 0);
        assert!(outcome.data().is_none());
        assert!(outcome.is_retryable());
    }

    #[test]
    fn success_carries_empty_message() {
        let outcome = JobOutcome::success(12, Some(ActionData::Moved { x: 5, y: 3 }));
        assert!(outcome.is_success());
        assert!(outcome.message().is_empty());
        assert!(!outcome.is_retryable());
        assert_eq!(outcome.data(), Some(&ActionData::Moved { x: 5, y: 3 }));
    }

    #[test]
    fn character_name_deserialization_validates() {
        let ok: CharacterName = serde_json::from_str("\"Bob\"").unwrap();
        assert_eq!(ok.to_string(), "Bob");
        assert!(serde_json::from_str::<CharacterName>("\"\"").is_err());
    }

    #[test]
    fn job_status_displays_snake_case() {
        assert_eq!(JobStatus::InsufficientSkill.to_string(), "insufficient_skill");
        assert_eq!(JobStatus::CooldownViolation.to_string(), "cooldown_violation");
    }

    #[test]
    fn error_code_accepts_text_and_numbers() {
        let text: ErrorCode = serde_json::from_str("\"map_not_found\"").unwrap();
        assert_eq!(text, ErrorCode::Text("map_not_found".into()));
        let number: ErrorCode = serde_json::from_str("497").unwrap();
        assert_eq!(number, ErrorCode::Number(497));
        assert_eq!(number.to_string(), "497");
    }

    proptest::proptest! {
        #[test]
        fn non_blank_names_are_accepted(name in "[A-Za-z0-9_-]{1,12}") {
            let parsed = CharacterName::new(name.clone()).unwrap();
            proptest::prop_assert_eq!(parsed.as_str(), name.as_str());
        }
    }
}

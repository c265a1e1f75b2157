// SPDX-FileCopyrightText: 2026 Relic Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON codec for the game API.
//!
//! Successful responses are wrapped as `{"data": {...}}` with a
//! `cooldown.remaining_seconds` field; errors as
//! `{"error": {"code": "...", "message": "..."}}`.

use relic_core::{
    Action, ActionCodec, ActionData, ActionKind, Decoded, ErrorCode, FightResult, ItemStack,
    RelicError, ServerError,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// [`ActionCodec`] for the JSON wire format.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[derive(Serialize)]
struct Destination {
    x: i32,
    y: i32,
}

#[derive(Serialize)]
struct ItemPayload<'a> {
    code: &'a str,
    quantity: u32,
}

#[derive(Serialize)]
struct Empty {}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<ErrorCode>,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct Cooldown {
    remaining_seconds: u32,
}

#[derive(Deserialize)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Deserialize)]
struct MoveData {
    cooldown: Cooldown,
    destination: Position,
}

#[derive(Deserialize)]
struct FightDetails {
    result: FightResult,
    #[serde(default)]
    xp: u32,
    #[serde(default)]
    gold: u32,
    #[serde(default)]
    drops: Vec<ItemStack>,
}

#[derive(Deserialize)]
struct FightData {
    cooldown: Cooldown,
    fight: FightDetails,
}

#[derive(Deserialize)]
struct SkillDetails {
    #[serde(default)]
    xp: u32,
    #[serde(default)]
    items: Vec<ItemStack>,
}

#[derive(Deserialize)]
struct SkillData {
    cooldown: Cooldown,
    details: SkillDetails,
}

#[derive(Deserialize)]
struct UseData {
    cooldown: Cooldown,
    item: ItemStack,
}

#[derive(Deserialize)]
struct RestData {
    cooldown: Cooldown,
    hp_restored: u32,
}

fn parse<T: DeserializeOwned>(kind: ActionKind, value: serde_json::Value) -> Result<T, RelicError> {
    serde_json::from_value(value)
        .map_err(|e| RelicError::codec(format!("invalid `{}` result payload", kind.verb()), e))
}

fn decode_data(kind: ActionKind, value: serde_json::Value) -> Result<(ActionData, u32), RelicError> {
    Ok(match kind {
        ActionKind::Move => {
            let d: MoveData = parse(kind, value)?;
            (
                ActionData::Moved {
                    x: d.destination.x,
                    y: d.destination.y,
                },
                d.cooldown.remaining_seconds,
            )
        }
        ActionKind::Fight => {
            let d: FightData = parse(kind, value)?;
            (
                ActionData::Fought {
                    result: d.fight.result,
                    xp: d.fight.xp,
                    gold: d.fight.gold,
                    drops: d.fight.drops,
                },
                d.cooldown.remaining_seconds,
            )
        }
        ActionKind::Gather => {
            let d: SkillData = parse(kind, value)?;
            (
                ActionData::Gathered {
                    xp: d.details.xp,
                    items: d.details.items,
                },
                d.cooldown.remaining_seconds,
            )
        }
        ActionKind::Craft => {
            let d: SkillData = parse(kind, value)?;
            (
                ActionData::Crafted {
                    xp: d.details.xp,
                    items: d.details.items,
                },
                d.cooldown.remaining_seconds,
            )
        }
        ActionKind::UseItem => {
            let d: UseData = parse(kind, value)?;
            (
                ActionData::UsedItem {
                    code: d.item.code,
                    quantity: d.item.quantity,
                },
                d.cooldown.remaining_seconds,
            )
        }
        ActionKind::Rest => {
            let d: RestData = parse(kind, value)?;
            (
                ActionData::Rested {
                    hp_restored: d.hp_restored,
                },
                d.cooldown.remaining_seconds,
            )
        }
    })
}

impl ActionCodec for JsonCodec {
    fn encode(&self, action: &Action) -> Result<Vec<u8>, RelicError> {
        let encoded = match action {
            Action::Move { x, y } => serde_json::to_vec(&Destination { x: *x, y: *y }),
            Action::Craft { code, quantity } | Action::UseItem { code, quantity } => {
                serde_json::to_vec(&ItemPayload {
                    code,
                    quantity: *quantity,
                })
            }
            Action::Fight | Action::Gather | Action::Rest => serde_json::to_vec(&Empty {}),
        };
        encoded.map_err(|e| RelicError::codec("failed to encode action", e))
    }

    fn decode(&self, kind: ActionKind, body: &[u8]) -> Result<Decoded, RelicError> {
        let envelope: Envelope = serde_json::from_slice(body)
            .map_err(|e| RelicError::codec("response is not a JSON envelope", e))?;

        if let Some(error) = envelope.error {
            return Ok(Decoded {
                data: None,
                cooldown_seconds: 0,
                error: Some(ServerError {
                    code: error.code,
                    message: error.message,
                }),
            });
        }

        match envelope.data {
            Some(value) => {
                let (data, cooldown_seconds) = decode_data(kind, value)?;
                Ok(Decoded {
                    data: Some(data),
                    cooldown_seconds,
                    error: None,
                })
            }
            None => Ok(Decoded::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(kind: ActionKind, body: serde_json::Value) -> Result<Decoded, RelicError> {
        JsonCodec.decode(kind, body.to_string().as_bytes())
    }

    #[test]
    fn encodes_move_destination() {
        let body = JsonCodec.encode(&Action::Move { x: 3, y: -4 }).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"x": 3, "y": -4}));
    }

    #[test]
    fn encodes_item_actions_and_empty_bodies() {
        let craft = JsonCodec
            .encode(&Action::Craft {
                code: "copper_dagger".into(),
                quantity: 2,
            })
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&craft).unwrap();
        assert_eq!(value, json!({"code": "copper_dagger", "quantity": 2}));

        let fight = JsonCodec.encode(&Action::Fight).unwrap();
        assert_eq!(fight, b"{}");
    }

    #[test]
    fn decodes_move_result() {
        let decoded = decode(
            ActionKind::Move,
            json!({"data": {
                "cooldown": {"total_seconds": 12, "remaining_seconds": 12},
                "destination": {"name": "Forest", "x": 5, "y": 3},
                "character": {"name": "Alice"}
            }}),
        )
        .unwrap();
        assert_eq!(decoded.cooldown_seconds, 12);
        assert_eq!(decoded.data, Some(ActionData::Moved { x: 5, y: 3 }));
        assert!(decoded.error.is_none());
    }

    #[test]
    fn decodes_fight_result() {
        let decoded = decode(
            ActionKind::Fight,
            json!({"data": {
                "cooldown": {"remaining_seconds": 25},
                "fight": {
                    "result": "win",
                    "xp": 40,
                    "gold": 3,
                    "drops": [{"code": "feather", "quantity": 2}]
                }
            }}),
        )
        .unwrap();
        assert_eq!(decoded.cooldown_seconds, 25);
        assert_eq!(
            decoded.data,
            Some(ActionData::Fought {
                result: FightResult::Win,
                xp: 40,
                gold: 3,
                drops: vec![ItemStack {
                    code: "feather".into(),
                    quantity: 2
                }],
            })
        );
    }

    #[test]
    fn decodes_gather_and_rest() {
        let gathered = decode(
            ActionKind::Gather,
            json!({"data": {
                "cooldown": {"remaining_seconds": 30},
                "details": {"xp": 8, "items": [{"code": "ash_wood", "quantity": 1}]}
            }}),
        )
        .unwrap();
        assert!(matches!(gathered.data, Some(ActionData::Gathered { xp: 8, .. })));

        let rested = decode(
            ActionKind::Rest,
            json!({"data": {"cooldown": {"remaining_seconds": 9}, "hp_restored": 90}}),
        )
        .unwrap();
        assert_eq!(rested.data, Some(ActionData::Rested { hp_restored: 90 }));
        assert_eq!(rested.cooldown_seconds, 9);
    }

    #[test]
    fn decodes_error_envelope() {
        let decoded = decode(
            ActionKind::Craft,
            json!({"error": {"code": "insufficient_skill_level", "message": "Weaponcrafting 5 required."}}),
        )
        .unwrap();
        let error = decoded.error.unwrap();
        assert_eq!(
            error.code,
            Some(ErrorCode::Text("insufficient_skill_level".into()))
        );
        assert_eq!(error.message, "Weaponcrafting 5 required.");
        assert!(decoded.data.is_none());
    }

    #[test]
    fn decodes_numeric_error_code() {
        let decoded = decode(
            ActionKind::Gather,
            json!({"error": {"code": 497, "message": "Character inventory is full."}}),
        )
        .unwrap();
        let error = decoded.error.unwrap();
        assert_eq!(error.code, Some(ErrorCode::Number(497)));
        assert_eq!(error.message, "Character inventory is full.");
    }

    #[test]
    fn rejects_non_json_and_mismatched_payloads() {
        assert!(JsonCodec.decode(ActionKind::Move, b"<html>").is_err());
        let err = decode(
            ActionKind::Move,
            json!({"data": {"cooldown": {"remaining_seconds": 1}}}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("move"));
    }
}

//! Enemy action selection proposed by the narrator.

use game_core::{AllowedActions, BattleAction};
use serde_json::{Map, Value};

use super::error::NarratorError;

/// An allow-listed action picked by the narrator, with optional flavor text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyChoice {
    pub action: BattleAction,
    pub narration: Option<String>,
}

impl EnemyChoice {
    /// Reads `{"action": {"type": ..., "spell_name": ...}, "narration": ...}`
    /// and checks the action against `allowed`.
    ///
    /// Passing the allow-list does not make the action trusted; the engine
    /// validates it again right before execution.
    pub fn from_response(
        response: &Map<String, Value>,
        allowed: &AllowedActions,
    ) -> Result<Self, NarratorError> {
        let raw_action = response
            .get("action")
            .filter(|value| value.is_object())
            .ok_or(NarratorError::MissingAction)?;
        let action: BattleAction =
            serde_json::from_value(raw_action.clone()).map_err(|_| NarratorError::MissingAction)?;

        if !allowed.permits(&action) {
            return Err(NarratorError::ActionNotAllowed {
                action: action.to_string(),
            });
        }

        Ok(Self {
            action,
            narration: narration_text(response),
        })
    }
}

/// Non-empty `narration` string, if any.
pub(crate) fn narration_text(response: &Map<String, Value>) -> Option<String> {
    response
        .get("narration")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

//! Validation and application of narrator stat events.

use std::str::FromStr;

use game_core::{Combatants, EventLimits, ResourceChange, Side};
use serde_json::{Map, Value};

use super::error::NarratorError;

/// The only event kind the narrator may propose.
pub const MODIFY_STATS: &str = "modify_stats";

/// A narrator stat event whose deltas already fit [`EventLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarratorEvent {
    pub target: Side,
    pub hp_delta: i32,
    pub mana_delta: i32,
}

/// Stat changes produced by applying a [`NarratorEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedEvent {
    pub target: Side,
    pub hp: ResourceChange,
    pub mana: ResourceChange,
}

impl NarratorEvent {
    /// Validates an untrusted `event` value.
    ///
    /// The kind is read from `type` (or `kind`) and must be `modify_stats`.
    /// Missing deltas count as 0; present deltas must be integers. Each delta
    /// is clamped to its symmetric limit.
    pub fn validate(raw: &Value, limits: &EventLimits) -> Result<Self, NarratorError> {
        let object = raw.as_object().ok_or(NarratorError::MalformedResponse)?;

        let kind = object
            .get("type")
            .or_else(|| object.get("kind"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        if kind != MODIFY_STATS {
            return Err(NarratorError::UnknownEventKind {
                kind: kind.to_string(),
            });
        }

        let hp_requested = integer_field(object, "hp_delta")?;
        let mana_requested = integer_field(object, "mana_delta")?;

        let target_tag = object
            .get("target")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let target = Side::from_str(target_tag).map_err(|_| NarratorError::UnknownTarget {
            target: target_tag.to_string(),
        })?;

        let event = Self {
            target,
            hp_delta: limits.clamp_hp(hp_requested),
            mana_delta: limits.clamp_mana(mana_requested),
        };
        if i64::from(event.hp_delta) != hp_requested
            || i64::from(event.mana_delta) != mana_requested
        {
            tracing::info!(
                hp_requested,
                mana_requested,
                hp_delta = event.hp_delta,
                mana_delta = event.mana_delta,
                "clamped narrator event"
            );
        }
        Ok(event)
    }

    /// Applies the deltas through the target's clamped mutation path.
    pub fn apply(&self, combatants: &mut Combatants) -> AppliedEvent {
        let target = combatants.get_mut(self.target);
        let hp = target.apply_hp_delta(i64::from(self.hp_delta));
        let mana = target.apply_mana_delta(i64::from(self.mana_delta));
        tracing::info!(
            target = %self.target,
            hp_old = hp.old,
            hp_new = hp.new,
            mana_old = mana.old,
            mana_new = mana.new,
            "applied narrator event"
        );
        AppliedEvent {
            target: self.target,
            hp,
            mana,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.hp_delta == 0 && self.mana_delta == 0
    }
}

/// Integers beyond `i64::MAX` saturate; the clamp brings them back in range.
fn integer_field(object: &Map<String, Value>, field: &'static str) -> Result<i64, NarratorError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_u64().map(|_| i64::MAX))
            .ok_or(NarratorError::InvalidDelta { field }),
    }
}

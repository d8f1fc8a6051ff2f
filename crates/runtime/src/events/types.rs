//! Event types published by the turn loop.

use game_core::{
    ActionReport, BattleAction, BattleSnapshot, CastError, Outcome, ResourceChange, Side,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    /// A new round begins; `round` is 1-based.
    RoundStarted { round: u32, snapshot: BattleSnapshot },

    /// An action was executed.
    ActionResolved {
        actor: Side,
        action: BattleAction,
        report: ActionReport,
        snapshot: BattleSnapshot,
    },

    /// A proposed action failed validation and was not executed.
    ActionRejected {
        actor: Side,
        action: BattleAction,
        #[serde(serialize_with = "display")]
        error: CastError,
    },

    /// An externally chosen enemy action was replaced by the fallback policy.
    DecisionOverridden {
        actor: Side,
        proposed: BattleAction,
        fallback: BattleAction,
        #[serde(serialize_with = "display")]
        error: CastError,
    },

    /// Flavor text from the narrator.
    Narration { actor: Side, text: String },

    /// A bounded narrator stat adjustment was applied.
    NarratorEventApplied {
        target: Side,
        hp: ResourceChange,
        mana: ResourceChange,
    },

    /// Neither side can afford any spell.
    ResourcesExhausted { snapshot: BattleSnapshot },

    /// A round finished; `round` is the completed-round count.
    RoundEnded { round: u32 },

    /// The battle reached a terminal state.
    BattleEnded {
        outcome: Outcome,
        rounds: u32,
        snapshot: BattleSnapshot,
    },
}

impl BattleEvent {
    pub fn is_narration(&self) -> bool {
        matches!(
            self,
            BattleEvent::Narration { .. } | BattleEvent::NarratorEventApplied { .. }
        )
    }
}

fn display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

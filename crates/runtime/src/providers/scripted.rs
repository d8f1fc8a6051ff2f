//! Fixed action sequences, for tests and replays.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use game_core::{BattleAction, BattleState, Side};

use crate::api::{ActionProvider, Decision, Result, RuntimeError};

/// Hands out queued actions in order, then fails with
/// [`RuntimeError::ScriptExhausted`].
#[derive(Debug, Default)]
pub struct ScriptedActionProvider {
    queue: Mutex<VecDeque<Decision>>,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = BattleAction>) -> Self {
        Self::from_decisions(actions.into_iter().map(Decision::from))
    }

    pub fn from_decisions(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            queue: Mutex::new(decisions.into_iter().collect()),
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide_action(&self, side: Side, _state: &BattleState) -> Result<Decision> {
        let next = self
            .queue
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .pop_front();
        next.ok_or(RuntimeError::ScriptExhausted { kind: side.into() })
    }
}

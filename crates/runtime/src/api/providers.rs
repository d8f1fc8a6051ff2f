//! Asynchronous abstraction for sourcing player and enemy intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! run with console input, scripted fixtures, the deterministic enemy policy,
//! or a narrator-guided enemy.
use async_trait::async_trait;
use game_core::{BattleAction, BattleState, Side};

use super::errors::Result;

/// An action proposal plus optional flavor text from whoever chose it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: BattleAction,
    pub narration: Option<String>,
}

impl From<BattleAction> for Decision {
    fn from(action: BattleAction) -> Self {
        Self {
            action,
            narration: None,
        }
    }
}

/// Trait for providing actions based on the current battle state.
///
/// Proposals are untrusted: the runtime re-validates spell existence and
/// mana cost before executing anything a provider returns.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `side` based on a read-only view of the battle.
    async fn provide_action(&self, side: Side, state: &BattleState) -> Result<Decision>;
}

#[async_trait]
impl<P: ActionProvider + ?Sized> ActionProvider for std::sync::Arc<P> {
    async fn provide_action(&self, side: Side, state: &BattleState) -> Result<Decision> {
        (**self).provide_action(side, state).await
    }
}

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use game_core::{
    BattleState, Combatant, Combatants, EffectKind, Side, Spell, Spellbook, StatBounds,
};
use runtime::{BattleEvent, ChatMessage, NarratorTransport};

/// Hero 100/`player_mana` against Goblin 80/`enemy_mana`, with Fireball
/// and Healing in the book.
pub fn duel(player_mana: u32, enemy_mana: u32) -> BattleState {
    let bounds = StatBounds::DEFAULT;
    let combatants = Combatants::new(
        Combatant::new("Hero", Side::Player, 100, player_mana, &bounds).unwrap(),
        Combatant::new("Goblin", Side::Enemy, 80, enemy_mana, &bounds).unwrap(),
    )
    .unwrap();
    let spellbook = Spellbook::with_spells([
        Spell::new("Fireball", 30, 3, EffectKind::Damage, 20).unwrap(),
        Spell::new("Healing", 20, 2, EffectKind::Heal, 25).unwrap(),
    ])
    .unwrap();
    BattleState::new(combatants, spellbook)
}

/// Transport that always answers with the same text (or nothing).
pub struct CannedTransport {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl CannedTransport {
    pub fn replying(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn silent() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NarratorTransport for CannedTransport {
    async fn complete(&self, _messages: &[ChatMessage], _max_tokens: u32) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

pub fn narration_count(events: &[BattleEvent]) -> usize {
    events.iter().filter(|event| event.is_narration()).count()
}

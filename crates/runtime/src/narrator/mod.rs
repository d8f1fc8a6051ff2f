//! Narrator adapter.
//!
//! The narrator is an untrusted advisory service. Everything it returns goes
//! through pure validation functions ([`parse_reaction`], [`sanitize_event`],
//! [`EnemyChoice::from_response`]) that can be tested without a network. Any
//! failure degrades to "no narrator" for that turn.

mod choice;
mod error;
mod event;
pub mod prompts;
mod protocol;
mod transport;

use std::sync::Arc;

use game_core::{AllowedActions, BattleSnapshot, EventLimits, Side};

pub use choice::EnemyChoice;
pub use error::NarratorError;
pub use event::{AppliedEvent, MODIFY_STATS, NarratorEvent};
pub use protocol::parse_json_object;
pub use transport::{ChatMessage, NarratorTransport, Role};

/// What the narrator made of one resolved action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reaction {
    pub narration: Option<String>,
    pub event: Option<NarratorEvent>,
}

/// Parses a reaction response.
///
/// A malformed `event` only drops the event; the narration is kept.
pub fn parse_reaction(raw: &str, limits: &EventLimits) -> Result<Reaction, NarratorError> {
    let response = parse_json_object(raw).ok_or(NarratorError::MalformedResponse)?;

    let event = match response.get("event") {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => match NarratorEvent::validate(value, limits) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::warn!(%err, "discarding narrator event");
                None
            }
        },
    };

    Ok(Reaction {
        narration: choice::narration_text(&response),
        event,
    })
}

/// Raw narrator text to a validated event, if it carries one.
pub fn sanitize_event(raw: &str, limits: &EventLimits) -> Option<NarratorEvent> {
    parse_reaction(raw, limits).ok()?.event
}

/// Handle to the narrator, possibly absent.
#[derive(Clone)]
pub struct Narrator {
    transport: Option<Arc<dyn NarratorTransport>>,
    limits: EventLimits,
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("enabled", &self.is_enabled())
            .field("limits", &self.limits)
            .finish()
    }
}

impl Narrator {
    pub fn new(transport: Arc<dyn NarratorTransport>, limits: EventLimits) -> Self {
        Self {
            transport: Some(transport),
            limits,
        }
    }

    pub fn disabled() -> Self {
        Self {
            transport: None,
            limits: EventLimits::DEFAULT,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    pub fn limits(&self) -> &EventLimits {
        &self.limits
    }

    /// Asks the narrator to react to `actor`'s last action.
    pub async fn react(&self, snapshot: &BattleSnapshot, actor: Side) -> Option<Reaction> {
        let messages = prompts::reaction_messages(snapshot, actor, &self.limits);
        let raw = self.complete(&messages, prompts::REACTION_MAX_TOKENS).await?;

        match parse_reaction(&raw, &self.limits) {
            Ok(reaction) => Some(reaction),
            Err(err) => {
                tracing::warn!(%err, %actor, "ignoring narrator reaction");
                None
            }
        }
    }

    /// Asks the narrator to pick the enemy's action from `allowed`.
    pub async fn choose_enemy_action(
        &self,
        snapshot: &BattleSnapshot,
        allowed: &AllowedActions,
    ) -> Option<EnemyChoice> {
        let messages = prompts::choice_messages(snapshot, allowed);
        let raw = self.complete(&messages, prompts::CHOICE_MAX_TOKENS).await?;

        let outcome = parse_json_object(&raw)
            .ok_or(NarratorError::MalformedResponse)
            .and_then(|response| EnemyChoice::from_response(&response, allowed));
        match outcome {
            Ok(choice) => {
                tracing::info!(action = %choice.action, "narrator chose enemy action");
                Some(choice)
            }
            Err(err) => {
                tracing::warn!(%err, "ignoring narrator enemy choice");
                None
            }
        }
    }

    async fn complete(&self, messages: &[ChatMessage], max_tokens: u32) -> Option<String> {
        let Some(transport) = self.transport.as_ref() else {
            tracing::trace!("{}", NarratorError::Unavailable);
            return None;
        };
        let raw = transport.complete(messages, max_tokens).await;
        if raw.is_none() {
            tracing::warn!("{}", NarratorError::Transport);
        }
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use game_core::CombatantStatus;

    struct Canned(&'static str);

    #[async_trait]
    impl NarratorTransport for Canned {
        async fn complete(&self, _messages: &[ChatMessage], _max_tokens: u32) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn snapshot() -> BattleSnapshot {
        let status = |name: &str, side| CombatantStatus {
            name: name.into(),
            side,
            current_hp: 50,
            max_hp: 100,
            current_mana: 20,
            max_mana: 60,
            level: 1,
            experience: 0,
        };
        BattleSnapshot {
            round: 1,
            player: status("Hero", Side::Player),
            enemy: status("Goblin", Side::Enemy),
            last_action: None,
        }
    }

    #[test]
    fn reaction_keeps_narration_when_event_is_bad() {
        let raw = r#"{"narration": "The goblin staggers.", "event": {"type": "explode"}}"#;
        let reaction = parse_reaction(raw, &EventLimits::DEFAULT).unwrap();
        assert_eq!(reaction.narration.as_deref(), Some("The goblin staggers."));
        assert_eq!(reaction.event, None);
    }

    #[test]
    fn sanitize_event_clamps() {
        let raw = "```json\n{\"narration\": \"x\", \"event\": {\"type\": \"modify_stats\", \"target\": \"enemy\", \"hp_delta\": -500}}\n```";
        let event = sanitize_event(raw, &EventLimits::DEFAULT).unwrap();
        assert_eq!(event.hp_delta, -10);
        assert_eq!(sanitize_event("not json", &EventLimits::DEFAULT), None);
    }

    #[tokio::test]
    async fn disabled_narrator_is_silent() {
        let narrator = Narrator::disabled();
        assert!(!narrator.is_enabled());
        assert_eq!(narrator.react(&snapshot(), Side::Player).await, None);
    }

    #[tokio::test]
    async fn malformed_reaction_is_ignored() {
        let narrator = Narrator::new(Arc::new(Canned("not json")), EventLimits::DEFAULT);
        assert_eq!(narrator.react(&snapshot(), Side::Player).await, None);
    }

    #[tokio::test]
    async fn choice_outside_allow_list_is_ignored() {
        let narrator = Narrator::new(
            Arc::new(Canned(r#"{"action": {"type": "cast_spell", "spell_name": "Meteor"}}"#)),
            EventLimits::DEFAULT,
        );
        let allowed = AllowedActions {
            basic_attack_damage: 10,
            cast_spell: Vec::new(),
        };
        assert_eq!(narrator.choose_enemy_action(&snapshot(), &allowed).await, None);
    }
}

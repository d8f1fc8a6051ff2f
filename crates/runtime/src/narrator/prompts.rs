//! Chat messages sent to the narrator.

use game_core::{AllowedActions, BattleAction, BattleSnapshot, CombatantStatus, EventLimits, Side};

use super::event::MODIFY_STATS;
use super::transport::ChatMessage;

pub const REACTION_MAX_TOKENS: u32 = 300;
pub const CHOICE_MAX_TOKENS: u32 = 200;

const REACTION_SYSTEM: &str =
    "You are the dungeon master of a fantasy duel. React to each action dramatically and vividly.";
const CHOICE_SYSTEM: &str =
    "You control the enemy in a fantasy duel. Pick the best action from the ones offered.";

pub fn reaction_messages(
    snapshot: &BattleSnapshot,
    actor: Side,
    limits: &EventLimits,
) -> Vec<ChatMessage> {
    let actor_name = &snapshot.combatant(actor).name;
    let action = match snapshot.last_action.as_ref().map(|record| &record.action) {
        Some(BattleAction::CastSpell { spell_name }) => format!("{actor_name} casts {spell_name}"),
        _ => format!("{actor_name} makes a basic attack"),
    };
    let target = actor.opponent();
    let (hp, mana) = (limits.max_hp_delta, limits.max_mana_delta);

    let prompt = format!(
        "Battle round #{round}\n\
         \n\
         State:\n\
         {state}\n\
         \n\
         Action: {action}\n\
         \n\
         Describe the effect of this action dramatically, in the third person.\n\
         If it deserves an extra effect (damage, healing, mana drain), add an event.\n\
         \n\
         Reply with JSON:\n\
         {{\n\
         \x20   \"narration\": \"dramatic description (2-3 sentences)\",\n\
         \x20   \"event\": {{\n\
         \x20       \"type\": \"{MODIFY_STATS}\",\n\
         \x20       \"target\": \"{target}\",\n\
         \x20       \"hp_delta\": <integer from -{hp} to {hp}, 0 for no effect>,\n\
         \x20       \"mana_delta\": <integer from -{mana} to {mana}, 0 for no effect>\n\
         \x20   }}\n\
         }}\n\
         \n\
         JSON only, no extra text.",
        round = snapshot.round,
        state = state_lines(&[&snapshot.player, &snapshot.enemy]),
    );

    vec![ChatMessage::system(REACTION_SYSTEM), ChatMessage::user(prompt)]
}

pub fn choice_messages(snapshot: &BattleSnapshot, allowed: &AllowedActions) -> Vec<ChatMessage> {
    let enemy = &snapshot.enemy.name;
    let options = serde_json::to_string_pretty(allowed).unwrap_or_default();

    let prompt = format!(
        "Choose the best action for {enemy} this round.\n\
         \n\
         Round: #{round}\n\
         \n\
         State:\n\
         {state}\n\
         \n\
         Available actions:\n\
         {options}\n\
         \n\
         Reply with JSON (narration in the third person):\n\
         {{\n\
         \x20   \"action\": {{\n\
         \x20       \"type\": \"basic_attack\" or \"cast_spell\",\n\
         \x20       \"spell_name\": \"<spell name when cast_spell>\"\n\
         \x20   }},\n\
         \x20   \"narration\": \"dramatic description of what {enemy} does (1-2 sentences)\"\n\
         }}\n\
         \n\
         JSON only, no extra text.",
        round = snapshot.round,
        state = state_lines(&[&snapshot.enemy, &snapshot.player]),
    );

    vec![ChatMessage::system(CHOICE_SYSTEM), ChatMessage::user(prompt)]
}

fn state_lines(combatants: &[&CombatantStatus]) -> String {
    combatants
        .iter()
        .map(|status| {
            format!(
                "- {}: HP {}/{}, Mana {}/{}",
                status.name, status.current_hp, status.max_hp, status.current_mana, status.max_mana
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrator::transport::Role;
    use game_core::{ActionRecord, SpellOption};

    fn status(name: &str, side: Side) -> CombatantStatus {
        CombatantStatus {
            name: name.into(),
            side,
            current_hp: 70,
            max_hp: 100,
            current_mana: 30,
            max_mana: 60,
            level: 1,
            experience: 0,
        }
    }

    fn snapshot() -> BattleSnapshot {
        BattleSnapshot {
            round: 2,
            player: status("Hero", Side::Player),
            enemy: status("Goblin Shaman", Side::Enemy),
            last_action: Some(ActionRecord {
                actor: Side::Player,
                action: BattleAction::cast("Fireball"),
            }),
        }
    }

    #[test]
    fn reaction_prompt_describes_the_action_and_limits() {
        let messages = reaction_messages(&snapshot(), Side::Player, &EventLimits::DEFAULT);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);

        let prompt = &messages[1].content;
        assert!(prompt.contains("Battle round #2"));
        assert!(prompt.contains("Hero casts Fireball"));
        assert!(prompt.contains("- Goblin Shaman: HP 70/100, Mana 30/60"));
        assert!(prompt.contains("\"target\": \"enemy\""));
        assert!(prompt.contains("integer from -10 to 10"));
    }

    #[test]
    fn choice_prompt_lists_the_allow_list() {
        let allowed = AllowedActions {
            basic_attack_damage: 10,
            cast_spell: vec![SpellOption {
                spell_name: "Frost Bolt".into(),
                mana_cost: 15,
                power: 12,
            }],
        };
        let messages = choice_messages(&snapshot(), &allowed);
        let prompt = &messages[1].content;
        assert!(prompt.starts_with("Choose the best action for Goblin Shaman"));
        assert!(prompt.contains("\"spell_name\": \"Frost Bolt\""));
        assert!(prompt.contains("\"basic_attack_damage\": 10"));
    }
}

//! Numbered menu construction and parsing.
use game_core::{BattleAction, BattleState, EffectKind, Side};
use thiserror::Error;

/// Rejected menu input; the caller re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMenuChoice {
    #[error("please enter a number")]
    NotANumber,

    #[error("please pick a number between 1 and {max}")]
    OutOfRange { max: usize },

    #[error("please answer y or n")]
    NotYesNo,
}

/// One numbered line of the action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub action: BattleAction,
}

/// Actions the player may pick this turn: the basic attack first, then every
/// spell the player can currently afford, in spellbook order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    entries: Vec<MenuEntry>,
}

impl ActionMenu {
    pub fn for_side(state: &BattleState, side: Side, basic_attack_damage: u32) -> Self {
        let mana = state.combatants.get(side).mana().current();
        let mut entries = vec![MenuEntry {
            label: format!("Basic attack ({basic_attack_damage} damage)"),
            action: BattleAction::BasicAttack,
        }];
        entries.extend(state.spellbook.affordable(mana).map(|spell| MenuEntry {
            label: format!(
                "{} (mana: {}, {}: {})",
                spell.name(),
                spell.mana_cost(),
                effect_label(spell.effect()),
                spell.power()
            ),
            action: BattleAction::cast(spell.name()),
        }));
        Self { entries }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, entry)| format!("  {}. {}\n", index + 1, entry.label))
            .collect()
    }

    pub fn select(&self, input: &str) -> Result<&BattleAction, InvalidMenuChoice> {
        let index = parse_menu_choice(input, self.entries.len())?;
        Ok(&self.entries[index].action)
    }
}

fn effect_label(effect: EffectKind) -> &'static str {
    match effect {
        EffectKind::Damage => "damage",
        EffectKind::Heal => "heal",
        EffectKind::RestoreMana => "restores mana",
    }
}

/// Parses a 1-based menu number into a 0-based index.
pub fn parse_menu_choice(input: &str, options: usize) -> Result<usize, InvalidMenuChoice> {
    let number: usize = input
        .trim()
        .parse()
        .map_err(|_| InvalidMenuChoice::NotANumber)?;
    if number == 0 || number > options {
        return Err(InvalidMenuChoice::OutOfRange { max: options });
    }
    Ok(number - 1)
}

pub fn parse_yes_no(input: &str) -> Result<bool, InvalidMenuChoice> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(InvalidMenuChoice::NotYesNo),
    }
}

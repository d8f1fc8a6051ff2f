//! Plain-text battle visuals: bars, boxes, headers, and banners.
use game_core::{CombatantStatus, Outcome};

pub const BAR_WIDTH: usize = 20;
const BOX_WIDTH: usize = 40;

/// `█` for the filled share of `current / max`, rounded down, `░` for the rest.
pub fn bar(current: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (u64::from(current.min(max)) * width as u64 / u64::from(max)) as usize
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn hp_line(current: u32, max: u32) -> String {
    format!("HP:   [{}] {current}/{max}", bar(current, max, BAR_WIDTH))
}

pub fn mana_line(current: u32, max: u32) -> String {
    format!("Mana: [{}] {current}/{max}", bar(current, max, BAR_WIDTH))
}

pub fn status_box(status: &CombatantStatus) -> String {
    let rule = "─".repeat(BOX_WIDTH);
    format!(
        "{rule}\n{} (level {}, exp {})\n{}\n{}\n{rule}",
        status.name,
        status.level,
        status.experience,
        hp_line(status.current_hp, status.max_hp),
        mana_line(status.current_mana, status.max_mana),
    )
}

pub fn round_header(round: u32) -> String {
    let rule = "═".repeat(BOX_WIDTH - 2);
    let title = format!("ROUND {round}");
    format!("╔{rule}╗\n║ {title:^w$} ║\n╚{rule}╝", w = BOX_WIDTH - 4)
}

pub fn banner(outcome: Outcome) -> String {
    let rule = "═".repeat(BOX_WIDTH);
    let title = match outcome {
        Outcome::Victory => "VICTORY!",
        Outcome::Defeat => "DEFEAT!",
        Outcome::Draw => "DRAW!",
    };
    format!("{rule}\n{title:^w$}\n{rule}", w = BOX_WIDTH)
}

/// Frames of the basic-attack animation, shown one after another.
pub fn attack_frames(attacker: &str, defender: &str, damage: u32) -> [String; 4] {
    [
        format!("{attacker} attacks!"),
        "   * * *".to_string(),
        "     |".to_string(),
        format!("{defender} takes {damage} damage!"),
    ]
}

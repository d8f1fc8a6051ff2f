//! Crossterm styling for console output.
use crossterm::style::{Color, Stylize, style};
use game_core::{Outcome, Side};

/// What a piece of text represents, for coloring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Side(Side),
    Header,
    Narration,
    Warning,
    Outcome(Outcome),
}

/// Console color scheme; a disabled theme passes text through unchanged.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    enabled: bool,
}

impl Theme {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.enabled {
            return text.to_string();
        }
        match tone {
            Tone::Side(Side::Player) => style(text).with(Color::Yellow).to_string(),
            Tone::Side(Side::Enemy) => style(text).with(Color::Red).to_string(),
            Tone::Header => style(text).with(Color::Cyan).bold().to_string(),
            Tone::Narration => style(text).with(Color::Magenta).italic().to_string(),
            Tone::Warning => style(text).with(Color::DarkYellow).to_string(),
            Tone::Outcome(Outcome::Victory) => style(text).with(Color::Green).bold().to_string(),
            Tone::Outcome(Outcome::Defeat) => style(text).with(Color::Red).bold().to_string(),
            Tone::Outcome(Outcome::Draw) => style(text).with(Color::Blue).bold().to_string(),
        }
    }
}

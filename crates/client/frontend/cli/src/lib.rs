//! Console frontend for the spell duel.
//!
//! This crate renders [`runtime::BattleEvent`]s as ASCII art and reads the
//! player's menu choices from a terminal. It does not own the runtime:
//! the client binary wires a [`ConsoleRenderer`] in as the event sink and a
//! [`ConsoleActionProvider`] in as the player's action source.

mod config;
mod input;
pub mod logging;
pub mod presentation;

pub use config::CliConfig;
pub use input::{
    ActionMenu, ConsoleActionProvider, InvalidMenuChoice, MenuEntry, parse_menu_choice,
    parse_yes_no,
};
pub use logging::{LoggingGuard, setup_logging};
pub use presentation::{ConsoleRenderer, Theme, Tone};


//! Console input: numbered menus and the player's action provider.
mod menu;
mod provider;

pub use menu::{ActionMenu, InvalidMenuChoice, MenuEntry, parse_menu_choice, parse_yes_no};
pub use provider::ConsoleActionProvider;

//! CLI-specific configuration for the console frontend.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::presentation::{ConsoleRenderer, Theme};

/// Console frontend configuration.
///
/// This contains settings specific to the terminal, separate from the
/// battle configuration loaded by `client-bootstrap`.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Colored output.
    pub color: bool,
    /// Pause between basic-attack animation frames; zero disables the pause.
    pub animation_delay: Duration,
    /// Also write logs to a daily-rolling file.
    pub log_file: bool,
    /// Log file directory; `None` uses the platform data directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            color: true,
            animation_delay: Duration::from_millis(150),
            log_file: false,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `NO_COLOR` - Disable colors when set to anything
    /// - `CLI_ANIMATION_DELAY_MS` - Animation frame pause (default: 150)
    /// - `ARENA_LOG_FILE` - Enable the log file (default: false)
    /// - `ARENA_LOG_DIR` - Log file directory (default: platform data dir)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if lookup("NO_COLOR").is_some() {
            config.color = false;
        }
        if let Some(ms) = read::<u64>(&lookup, "CLI_ANIMATION_DELAY_MS") {
            config.animation_delay = Duration::from_millis(ms);
        }
        if let Some(enable) = read::<bool>(&lookup, "ARENA_LOG_FILE") {
            config.log_file = enable;
        }
        config.log_dir = lookup("ARENA_LOG_DIR")
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        config
    }

    /// Renderer writing to stdout with these colors and this pacing.
    pub fn renderer(&self) -> ConsoleRenderer<std::io::Stdout> {
        ConsoleRenderer::stdout(Theme::new(self.color), self.animation_delay)
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

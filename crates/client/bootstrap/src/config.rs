//! Runtime configuration structures and loaders.
use std::env;

use client_narrator::PerplexityConfig;
use game_core::{EventLimits, GameConfig, StatBounds};

/// Name and starting maximums of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatantSetup {
    pub name: String,
    pub max_hp: u32,
    pub max_mana: u32,
}

impl CombatantSetup {
    pub fn new(name: impl Into<String>, max_hp: u32, max_mana: u32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            max_mana,
        }
    }

    pub fn default_player() -> Self {
        Self::new("Hero", 100, 60)
    }

    pub fn default_enemy() -> Self {
        Self::new("Goblin Shaman", 80, 50)
    }
}

/// Everything needed to set up battles, read once at startup.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    pub player: CombatantSetup,
    pub enemy: CombatantSetup,
    /// `None` runs without a narrator.
    pub narrator: Option<PerplexityConfig>,
    /// Let the narrator pick enemy actions (when a narrator is configured).
    pub narrator_enemy_choice: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            player: CombatantSetup::default_player(),
            enemy: CombatantSetup::default_enemy(),
            narrator: None,
            narrator_enemy_choice: true,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_MIN_HP` / `ARENA_MAX_HP` - Starting hp range (default: 0 / 100)
    /// - `ARENA_MIN_MANA` / `ARENA_MAX_MANA` - Starting mana range (default: 0 / 100)
    /// - `ARENA_MAX_HP_DELTA` / `ARENA_MAX_MANA_DELTA` - Narrator event caps (default: 10 / 10)
    /// - `ARENA_BASIC_ATTACK_DAMAGE` - Basic attack damage (default: 10)
    /// - `ARENA_EXHAUSTION_DRAW` - Draw when no one can afford a spell (default: true)
    /// - `PLAYER_NAME` / `PLAYER_MAX_HP` / `PLAYER_MAX_MANA` (default: Hero / 100 / 60)
    /// - `ENEMY_NAME` / `ENEMY_MAX_HP` / `ENEMY_MAX_MANA` (default: Goblin Shaman / 80 / 50)
    /// - `NARRATOR_ENEMY_CHOICE` - Narrator picks enemy actions (default: true)
    /// - `PERPLEXITY_*`, `NARRATOR_TIMEOUT_SECS` - see [`PerplexityConfig::from_env`]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`], reading from an arbitrary source.
    ///
    /// Unparsable values are logged and the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let env = Lookup(&lookup);

        let defaults = StatBounds::DEFAULT;
        let bounds = StatBounds {
            min_hp: env.read("ARENA_MIN_HP").unwrap_or(defaults.min_hp),
            max_hp: env.read("ARENA_MAX_HP").unwrap_or(defaults.max_hp),
            min_mana: env.read("ARENA_MIN_MANA").unwrap_or(defaults.min_mana),
            max_mana: env.read("ARENA_MAX_MANA").unwrap_or(defaults.max_mana),
        };
        let limits = EventLimits {
            max_hp_delta: env
                .read("ARENA_MAX_HP_DELTA")
                .unwrap_or(EventLimits::DEFAULT.max_hp_delta),
            max_mana_delta: env
                .read("ARENA_MAX_MANA_DELTA")
                .unwrap_or(EventLimits::DEFAULT.max_mana_delta),
        };

        config.game = config
            .game
            .with_bounds(bounds)
            .with_event_limits(limits)
            .with_basic_attack_damage(
                env.read("ARENA_BASIC_ATTACK_DAMAGE")
                    .unwrap_or(GameConfig::DEFAULT_BASIC_ATTACK_DAMAGE),
            )
            .with_exhaustion_draw(env.flag("ARENA_EXHAUSTION_DRAW").unwrap_or(true));

        config.player = env.combatant("PLAYER", config.player);
        config.enemy = env.combatant("ENEMY", config.enemy);

        config.narrator = PerplexityConfig::from_lookup(&lookup);
        config.narrator_enemy_choice = env.flag("NARRATOR_ENEMY_CHOICE").unwrap_or(true);

        config
    }
}

struct Lookup<'a, F>(&'a F);

impl<F> Lookup<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn raw(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn read<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        let value = self.raw(key)?;
        match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::warn!(key, value, "ignoring unparsable setting");
                None
            }
        }
    }

    fn flag(&self, key: &str) -> Option<bool> {
        let value = self.raw(key)?;
        match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => {
                tracing::warn!(key, value, "ignoring unparsable flag");
                None
            }
        }
    }

    fn combatant(&self, prefix: &str, default: CombatantSetup) -> CombatantSetup {
        CombatantSetup {
            name: self.raw(&format!("{prefix}_NAME")).unwrap_or(default.name),
            max_hp: self.read(&format!("{prefix}_MAX_HP")).unwrap_or(default.max_hp),
            max_mana: self
                .read(&format!("{prefix}_MAX_MANA"))
                .unwrap_or(default.max_mana),
        }
    }
}

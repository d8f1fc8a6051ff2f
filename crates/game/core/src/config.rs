/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Allowed range for starting maximum hp and mana.
    pub bounds: StatBounds,
    /// Largest stat change a single narrator event may apply.
    pub event_limits: EventLimits,
    /// Damage dealt by the always-available basic attack.
    pub basic_attack_damage: u32,
    /// End the battle in a draw when neither side can afford any spell.
    ///
    /// The basic attack costs nothing, so disabling this makes exhaustion
    /// draws unreachable.
    pub exhaustion_draw: bool,
}

impl GameConfig {
    // ===== rules constants =====
    /// Experience granted to a caster for every successful cast.
    pub const SPELL_EXPERIENCE: u32 = 10;
    pub const MIN_SPELL_LEVEL: u8 = 1;
    pub const MAX_SPELL_LEVEL: u8 = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASIC_ATTACK_DAMAGE: u32 = 10;

    pub fn new() -> Self {
        Self {
            bounds: StatBounds::default(),
            event_limits: EventLimits::default(),
            basic_attack_damage: Self::DEFAULT_BASIC_ATTACK_DAMAGE,
            exhaustion_draw: true,
        }
    }

    pub fn with_bounds(mut self, bounds: StatBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_event_limits(mut self, event_limits: EventLimits) -> Self {
        self.event_limits = event_limits;
        self
    }

    pub fn with_basic_attack_damage(mut self, damage: u32) -> Self {
        self.basic_attack_damage = damage;
        self
    }

    pub fn with_exhaustion_draw(mut self, enabled: bool) -> Self {
        self.exhaustion_draw = enabled;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Inclusive ranges a combatant's starting maximums must fall into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBounds {
    pub min_hp: u32,
    pub max_hp: u32,
    pub min_mana: u32,
    pub max_mana: u32,
}

impl StatBounds {
    pub const DEFAULT: Self = Self {
        min_hp: 0,
        max_hp: 100,
        min_mana: 0,
        max_mana: 100,
    };
}

impl Default for StatBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Symmetric magnitude caps for narrator-proposed stat changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLimits {
    pub max_hp_delta: u32,
    pub max_mana_delta: u32,
}

impl EventLimits {
    pub const DEFAULT: Self = Self {
        max_hp_delta: 10,
        max_mana_delta: 10,
    };

    /// Clamps a requested hp change into `[-max_hp_delta, max_hp_delta]`.
    pub fn clamp_hp(&self, requested: i64) -> i32 {
        clamp_symmetric(requested, self.max_hp_delta)
    }

    /// Clamps a requested mana change into `[-max_mana_delta, max_mana_delta]`.
    pub fn clamp_mana(&self, requested: i64) -> i32 {
        clamp_symmetric(requested, self.max_mana_delta)
    }
}

impl Default for EventLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn clamp_symmetric(value: i64, magnitude: u32) -> i32 {
    let limit = i64::from(magnitude.min(i32::MAX as u32));
    value.clamp(-limit, limit) as i32
}

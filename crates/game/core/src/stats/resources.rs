//! Resource pools (HP, mana) with clamped mutation.

/// Enum representing individual resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ResourceKind {
    /// Health points.
    Hp,
    /// Magic points.
    Mana,
}

/// Current value of a resource together with its maximum.
///
/// `current` is private so no write path can skip the clamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResourceMeter {
    current: u32,
    maximum: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` into `[0, maximum]`.
    pub const fn new(current: u32, maximum: u32) -> Self {
        let current = if current > maximum { maximum } else { current };
        Self { current, maximum }
    }

    /// Creates a meter filled to its maximum.
    pub const fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn maximum(&self) -> u32 {
        self.maximum
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Adds a signed delta and saturates into `[0, maximum]`.
    ///
    /// Returns the previous and resulting values.
    pub fn apply_delta(&mut self, delta: i64) -> (u32, u32) {
        let old = self.current;
        let raw = i64::from(old).saturating_add(delta);
        self.current = raw.clamp(0, i64::from(self.maximum)) as u32;
        (old, self.current)
    }

    /// Sets the value directly, still saturating into `[0, maximum]`.
    pub fn set(&mut self, value: u32) -> (u32, u32) {
        let old = self.current;
        self.current = value.min(self.maximum);
        (old, self.current)
    }
}

/// Diagnostic record of a single stat mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResourceChange {
    pub kind: ResourceKind,
    pub old: u32,
    pub new: u32,
}

impl ResourceChange {
    /// Signed difference between the new and old value.
    pub fn delta(&self) -> i64 {
        i64::from(self.new) - i64::from(self.old)
    }

    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }
}

//! Player attributes, credits and healing-ladder bookkeeping.

/// Player combatant and wallet.
///
/// Attributes are real-valued and only ever grow through use; `credits` is
/// signed because hospital charges can push the player into debt.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerState {
    pub hp: f64,
    pub max_hp: f64,
    pub strength: f64,
    pub defense: f64,
    pub ranged: f64,
    pub credits: i64,
    /// HP restored by full heals and not yet converted into max HP.
    pub total_hp_healed: f64,
    /// Banked healing required for the next max HP increase.
    pub next_level_threshold: f64,
}

impl PlayerState {
    pub const DEFAULT_MAX_HP: f64 = 100.0;

    #[inline]
    pub fn is_down(&self) -> bool {
        self.hp <= 0.0
    }

    #[inline]
    pub fn missing_hp(&self) -> f64 {
        (self.max_hp - self.hp).max(0.0)
    }

    /// Reduces hp by `amount`, never below zero.
    pub fn take_damage(&mut self, amount: f64) {
        self.hp = (self.hp - amount).max(0.0);
    }

    /// Repairs values a hand-edited or stale snapshot may carry.
    pub fn normalize(&mut self) {
        if !self.max_hp.is_finite() || self.max_hp < 1.0 {
            self.max_hp = Self::DEFAULT_MAX_HP;
        }
        if !self.hp.is_finite() {
            self.hp = 0.0;
        }
        self.hp = self.hp.clamp(0.0, self.max_hp);
        for stat in [&mut self.strength, &mut self.defense, &mut self.ranged] {
            if !stat.is_finite() || *stat < 0.0 {
                *stat = 0.0;
            }
        }
        if !self.total_hp_healed.is_finite() || self.total_hp_healed < 0.0 {
            self.total_hp_healed = 0.0;
        }
        if !self.next_level_threshold.is_finite() || self.next_level_threshold < 1.0 {
            self.next_level_threshold = self.max_hp;
        }
    }
}

impl Default for PlayerState {
    /// A freshly admitted patient: unconscious, broke, barely trained.
    fn default() -> Self {
        Self {
            hp: 0.0,
            max_hp: Self::DEFAULT_MAX_HP,
            strength: 1.0,
            defense: 1.0,
            ranged: 1.0,
            credits: 0,
            total_hp_healed: 0.0,
            next_level_threshold: Self::DEFAULT_MAX_HP,
        }
    }
}

use arrayvec::ArrayVec;

use crate::action::ActionTag;
use crate::config;
use crate::passives::Passive;
use crate::state::types::Position;

/// Identity handed to battle creation; everything else about a fighter is
/// derived from config and the passive registry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FighterSpec {
    /// Model identifier, also the key for passive resolution.
    pub model_id: String,
    /// Name used in narration and briefings.
    pub display_name: String,
}

impl FighterSpec {
    pub fn new(model_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// One-shot effects granted by pickups, consumed by the next relevant event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerUpEffects {
    /// +10 flat on the next attack or special attempt.
    pub damage_boost: bool,
    /// Halves the next incoming hit.
    pub shield_active: bool,
}

/// Mutable per-fighter battle state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub model_id: String,
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub position: Position,
    /// Set by the defend stance, cleared at the top of every round.
    pub defending: bool,
    pub special_cooldown: u8,
    pub dash_cooldown: u8,
    /// Heal charges remaining. Only ever decremented.
    pub heal_uses: u8,
    /// Armed by the charge stance, consumed by the next attack or special.
    pub charge_active: bool,
    /// Consecutive rounds the same action type was chosen.
    pub combo_run: u32,
    /// Action type chosen last round, for combo tracking.
    pub last_tag: Option<ActionTag>,
    pub effects: PowerUpEffects,
    pub passive: Passive,
    /// Rolling window of recent action types, newest last. Narration and
    /// analysis only; rules never read it.
    pub history: ArrayVec<ActionTag, { config::ACTION_HISTORY_LEN }>,
}

impl Fighter {
    pub fn new(spec: FighterSpec, position: Position, passive: Passive) -> Self {
        Self {
            model_id: spec.model_id,
            name: spec.display_name,
            hp: config::MAX_HP,
            max_hp: config::MAX_HP,
            position,
            defending: false,
            special_cooldown: 0,
            dash_cooldown: 0,
            heal_uses: config::STARTING_HEAL_USES,
            charge_active: false,
            combo_run: 0,
            last_tag: None,
            effects: PowerUpEffects::default(),
            passive,
            history: ArrayVec::new(),
        }
    }

    /// True once hp has been reduced to zero.
    #[inline]
    pub fn is_down(&self) -> bool {
        self.hp == 0
    }

    /// Reduce hp, clamping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Restore hp, clamping at max. Returns the amount actually restored.
    pub fn heal_by(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }

    /// Top-of-round upkeep: cooldowns tick down, the defend stance lapses,
    /// and Regeneration applies.
    pub fn begin_round(&mut self) {
        self.special_cooldown = self.special_cooldown.saturating_sub(1);
        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
        self.defending = false;
        if self.passive == Passive::Regeneration {
            self.heal_by(config::REGEN_AMOUNT);
        }
    }

    /// Update the combo run for this round's chosen action type.
    pub fn track_combo(&mut self, tag: ActionTag) {
        if self.last_tag == Some(tag) {
            self.combo_run += 1;
        } else {
            self.combo_run = 1;
            self.last_tag = Some(tag);
        }
    }

    /// True while repeated actions are penalized (run at or past the
    /// threshold).
    pub fn combo_decayed(&self) -> bool {
        self.combo_run >= config::COMBO_DECAY_THRESHOLD
    }

    /// Append to the rolling action history, evicting the oldest entry.
    pub fn record_history(&mut self, tag: ActionTag) {
        if self.history.is_full() {
            self.history.remove(0);
        }
        self.history.push(tag);
    }
}

//! Immutable per-round outcome records.
//!
//! A [`RoundResult`] is appended to the battle log every round and is the
//! unit renderers and decision briefings consume.

use crate::action::ActionTag;

/// One fighter's outcome for a round, described from the perspective of the
/// action that fighter took.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnResult {
    /// Action type the fighter chose.
    pub tag: ActionTag,
    /// Damage this fighter's action dealt to the opponent, after defenses.
    pub damage_dealt: u32,
    /// Human-readable account of what happened.
    pub narration: String,
    /// The attack landed as a critical hit.
    pub is_crit: bool,
    /// The attack displaced the opponent.
    pub knockback: bool,
    /// Counter damage this fighter received from a defending opponent.
    pub counter_damage: u32,
    /// The opponent dodged this fighter's attack outright.
    pub dodged: bool,
}

/// Combined record of one simultaneous round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResult {
    /// Round number this result describes (1-based).
    pub round: u32,
    pub a: TurnResult,
    pub b: TurnResult,
    /// One-line summary for logs and briefings.
    pub summary: String,
}

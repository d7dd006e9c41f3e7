//! Fighter decisions as a closed sum type.
//!
//! A round consumes exactly one [`Action`] per fighter. The engine assumes
//! structurally valid input: repairing a malformed model reply into a safe
//! default happens at the caller boundary, never here.

use crate::state::Direction;

/// A fighter's decision for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub kind: ActionKind,
    /// Free-form rationale supplied by the decision-maker. Carried for
    /// narration and logs; never affects resolution.
    pub reasoning: Option<String>,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            reasoning: None,
        }
    }

    pub fn with_reasoning(kind: ActionKind, reasoning: impl Into<String>) -> Self {
        Self {
            kind,
            reasoning: Some(reasoning.into()),
        }
    }

    /// Fieldless discriminant, used for combo tracking and history.
    pub fn tag(&self) -> ActionTag {
        self.kind.tag()
    }
}

/// What the fighter attempts this round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase", tag = "type"))]
pub enum ActionKind {
    /// Step one tile (two with the Speed passive).
    Move { direction: Direction },
    /// Cover two tiles; 3-round cooldown.
    Dash { direction: Direction },
    /// Melee strike against an adjacent opponent.
    Attack,
    /// Ranged strike within 3 tiles, needs line of sight; 3-round cooldown.
    Special,
    /// Halve incoming damage this round and counter melee hits.
    Defend,
    /// Spend one heal charge for 15 hp.
    Heal,
    /// Arm a 1.5x multiplier on the next attack or special.
    Charge,
}

impl ActionKind {
    pub const fn tag(self) -> ActionTag {
        match self {
            ActionKind::Move { .. } => ActionTag::Move,
            ActionKind::Dash { .. } => ActionTag::Dash,
            ActionKind::Attack => ActionTag::Attack,
            ActionKind::Special => ActionTag::Special,
            ActionKind::Defend => ActionTag::Defend,
            ActionKind::Heal => ActionTag::Heal,
            ActionKind::Charge => ActionTag::Charge,
        }
    }
}

/// Action type without payload. Combo decay compares these, so `move north`
/// and `move east` count as the same repeated type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActionTag {
    Move,
    Dash,
    Attack,
    Special,
    Defend,
    Heal,
    Charge,
}

//! Authoritative battle state representation.
//!
//! [`GameState`] is the sole unit of persistence between rounds: plain data,
//! no cyclic references, lossless through serde under the `serde` feature.
//! Callers treat round application as an immutable transform; all mutation
//! flows through [`crate::engine::BattleEngine`].

mod fighter;
mod types;

pub use fighter::{Fighter, FighterSpec, PowerUpEffects};
pub use types::{Direction, FighterId, Position, PowerUp, PowerUpKind, TileType};

use crate::config;
use crate::passives::PassiveRegistry;
use crate::result::RoundResult;
use crate::rng::RngOracle;
use crate::terrain::Terrain;

/// Final verdict of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Winner {
    A,
    B,
    Draw,
}

/// Canonical snapshot of one battle between exactly two fighters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// The two combatants, indexed by [`FighterId`].
    pub fighters: [Fighter; 2],
    /// Current round number, starting at 1.
    pub round: u32,
    /// Append-only log of every resolved round.
    pub log: Vec<RoundResult>,
    /// Set exactly once; the state is terminal afterwards.
    pub winner: Option<Winner>,
    /// Static grid, mutated only by the shrink process.
    pub terrain: Terrain,
    /// Active pickups on the floor.
    pub power_ups: Vec<PowerUp>,
    /// How many outer rings have been flooded so far (0-4).
    pub shrink_level: u8,
}

impl GameState {
    /// Create the initial state for a new battle: fixed start positions,
    /// round 1, empty log, no winner, freshly generated terrain, no
    /// power-ups. Passives are resolved once, here, from the injected
    /// registry.
    pub fn new<R: RngOracle + ?Sized>(
        spec_a: FighterSpec,
        spec_b: FighterSpec,
        passives: &PassiveRegistry,
        rng: &mut R,
    ) -> Self {
        let passive_a = passives.resolve(&spec_a.model_id);
        let passive_b = passives.resolve(&spec_b.model_id);
        let (ax, az) = config::START_POSITION_A;
        let (bx, bz) = config::START_POSITION_B;
        Self {
            fighters: [
                Fighter::new(spec_a, Position::new(ax, az), passive_a),
                Fighter::new(spec_b, Position::new(bx, bz), passive_b),
            ],
            round: 1,
            log: Vec::new(),
            winner: None,
            terrain: Terrain::generate(rng),
            power_ups: Vec::new(),
            shrink_level: 0,
        }
    }

    #[inline]
    pub fn fighter(&self, id: FighterId) -> &Fighter {
        &self.fighters[id.index()]
    }

    #[inline]
    pub fn fighter_mut(&mut self, id: FighterId) -> &mut Fighter {
        &mut self.fighters[id.index()]
    }

    /// Both fighters, mutable, with `id` first.
    pub fn pair_mut(&mut self, id: FighterId) -> (&mut Fighter, &mut Fighter) {
        let [a, b] = &mut self.fighters;
        match id {
            FighterId::A => (a, b),
            FighterId::B => (b, a),
        }
    }

    /// True once a winner has been recorded; no further rounds are accepted.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    /// Index into `power_ups` of the pickup at `position`, if any.
    pub fn power_up_at(&self, position: Position) -> Option<usize> {
        self.power_ups.iter().position(|p| p.position == position)
    }

    /// True if either fighter currently stands on `position`.
    pub fn occupied(&self, position: Position) -> bool {
        self.fighters.iter().any(|f| f.position == position)
    }

    /// Summaries of the most recent `count` rounds, oldest first.
    pub fn recent_summaries(&self, count: usize) -> impl Iterator<Item = &str> {
        let skip = self.log.len().saturating_sub(count);
        self.log[skip..].iter().map(|r| r.summary.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passives::{Passive, PassiveRegistry};
    use crate::rng::PcgRng;

    fn fresh() -> GameState {
        let mut rng = PcgRng::seeded(11);
        GameState::new(
            FighterSpec::new("gpt-4o", "Alpha"),
            FighterSpec::new("claude-sonnet", "Bravo"),
            &PassiveRegistry::builtin(),
            &mut rng,
        )
    }

    #[test]
    fn initial_state_shape() {
        let state = fresh();
        assert_eq!(state.round, 1);
        assert!(state.log.is_empty());
        assert!(state.winner.is_none());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.shrink_level, 0);
        assert_eq!(state.fighter(FighterId::A).position, Position::new(2, 5));
        assert_eq!(state.fighter(FighterId::B).position, Position::new(7, 5));
    }

    #[test]
    fn passives_resolved_from_registry() {
        let state = fresh();
        assert_eq!(state.fighter(FighterId::A).passive, Passive::Speed);
        assert_eq!(state.fighter(FighterId::B).passive, Passive::Fortified);
    }

    #[test]
    fn pair_mut_orders_by_id() {
        let mut state = fresh();
        let (me, other) = state.pair_mut(FighterId::B);
        assert_eq!(me.name, "Bravo");
        assert_eq!(other.name, "Alpha");
    }
}

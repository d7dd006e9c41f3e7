//! Round resolution pipeline.
//!
//! [`BattleEngine`] is the authoritative reducer for [`GameState`]. A round
//! consumes both fighters' actions at once and runs a fixed phase order:
//! upkeep, combo tracking, stances, movement, attacks, bookkeeping. Later
//! phases read state written by earlier ones, so the order is load-bearing
//! and must not be rearranged.
//!
//! The engine is pure except for the injected [`RngOracle`]: no I/O, no
//! globals, no recoverable error paths. Callers are responsible for checking
//! [`GameState::is_terminal`] before applying another round.

mod combat;
mod movement;

use crate::action::{Action, ActionKind, ActionTag};
use crate::config;
use crate::passives::PassiveRegistry;
use crate::result::{RoundResult, TurnResult};
use crate::rng::RngOracle;
use crate::state::{FighterId, FighterSpec, GameState, Position, PowerUp, PowerUpKind, TileType, Winner};

/// Working scratchpad for one fighter's turn, folded into a [`TurnResult`]
/// when the round closes.
pub(crate) struct TurnRecord {
    pub(crate) tag: ActionTag,
    parts: Vec<String>,
    pub(crate) damage_dealt: u32,
    pub(crate) is_crit: bool,
    pub(crate) knockback: bool,
    pub(crate) counter_damage: u32,
    pub(crate) dodged: bool,
}

impl TurnRecord {
    fn new(tag: ActionTag) -> Self {
        Self {
            tag,
            parts: Vec::new(),
            damage_dealt: 0,
            is_crit: false,
            knockback: false,
            counter_damage: 0,
            dodged: false,
        }
    }

    /// Append one narration fragment.
    pub(crate) fn note(&mut self, text: impl Into<String>) {
        self.parts.push(text.into());
    }

    fn narration(&self) -> String {
        if self.parts.is_empty() {
            "bides their time".to_string()
        } else {
            self.parts.join("; ")
        }
    }

    fn into_turn_result(self) -> TurnResult {
        let narration = self.narration();
        TurnResult {
            tag: self.tag,
            damage_dealt: self.damage_dealt,
            narration,
            is_crit: self.is_crit,
            knockback: self.knockback,
            counter_damage: self.counter_damage,
            dodged: self.dodged,
        }
    }
}

/// Deterministic-except-for-seeded-randomness battle reducer.
///
/// Owns the RNG stream for one battle. All state mutation happens on a
/// private working copy; `apply_round` returns a fresh value that shares no
/// storage with its input, so the previous and new states stay independently
/// inspectable.
pub struct BattleEngine<R: RngOracle> {
    rng: R,
}

impl<R: RngOracle> BattleEngine<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Construct the initial state for a new battle, resolving passives
    /// through the injected registry and generating terrain from this
    /// engine's RNG stream.
    pub fn create_battle(
        &mut self,
        spec_a: FighterSpec,
        spec_b: FighterSpec,
        passives: &PassiveRegistry,
    ) -> GameState {
        GameState::new(spec_a, spec_b, passives, &mut self.rng)
    }

    /// Resolve one simultaneous round.
    ///
    /// Both actions must already be structurally valid; repairing malformed
    /// decisions is the caller's job. Invoking this on a terminal state is a
    /// caller bug.
    pub fn apply_round(
        &mut self,
        state: &GameState,
        action_a: Action,
        action_b: Action,
    ) -> (GameState, RoundResult) {
        debug_assert!(!state.is_terminal(), "round applied to a finished battle");

        let mut next = state.clone();
        let actions = [action_a, action_b];
        let mut records = [
            TurnRecord::new(actions[0].tag()),
            TurnRecord::new(actions[1].tag()),
        ];

        // Phase 1: cooldown/regen upkeep, defend stance lapses.
        for fighter in &mut next.fighters {
            fighter.begin_round();
        }

        // Phase 2: combo tracking, read later by the damage math.
        for id in FighterId::BOTH {
            next.fighters[id.index()].track_combo(actions[id.index()].tag());
        }

        // Phase 3: stances.
        for id in FighterId::BOTH {
            let i = id.index();
            resolve_stance(&mut next, id, &actions[i], &mut records[i]);
        }

        // Phase 4: movement, collisions, pickups.
        movement::resolve(&mut next, &actions, &mut records);

        // Phase 5: attacks. Range and line of sight are gated on the
        // positions as they stand after phase 4 for both fighters, so a
        // simultaneous trade is not broken by the first knockback. Damage
        // and knockback still apply strictly A before B; that order is the
        // tie-break when both shove each other in the same round.
        let staged = [next.fighters[0].position, next.fighters[1].position];
        combat::resolve(&mut next, FighterId::A, staged, &mut self.rng, &mut records[0]);
        combat::resolve(&mut next, FighterId::B, staged, &mut self.rng, &mut records[1]);

        // Phase 6: bookkeeping.
        let result = self.close_round(&mut next, records);
        (next, result)
    }

    fn close_round(&mut self, next: &mut GameState, records: [TurnRecord; 2]) -> RoundResult {
        for id in FighterId::BOTH {
            let i = id.index();
            let tag = records[i].tag;
            next.fighters[i].record_history(tag);
        }

        check_winner(next);

        let completed = next.round;
        if next.winner.is_none() {
            apply_shrink(next, completed);
            // Shrink lava can finish a fighter standing in the flooded ring.
            check_winner(next);
        }
        if next.winner.is_none() {
            self.spawn_power_up(next, completed);
            if completed >= config::MAX_ROUNDS {
                let [a, b] = &next.fighters;
                next.winner = Some(if a.hp > b.hp {
                    Winner::A
                } else if b.hp > a.hp {
                    Winner::B
                } else {
                    Winner::Draw
                });
            }
        }

        let [rec_a, rec_b] = records;
        let summary = format!(
            "Round {}: {} {}. {} {}. [{} {}/{} hp | {} {}/{} hp]",
            completed,
            next.fighters[0].name,
            rec_a.narration(),
            next.fighters[1].name,
            rec_b.narration(),
            next.fighters[0].name,
            next.fighters[0].hp,
            next.fighters[0].max_hp,
            next.fighters[1].name,
            next.fighters[1].hp,
            next.fighters[1].max_hp,
        );
        let result = RoundResult {
            round: completed,
            a: rec_a.into_turn_result(),
            b: rec_b.into_turn_result(),
            summary,
        };
        next.log.push(result.clone());
        next.round += 1;
        result
    }

    /// Every few rounds, try to drop one power-up on a free empty tile.
    /// Exhausting the attempt budget just misses the spawn window.
    fn spawn_power_up(&mut self, state: &mut GameState, completed: u32) {
        if completed % config::POWERUP_SPAWN_INTERVAL != 0 {
            return;
        }
        let max = (config::GRID_SIZE - 1) as u32;
        for _ in 0..config::POWERUP_SPAWN_ATTEMPTS {
            let position = Position::new(
                self.rng.range(0, max) as i32,
                self.rng.range(0, max) as i32,
            );
            if state.terrain.tile(position) != TileType::Empty
                || state.occupied(position)
                || state.power_up_at(position).is_some()
            {
                continue;
            }
            let kind = match self.rng.range(0, 2) {
                0 => PowerUpKind::Heal,
                1 => PowerUpKind::Damage,
                _ => PowerUpKind::Shield,
            };
            state.power_ups.push(PowerUp { position, kind });
            return;
        }
    }
}

/// Phase 3: defend, charge, and heal stances.
fn resolve_stance(state: &mut GameState, id: FighterId, action: &Action, record: &mut TurnRecord) {
    let fighter = state.fighter_mut(id);
    match action.kind {
        ActionKind::Defend => {
            fighter.defending = true;
            record.note(format!("{} braces behind their guard", fighter.name));
        }
        ActionKind::Charge => {
            fighter.charge_active = true;
            record.note(format!("{} channels energy for a charged strike", fighter.name));
        }
        ActionKind::Heal => {
            if fighter.heal_uses == 0 {
                record.note(format!(
                    "{} reaches for a heal but has none left",
                    fighter.name
                ));
            } else {
                fighter.heal_uses -= 1;
                let restored = fighter.heal_by(config::HEAL_AMOUNT);
                record.note(format!(
                    "{} patches up for {} hp ({} heals left)",
                    fighter.name, restored, fighter.heal_uses
                ));
            }
        }
        _ => {}
    }
}

/// Record the verdict once either fighter is down. Both down in the same
/// round is a draw. Never overwrites an existing verdict.
fn check_winner(state: &mut GameState) {
    if state.winner.is_some() {
        return;
    }
    let a_down = state.fighters[0].is_down();
    let b_down = state.fighters[1].is_down();
    state.winner = match (a_down, b_down) {
        (true, true) => Some(Winner::Draw),
        (true, false) => Some(Winner::B),
        (false, true) => Some(Winner::A),
        (false, false) => None,
    };
}

/// Flood the next outer ring with lava when the round count crosses a
/// shrink threshold. Fighters caught standing in the flood take lava damage
/// once, as a direct effect of the shrink event.
fn apply_shrink(state: &mut GameState, completed: u32) {
    let level = completed / config::SHRINK_INTERVAL;
    if level <= state.shrink_level as u32 || level > config::MAX_SHRINK_LEVEL as u32 {
        return;
    }
    state.shrink_level = level as u8;
    let GameState {
        fighters, terrain, ..
    } = state;
    terrain.shrink_to(level as u8);
    for fighter in fighters {
        if terrain.is_lava(fighter.position) {
            fighter.take_damage(config::LAVA_DAMAGE);
        }
    }
}

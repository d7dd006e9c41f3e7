//! Phase 4: movement resolution with collision handling.
//!
//! Both fighters' paths are computed independently against the opponent's
//! pre-round position, then reconciled: if the resolved destinations
//! coincide, the head-on collision rule reverts both. Pickups and lava
//! apply at the final landing tile only.

use crate::action::{Action, ActionKind};
use crate::config;
use crate::engine::TurnRecord;
use crate::passives::Passive;
use crate::state::{Direction, FighterId, GameState, Position, PowerUpKind};
use crate::terrain::Terrain;

pub(super) fn resolve(state: &mut GameState, actions: &[Action; 2], records: &mut [TurnRecord; 2]) {
    let starts = [state.fighters[0].position, state.fighters[1].position];
    let mut destinations = starts;
    // Verb for narration, set only when a movement attempt actually ran.
    let mut verbs: [Option<&'static str>; 2] = [None, None];

    for id in FighterId::BOTH {
        let i = id.index();
        let opponent_start = starts[id.opponent().index()];
        match actions[i].kind {
            ActionKind::Move { direction } => {
                let steps = if state.fighters[i].passive == Passive::Speed {
                    config::SPEED_MOVE_STEPS
                } else {
                    1
                };
                destinations[i] = walk(&state.terrain, starts[i], direction, steps, opponent_start);
                verbs[i] = Some("moves");
            }
            ActionKind::Dash { direction } => {
                let fighter = &mut state.fighters[i];
                if fighter.dash_cooldown > 0 {
                    // On cooldown: no movement, no cooldown consumed.
                    records[i].note(format!(
                        "{} tries to dash but is still winded ({} rounds left)",
                        fighter.name, fighter.dash_cooldown
                    ));
                } else {
                    fighter.dash_cooldown = config::DASH_COOLDOWN;
                    destinations[i] = walk(
                        &state.terrain,
                        starts[i],
                        direction,
                        config::DASH_DISTANCE,
                        opponent_start,
                    );
                    verbs[i] = Some("dashes");
                }
            }
            _ => {}
        }
    }

    if destinations[0] == destinations[1] && destinations != starts {
        for i in 0..2 {
            if destinations[i] != starts[i] {
                records[i].note(format!(
                    "{} collides head-on and is forced back to {}",
                    state.fighters[i].name, starts[i]
                ));
            }
        }
        return;
    }

    for id in FighterId::BOTH {
        let i = id.index();
        let Some(verb) = verbs[i] else { continue };
        if destinations[i] == starts[i] {
            records[i].note(format!(
                "{} finds no path and holds position at {}",
                state.fighters[i].name, starts[i]
            ));
            continue;
        }

        state.fighters[i].position = destinations[i];
        records[i].note(format!(
            "{} {} to {}",
            state.fighters[i].name, verb, destinations[i]
        ));

        if state.terrain.is_lava(destinations[i]) {
            state.fighters[i].take_damage(config::LAVA_DAMAGE);
            records[i].note(format!(
                "{} lands in lava and burns for {} damage",
                state.fighters[i].name,
                config::LAVA_DAMAGE
            ));
        }

        if let Some(index) = state.power_up_at(destinations[i]) {
            let power_up = state.power_ups.remove(index);
            apply_pickup(state, id, power_up.kind, &mut records[i]);
        }
    }
}

/// Step one tile at a time in `direction`. A step into a wall, off the
/// grid, or onto the opponent's pre-round tile stops the walk there.
fn walk(
    terrain: &Terrain,
    from: Position,
    direction: Direction,
    steps: u32,
    opponent_start: Position,
) -> Position {
    let mut position = from;
    for _ in 0..steps {
        let next = position.offset(direction);
        if terrain.is_wall(next) || next == opponent_start {
            break;
        }
        position = next;
    }
    position
}

fn apply_pickup(state: &mut GameState, id: FighterId, kind: PowerUpKind, record: &mut TurnRecord) {
    let fighter = state.fighter_mut(id);
    match kind {
        PowerUpKind::Heal => {
            let restored = fighter.heal_by(config::POWERUP_HEAL_AMOUNT);
            record.note(format!(
                "{} grabs a heal power-up and recovers {} hp",
                fighter.name, restored
            ));
        }
        PowerUpKind::Damage => {
            fighter.effects.damage_boost = true;
            record.note(format!(
                "{} grabs a damage power-up, next strike hits harder",
                fighter.name
            ));
        }
        PowerUpKind::Shield => {
            fighter.effects.shield_active = true;
            record.note(format!(
                "{} grabs a shield power-up, the next hit is halved",
                fighter.name
            ));
        }
    }
}

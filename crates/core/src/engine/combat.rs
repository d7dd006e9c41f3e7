//! Phase 5: attack resolution.
//!
//! Damage math follows a strict step order with a cumulative integer floor:
//! base roll, combo decay, charge, damage boost, crit, unpredictable bonus
//! on offense; dodge, shield, defend, fortified on defense. Each
//! multiplicative step floors before the next one runs, so every factor is
//! expressed as integer numerator/denominator math.

use crate::config;
use crate::engine::TurnRecord;
use crate::passives::Passive;
use crate::rng::RngOracle;
use crate::state::{Fighter, FighterId, GameState, Position};
use crate::terrain::Terrain;

/// Outcome of running the defense gauntlet.
enum Defense {
    Dodged,
    Landed(u32),
}

/// Positions both fighters held at the end of the movement phase; range and
/// line-of-sight gates read these instead of live positions.
type StagedPositions = [Position; 2];

pub(super) fn resolve<R: RngOracle + ?Sized>(
    state: &mut GameState,
    id: FighterId,
    staged: StagedPositions,
    rng: &mut R,
    record: &mut TurnRecord,
) {
    let origin = staged[id.index()];
    let target = staged[id.opponent().index()];
    let GameState {
        fighters, terrain, ..
    } = state;
    let [a, b] = fighters;
    let (attacker, defender) = match id {
        FighterId::A => (a, b),
        FighterId::B => (b, a),
    };
    match record.tag {
        crate::action::ActionTag::Attack => {
            melee(attacker, defender, terrain, origin, target, rng, record)
        }
        crate::action::ActionTag::Special => {
            special(attacker, defender, terrain, origin, target, rng, record)
        }
        _ => {}
    }
}

fn melee<R: RngOracle + ?Sized>(
    attacker: &mut Fighter,
    defender: &mut Fighter,
    terrain: &Terrain,
    origin: Position,
    target: Position,
    rng: &mut R,
    record: &mut TurnRecord,
) {
    let distance = origin.chebyshev(target);
    if distance > config::ATTACK_RANGE {
        consume_attempt_flags(attacker);
        record.note(format!(
            "{} swings at {} but is out of reach",
            attacker.name, defender.name
        ));
        return;
    }

    let damage = roll_offense(
        attacker,
        rng,
        config::ATTACK_DAMAGE_MIN,
        config::ATTACK_DAMAGE_MAX,
        record,
    );
    match run_defense(defender, damage, rng) {
        Defense::Dodged => {
            record.dodged = true;
            record.note(format!(
                "{} strikes, but {} blinks aside and evades completely",
                attacker.name, defender.name
            ));
        }
        Defense::Landed(final_damage) => {
            defender.take_damage(final_damage);
            record.damage_dealt = final_damage;
            record.note(format!(
                "{} strikes {} for {} damage{}",
                attacker.name,
                defender.name,
                final_damage,
                if record.is_crit { ", a critical hit" } else { "" }
            ));

            if defender.defending {
                attacker.take_damage(config::COUNTER_DAMAGE);
                record.counter_damage = config::COUNTER_DAMAGE;
                record.note(format!(
                    "{} counters through their guard for {} damage",
                    defender.name,
                    config::COUNTER_DAMAGE
                ));
            }

            knockback(attacker, defender, terrain, record);
        }
    }
}

fn special<R: RngOracle + ?Sized>(
    attacker: &mut Fighter,
    defender: &mut Fighter,
    terrain: &Terrain,
    origin: Position,
    target: Position,
    rng: &mut R,
    record: &mut TurnRecord,
) {
    if attacker.special_cooldown > 0 {
        record.note(format!(
            "{}'s special is still recharging ({} rounds left)",
            attacker.name, attacker.special_cooldown
        ));
        return;
    }
    // Cooldown is spent on any attempt past the gate, blocked shots included.
    attacker.special_cooldown = config::SPECIAL_COOLDOWN;

    let distance = origin.chebyshev(target);
    if distance > config::SPECIAL_RANGE {
        consume_attempt_flags(attacker);
        record.note(format!(
            "{} unleashes a special blast, but {} is out of range",
            attacker.name, defender.name
        ));
        return;
    }
    if !terrain.line_of_sight(origin, target) {
        consume_attempt_flags(attacker);
        record.note(format!(
            "{}'s special blast shatters against a wall",
            attacker.name
        ));
        return;
    }

    let damage = roll_offense(
        attacker,
        rng,
        config::SPECIAL_DAMAGE_MIN,
        config::SPECIAL_DAMAGE_MAX,
        record,
    );
    match run_defense(defender, damage, rng) {
        Defense::Dodged => {
            record.dodged = true;
            record.note(format!(
                "{} fires a special blast, but {} evades completely",
                attacker.name, defender.name
            ));
        }
        Defense::Landed(final_damage) => {
            defender.take_damage(final_damage);
            record.damage_dealt = final_damage;
            record.note(format!(
                "{} blasts {} for {} damage{}",
                attacker.name,
                defender.name,
                final_damage,
                if record.is_crit { ", a critical hit" } else { "" }
            ));
        }
    }
}

/// Offense pipeline. Consumes the charge and damage-boost flags whether or
/// not the hit eventually lands.
fn roll_offense<R: RngOracle + ?Sized>(
    attacker: &mut Fighter,
    rng: &mut R,
    min: u32,
    max: u32,
    record: &mut TurnRecord,
) -> u32 {
    let mut damage = rng.range(min, max);
    if attacker.combo_decayed() {
        damage = damage * config::COMBO_DECAY_NUMERATOR / config::COMBO_DECAY_DENOMINATOR;
        record.note(format!("{} is getting predictable, the blow loses force", attacker.name));
    }
    if attacker.charge_active {
        attacker.charge_active = false;
        damage = damage * config::CHARGE_NUMERATOR / config::CHARGE_DENOMINATOR;
    }
    if attacker.effects.damage_boost {
        attacker.effects.damage_boost = false;
        damage += config::DAMAGE_BOOST_BONUS;
    }
    if rng.chance(config::CRIT_CHANCE) {
        let multiplier = if attacker.passive == Passive::Berserker {
            config::BERSERKER_CRIT_MULTIPLIER
        } else {
            config::CRIT_MULTIPLIER
        };
        damage *= multiplier;
        record.is_crit = true;
    }
    if attacker.passive == Passive::Unpredictable && rng.chance(config::UNPREDICTABLE_CHANCE) {
        damage += config::UNPREDICTABLE_BONUS;
    }
    damage
}

/// Defense pipeline: dodge, then shield, then defend stance, then
/// Fortified, each flooring independently.
fn run_defense<R: RngOracle + ?Sized>(defender: &mut Fighter, damage: u32, rng: &mut R) -> Defense {
    if defender.passive == Passive::Evasion && rng.chance(config::DODGE_CHANCE) {
        return Defense::Dodged;
    }
    let mut damage = damage;
    if defender.effects.shield_active {
        defender.effects.shield_active = false;
        damage /= 2;
    }
    if defender.defending {
        damage /= 2;
    }
    if defender.passive == Passive::Fortified {
        damage = damage * config::FORTIFIED_NUMERATOR / config::FORTIFIED_DENOMINATOR;
    }
    Defense::Landed(damage)
}

/// A landed melee hit shoves the defender one tile away along the dominant
/// axis (x wins ties). Walls and the arena edge stop the shove and hurt;
/// lava accepts it and burns.
fn knockback(
    attacker: &mut Fighter,
    defender: &mut Fighter,
    terrain: &Terrain,
    record: &mut TurnRecord,
) {
    let dx = defender.position.x - attacker.position.x;
    let dz = defender.position.z - attacker.position.z;
    let destination = if dx.abs() >= dz.abs() {
        Position::new(defender.position.x + dx.signum(), defender.position.z)
    } else {
        Position::new(defender.position.x, defender.position.z + dz.signum())
    };

    if destination == attacker.position {
        return;
    }
    if terrain.is_wall(destination) {
        defender.take_damage(config::WALL_KNOCKBACK_DAMAGE);
        record.note(format!(
            "the blow slams {} into a wall for {} damage",
            defender.name,
            config::WALL_KNOCKBACK_DAMAGE
        ));
        return;
    }

    defender.position = destination;
    record.knockback = true;
    if terrain.is_lava(destination) {
        defender.take_damage(config::LAVA_DAMAGE);
        record.note(format!(
            "the blow knocks {} into lava for {} damage",
            defender.name,
            config::LAVA_DAMAGE
        ));
    } else {
        record.note(format!(
            "the blow sends {} reeling to {}",
            defender.name, destination
        ));
    }
}

/// Charge and damage boost are spent on any attack or special attempt,
/// landed or not.
fn consume_attempt_flags(attacker: &mut Fighter) {
    attacker.charge_active = false;
    attacker.effects.damage_boost = false;
}

//! Textual state summarization for decision-makers.
//!
//! [`compose_briefing`] renders everything a fighter's policy (an LLM or
//! any other decision-maker) is allowed to observe before choosing an
//! action. The engine's outbound contract is the informational content of
//! this text, not its exact prose.

use std::fmt::Write;

use crate::config;
use crate::state::{FighterId, GameState, TileType};

/// Render the round briefing from one fighter's viewpoint.
pub fn compose_briefing(state: &GameState, viewpoint: FighterId) -> String {
    let me = state.fighter(viewpoint);
    let foe = state.fighter(viewpoint.opponent());
    let mut out = String::new();

    let _ = writeln!(out, "ROUND {} of {}", state.round, config::MAX_ROUNDS);
    let _ = writeln!(
        out,
        "You are {} at {} with {}/{} hp.",
        me.name, me.position, me.hp, me.max_hp
    );
    let _ = writeln!(
        out,
        "Passive: {} ({}).",
        me.passive.name(),
        me.passive.description()
    );
    let _ = writeln!(
        out,
        "Stance: defending={}, charge armed={}, shield={}, damage boost={}.",
        me.defending, me.charge_active, me.effects.shield_active, me.effects.damage_boost
    );
    let _ = writeln!(
        out,
        "Cooldowns: special {} rounds, dash {} rounds. Heal uses left: {}.",
        me.special_cooldown, me.dash_cooldown, me.heal_uses
    );

    let _ = writeln!(
        out,
        "Opponent {} at {} with {}/{} hp, passive {}, defending={}.",
        foe.name,
        foe.position,
        foe.hp,
        foe.max_hp,
        foe.passive.name(),
        foe.defending
    );
    let distance = me.position.chebyshev(foe.position);
    let _ = writeln!(
        out,
        "Distance: {} tiles (attack range: {}, special range: {}).",
        distance,
        if distance <= config::ATTACK_RANGE {
            "yes"
        } else {
            "no"
        },
        if distance <= config::SPECIAL_RANGE {
            "yes"
        } else {
            "no"
        },
    );

    let mut hazards = Vec::new();
    for (position, tile) in state.terrain.iter() {
        if tile != TileType::Empty
            && me.position.chebyshev(position) <= config::BRIEFING_TERRAIN_RADIUS
        {
            hazards.push(format!(
                "{} at {}",
                match tile {
                    TileType::Wall => "wall",
                    TileType::Lava => "lava",
                    TileType::Empty => unreachable!(),
                },
                position
            ));
        }
    }
    if hazards.is_empty() {
        let _ = writeln!(out, "Nearby terrain: clear within 2 tiles.");
    } else {
        let _ = writeln!(out, "Nearby terrain: {}.", hazards.join(", "));
    }

    if state.power_ups.is_empty() {
        let _ = writeln!(out, "Power-ups: none on the field.");
    } else {
        let list: Vec<String> = state
            .power_ups
            .iter()
            .map(|p| format!("{} at {}", p.kind, p.position))
            .collect();
        let _ = writeln!(out, "Power-ups: {}.", list.join(", "));
    }

    let next_level = state.shrink_level + 1;
    if next_level <= config::MAX_SHRINK_LEVEL {
        let shrink_round = next_level as u32 * config::SHRINK_INTERVAL;
        let _ = writeln!(
            out,
            "Arena shrink level {}. Next shrink at round {} ({} rounds away).",
            state.shrink_level,
            shrink_round,
            shrink_round.saturating_sub(state.round)
        );
    } else {
        let _ = writeln!(
            out,
            "Arena shrink level {}. The arena will not shrink further.",
            state.shrink_level
        );
    }

    let recent: Vec<&str> = state.recent_summaries(3).collect();
    if recent.is_empty() {
        let _ = writeln!(out, "No rounds resolved yet.");
    } else {
        let _ = writeln!(out, "Recent rounds:");
        for summary in recent {
            let _ = writeln!(out, "  {summary}");
        }
    }

    out
}

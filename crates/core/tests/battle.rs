//! End-to-end round resolution scenarios with stubbed randomness.
//!
//! These tests drive [`BattleEngine::apply_round`] against hand-built
//! states. Stub oracles replace the PCG stream so damage math and chance
//! gates are exact.

use std::collections::VecDeque;

use arena_core::{
    Action, ActionKind, ActionTag, BattleEngine, Direction, Fighter, FighterId, FighterSpec,
    GameState, Passive, PassiveRegistry, PcgRng, Position, PowerUp, PowerUpKind, RngOracle,
    Terrain, TileType, Winner,
};

/// Chance gates never fire; variance rolls return a fixed value clamped
/// into the requested range.
struct NoLuckRng {
    roll: u32,
}

impl RngOracle for NoLuckRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        self.roll.clamp(min, max)
    }

    fn chance(&mut self, _percent: u32) -> bool {
        false
    }
}

/// Fully scripted rolls: each call pops the next queued value.
struct ScriptRng {
    ranges: VecDeque<u32>,
    chances: VecDeque<bool>,
}

impl ScriptRng {
    fn new(ranges: &[u32], chances: &[bool]) -> Self {
        Self {
            ranges: ranges.iter().copied().collect(),
            chances: chances.iter().copied().collect(),
        }
    }
}

impl RngOracle for ScriptRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        self.ranges
            .pop_front()
            .map(|v| v.clamp(min, max))
            .unwrap_or(min)
    }

    fn chance(&mut self, _percent: u32) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }
}

fn duel(a_pos: Position, b_pos: Position) -> GameState {
    GameState {
        fighters: [
            Fighter::new(FighterSpec::new("model-a", "Alpha"), a_pos, Passive::None),
            Fighter::new(FighterSpec::new("model-b", "Bravo"), b_pos, Passive::None),
        ],
        round: 1,
        log: Vec::new(),
        winner: None,
        terrain: Terrain::empty(),
        power_ups: Vec::new(),
        shrink_level: 0,
    }
}

fn act(kind: ActionKind) -> Action {
    Action::new(kind)
}

#[test]
fn basic_trade_deals_symmetric_damage() {
    let state = duel(Position::new(4, 5), Position::new(5, 5));
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, result) = engine.apply_round(&state, act(ActionKind::Attack), act(ActionKind::Attack));

    assert_eq!(result.a.damage_dealt, 20);
    assert_eq!(result.b.damage_dealt, 20);
    assert!((15..=25).contains(&result.a.damage_dealt));
    assert_eq!(next.fighters[0].hp, 80);
    assert_eq!(next.fighters[1].hp, 80);
    // A's knockback shoved B east; B's attack still landed because range is
    // gated on post-movement positions, and its knockback shoved A west.
    assert_eq!(next.fighters[1].position, Position::new(6, 5));
    assert_eq!(next.fighters[0].position, Position::new(3, 5));
    assert!(result.a.knockback && result.b.knockback);
    assert!(next.winner.is_none());
}

#[test]
fn defend_halves_damage_and_counters() {
    let state = duel(Position::new(4, 5), Position::new(5, 5));
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, result) = engine.apply_round(&state, act(ActionKind::Defend), act(ActionKind::Attack));

    // 20 halved by the defend stance.
    assert_eq!(result.b.damage_dealt, 10);
    assert_eq!(next.fighters[0].hp, 90);
    // Exact counter damage back to the attacker.
    assert_eq!(result.b.counter_damage, 8);
    assert_eq!(next.fighters[1].hp, 92);
}

#[test]
fn head_on_collision_reverts_both_moves() {
    let state = duel(Position::new(4, 5), Position::new(6, 5));
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, _) = engine.apply_round(
        &state,
        act(ActionKind::Move {
            direction: Direction::East,
        }),
        act(ActionKind::Move {
            direction: Direction::West,
        }),
    );

    assert_eq!(next.fighters[0].position, Position::new(4, 5));
    assert_eq!(next.fighters[1].position, Position::new(6, 5));
    // The pre-round state is untouched by the transform.
    assert_eq!(state.fighters[0].position, Position::new(4, 5));
}

#[test]
fn dash_cooldown_cycle() {
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });
    let dash_east = || {
        act(ActionKind::Dash {
            direction: Direction::East,
        })
    };
    let state = duel(Position::new(2, 5), Position::new(7, 5));

    // Round 1: dash covers two tiles and arms the cooldown.
    let (state, _) = engine.apply_round(&state, dash_east(), act(ActionKind::Defend));
    assert_eq!(state.fighters[0].position, Position::new(4, 5));
    assert_eq!(state.fighters[0].dash_cooldown, 3);

    // Round 2: still cooling down, the dash is ignored and the cooldown is
    // not reset (it ticked down during upkeep).
    let (state, _) = engine.apply_round(&state, dash_east(), act(ActionKind::Defend));
    assert_eq!(state.fighters[0].position, Position::new(4, 5));
    assert_eq!(state.fighters[0].dash_cooldown, 2);

    // Round 3: idle, cooldown keeps ticking.
    let (state, _) = engine.apply_round(&state, act(ActionKind::Defend), act(ActionKind::Defend));
    assert_eq!(state.fighters[0].dash_cooldown, 1);

    // Round 4: upkeep clears the cooldown, dash works again.
    let (state, _) = engine.apply_round(&state, dash_east(), act(ActionKind::Defend));
    assert_eq!(state.fighters[0].position, Position::new(6, 5));
    assert_eq!(state.fighters[0].dash_cooldown, 3);
}

#[test]
fn special_blocked_by_wall_still_consumes_cooldown() {
    let mut state = duel(Position::new(2, 5), Position::new(5, 5));
    state.terrain.set(Position::new(4, 5), TileType::Wall);
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, result) = engine.apply_round(&state, act(ActionKind::Special), act(ActionKind::Defend));

    assert_eq!(result.a.damage_dealt, 0);
    assert!(result.a.narration.contains("shatters against a wall"));
    assert_eq!(next.fighters[0].special_cooldown, 3);
    assert_eq!(next.fighters[1].hp, 100);
}

#[test]
fn special_hits_through_clear_line() {
    let state = duel(Position::new(2, 5), Position::new(4, 5));
    let mut engine = BattleEngine::new(NoLuckRng { roll: 15 });

    let (next, result) = engine.apply_round(&state, act(ActionKind::Special), act(ActionKind::Charge));

    assert_eq!(result.a.damage_dealt, 15);
    assert_eq!(next.fighters[1].hp, 85);
    assert_eq!(next.fighters[0].special_cooldown, 3);
    // Ranged specials never knock back or draw counters.
    assert!(!result.a.knockback);
    assert_eq!(result.a.counter_damage, 0);
}

#[test]
fn round_limit_falls_back_to_draw_on_equal_hp() {
    let mut state = duel(Position::new(2, 5), Position::new(7, 5));
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });
    let mut rounds = 0;

    while !state.is_terminal() {
        let (next, _) = engine.apply_round(&state, act(ActionKind::Defend), act(ActionKind::Defend));
        state = next;
        rounds += 1;
        assert!(rounds <= 26, "round limit failed to trigger");
    }

    assert_eq!(rounds, 25);
    assert_eq!(state.winner, Some(Winner::Draw));
    assert_eq!(state.log.len(), 25);
}

#[test]
fn simultaneous_deaths_are_a_draw() {
    let mut state = duel(Position::new(4, 5), Position::new(5, 5));
    state.fighters[0].hp = 10;
    state.fighters[1].hp = 10;
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, _) = engine.apply_round(&state, act(ActionKind::Attack), act(ActionKind::Attack));

    assert_eq!(next.winner, Some(Winner::Draw));
    assert!(next.is_terminal());
}

#[test]
fn lone_death_names_the_survivor() {
    let mut state = duel(Position::new(4, 5), Position::new(5, 5));
    state.fighters[1].hp = 10;
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, _) = engine.apply_round(&state, act(ActionKind::Attack), act(ActionKind::Attack));

    assert_eq!(next.winner, Some(Winner::A));
    // The doomed fighter's simultaneous attack still landed.
    assert_eq!(next.fighters[0].hp, 80);
}

#[test]
fn damage_step_order_is_deterministic_under_scripted_rolls() {
    let mut state = duel(Position::new(4, 5), Position::new(5, 5));
    // Attacker: combo-decayed, charged, boosted, Unpredictable.
    state.fighters[0].passive = Passive::Unpredictable;
    state.fighters[0].last_tag = Some(ActionTag::Attack);
    state.fighters[0].combo_run = 2;
    state.fighters[0].charge_active = true;
    state.fighters[0].effects.damage_boost = true;
    // Defender: shielded, defending, Fortified.
    state.fighters[1].passive = Passive::Fortified;
    state.fighters[1].effects.shield_active = true;

    // Base 21 -> combo floor(21*0.7)=14 -> charge floor(14*1.5)=21 ->
    // boost 31 -> crit x2 = 62 -> unpredictable +10 = 72; then shield 36,
    // defend 18, fortified floor(18*0.9)=16.
    let rng = ScriptRng::new(&[21], &[true, true]);
    let mut engine = BattleEngine::new(rng);

    let (next, result) = engine.apply_round(&state, act(ActionKind::Attack), act(ActionKind::Defend));

    assert_eq!(result.a.damage_dealt, 16);
    assert!(result.a.is_crit);
    assert_eq!(next.fighters[1].hp, 84);
    // Counter from the defending target.
    assert_eq!(result.a.counter_damage, 8);
    assert_eq!(next.fighters[0].hp, 92);
    // All one-shot flags were consumed.
    assert!(!next.fighters[0].charge_active);
    assert!(!next.fighters[0].effects.damage_boost);
    assert!(!next.fighters[1].effects.shield_active);
}

#[test]
fn evasion_dodge_negates_the_hit_but_still_spends_offense_flags() {
    let mut state = duel(Position::new(4, 5), Position::new(5, 5));
    state.fighters[0].charge_active = true;
    state.fighters[0].effects.damage_boost = true;
    state.fighters[1].passive = Passive::Evasion;

    // One base roll; crit misses, then the dodge gate fires.
    let rng = ScriptRng::new(&[20], &[false, true]);
    let mut engine = BattleEngine::new(rng);

    let (next, result) = engine.apply_round(&state, act(ActionKind::Attack), act(ActionKind::Defend));

    assert!(result.a.dodged);
    assert_eq!(result.a.damage_dealt, 0);
    assert_eq!(next.fighters[1].hp, 100);
    // No contact: no counter from the defend stance, no knockback.
    assert_eq!(result.a.counter_damage, 0);
    assert!(!result.a.knockback);
    assert_eq!(next.fighters[1].position, Position::new(5, 5));
    // The swing was still an attempt: charge and boost are gone.
    assert!(!next.fighters[0].charge_active);
    assert!(!next.fighters[0].effects.damage_boost);
}

#[test]
fn berserker_crits_triple_instead_of_double() {
    let mut state = duel(Position::new(4, 5), Position::new(5, 5));
    state.fighters[0].passive = Passive::Berserker;

    // Base 20, crit fires: 20 x3 = 60 against an unguarded target.
    let rng = ScriptRng::new(&[20], &[true]);
    let mut engine = BattleEngine::new(rng);

    let (next, result) = engine.apply_round(&state, act(ActionKind::Attack), act(ActionKind::Charge));

    assert!(result.a.is_crit);
    assert_eq!(result.a.damage_dealt, 60);
    assert_eq!(next.fighters[1].hp, 40);
}

#[test]
fn heal_uses_cap_at_two_and_fail_harmlessly_after() {
    let mut state = duel(Position::new(2, 5), Position::new(7, 5));
    state.fighters[0].hp = 50;
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (state, _) = engine.apply_round(&state, act(ActionKind::Heal), act(ActionKind::Defend));
    assert_eq!(state.fighters[0].hp, 65);
    assert_eq!(state.fighters[0].heal_uses, 1);

    let (state, _) = engine.apply_round(&state, act(ActionKind::Heal), act(ActionKind::Defend));
    assert_eq!(state.fighters[0].hp, 80);
    assert_eq!(state.fighters[0].heal_uses, 0);

    let (state, result) = engine.apply_round(&state, act(ActionKind::Heal), act(ActionKind::Defend));
    assert_eq!(state.fighters[0].hp, 80);
    assert_eq!(state.fighters[0].heal_uses, 0);
    assert!(result.a.narration.contains("none left"));
}

#[test]
fn knockback_into_wall_slams_without_moving() {
    let mut state = duel(Position::new(4, 5), Position::new(5, 5));
    state.terrain.set(Position::new(6, 5), TileType::Wall);
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, result) = engine.apply_round(&state, act(ActionKind::Attack), act(ActionKind::Charge));

    assert_eq!(next.fighters[1].position, Position::new(5, 5));
    assert_eq!(next.fighters[1].hp, 100 - 20 - 5);
    assert!(!result.a.knockback);
    assert!(result.a.narration.contains("slams"));
}

#[test]
fn knockback_into_lava_moves_and_burns() {
    let mut state = duel(Position::new(4, 5), Position::new(5, 5));
    state.terrain.set(Position::new(6, 5), TileType::Lava);
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, result) = engine.apply_round(&state, act(ActionKind::Attack), act(ActionKind::Charge));

    assert_eq!(next.fighters[1].position, Position::new(6, 5));
    assert_eq!(next.fighters[1].hp, 100 - 20 - 10);
    assert!(result.a.knockback);
}

#[test]
fn moving_onto_a_power_up_consumes_it() {
    let mut state = duel(Position::new(2, 5), Position::new(7, 5));
    state.power_ups.push(PowerUp {
        position: Position::new(3, 5),
        kind: PowerUpKind::Damage,
    });
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, _) = engine.apply_round(
        &state,
        act(ActionKind::Move {
            direction: Direction::East,
        }),
        act(ActionKind::Defend),
    );

    assert!(next.power_ups.is_empty());
    assert!(next.fighters[0].effects.damage_boost);
}

#[test]
fn heal_power_up_restores_capped_at_max() {
    let mut state = duel(Position::new(2, 5), Position::new(7, 5));
    state.fighters[0].hp = 90;
    state.power_ups.push(PowerUp {
        position: Position::new(3, 5),
        kind: PowerUpKind::Heal,
    });
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, _) = engine.apply_round(
        &state,
        act(ActionKind::Move {
            direction: Direction::East,
        }),
        act(ActionKind::Defend),
    );

    assert_eq!(next.fighters[0].hp, 100);
}

#[test]
fn shrink_floods_outer_ring_and_burns_stragglers() {
    let mut state = duel(Position::new(0, 0), Position::new(7, 5));
    state.round = 10;
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, _) = engine.apply_round(&state, act(ActionKind::Defend), act(ActionKind::Defend));

    assert_eq!(next.shrink_level, 1);
    assert!(next.terrain.is_lava(Position::new(0, 0)));
    assert_eq!(next.fighters[0].hp, 90);
    // Inner tiles untouched.
    assert_eq!(next.terrain.tile(Position::new(4, 4)), TileType::Empty);
}

#[test]
fn speed_passive_doubles_move_distance() {
    let mut state = duel(Position::new(2, 5), Position::new(7, 5));
    state.fighters[0].passive = Passive::Speed;
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });

    let (next, _) = engine.apply_round(
        &state,
        act(ActionKind::Move {
            direction: Direction::East,
        }),
        act(ActionKind::Defend),
    );

    assert_eq!(next.fighters[0].position, Position::new(4, 5));
}

#[test]
fn combo_decay_applies_on_third_repeat() {
    let state = duel(Position::new(4, 5), Position::new(5, 5));
    let mut engine = BattleEngine::new(NoLuckRng { roll: 20 });
    let mut state = state;

    // Pin both fighters in place: B defends (10 dmg halved per hit, plus
    // counters), A attacks three times. Knockback shoves B east each round,
    // so re-adjacency matters; keep B against a wall instead.
    state.terrain.set(Position::new(6, 5), TileType::Wall);

    let mut damages = Vec::new();
    for _ in 0..3 {
        let (next, result) =
            engine.apply_round(&state, act(ActionKind::Attack), act(ActionKind::Defend));
        damages.push(result.a.damage_dealt);
        state = next;
    }

    // Rounds 1-2: floor(20/2) = 10. Round 3: combo decay first,
    // floor(20*0.7) = 14, then halved to 7.
    assert_eq!(damages, vec![10, 10, 7]);
}

#[test]
fn invariants_hold_across_random_battles() {
    for seed in 0..10u64 {
        let mut chooser = PcgRng::seeded(seed.wrapping_mul(977));
        let mut engine = BattleEngine::new(PcgRng::seeded(seed));
        let mut state = engine.create_battle(
            FighterSpec::new("gpt-4o", "Alpha"),
            FighterSpec::new("llama-3", "Bravo"),
            &PassiveRegistry::builtin(),
        );

        let mut heal_uses = [
            state.fighters[0].heal_uses,
            state.fighters[1].heal_uses,
        ];
        let mut rounds = 0;
        while !state.is_terminal() && rounds < 40 {
            let (next, _) = engine.apply_round(
                &state,
                random_action(&mut chooser),
                random_action(&mut chooser),
            );
            state = next;
            rounds += 1;

            for (i, fighter) in state.fighters.iter().enumerate() {
                assert!(fighter.hp <= fighter.max_hp);
                assert!(fighter.position.in_bounds(), "seed {seed}: out of bounds");
                assert!(fighter.special_cooldown <= 3);
                assert!(fighter.dash_cooldown <= 3);
                assert!(fighter.heal_uses <= heal_uses[i], "heal uses replenished");
                heal_uses[i] = fighter.heal_uses;
            }
        }
        // The round counter caps the battle even if nobody dies.
        assert!(rounds <= 25 || state.is_terminal());
    }
}

fn random_action(rng: &mut PcgRng) -> Action {
    let direction = Direction::ALL[rng.range(0, 3) as usize];
    match rng.range(0, 6) {
        0 => Action::new(ActionKind::Move { direction }),
        1 => Action::new(ActionKind::Dash { direction }),
        2 => Action::new(ActionKind::Attack),
        3 => Action::new(ActionKind::Special),
        4 => Action::new(ActionKind::Defend),
        5 => Action::new(ActionKind::Heal),
        _ => Action::new(ActionKind::Charge),
    }
}

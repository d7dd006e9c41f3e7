//! Battle tuning constants.
//!
//! Every numeric rule the engine enforces lives here so the combat math in
//! [`crate::engine`] reads against named values instead of magic numbers.
//! Multiplicative factors are expressed as integer numerator/denominator
//! pairs: the engine floors after every multiplicative step, and integer
//! division reproduces that exactly.

// ===== arena geometry =====

/// Arena width and height in tiles.
pub const GRID_SIZE: usize = 10;

/// Fixed starting position for fighter A.
pub const START_POSITION_A: (i32, i32) = (2, 5);

/// Fixed starting position for fighter B.
pub const START_POSITION_B: (i32, i32) = (7, 5);

/// Spawn safe zone columns (inclusive) for fighters A and B. Terrain
/// generation never places walls or lava inside a safe zone.
pub const SPAWN_SAFE_X: [(i32, i32); 2] = [(1, 3), (6, 8)];

/// Spawn safe zone rows (inclusive), shared by both fighters.
pub const SPAWN_SAFE_Z: (i32, i32) = (4, 6);

// ===== terrain generation =====

/// Wall count range (inclusive) rolled at battle start.
pub const WALL_COUNT_MIN: u32 = 5;
pub const WALL_COUNT_MAX: u32 = 8;

/// Lava count range (inclusive) rolled at battle start.
pub const LAVA_COUNT_MIN: u32 = 2;
pub const LAVA_COUNT_MAX: u32 = 3;

// ===== fighters =====

/// Maximum (and starting) hit points.
pub const MAX_HP: u32 = 100;

/// Heal charges a fighter starts with. Never replenished.
pub const STARTING_HEAL_USES: u8 = 2;

/// Hit points restored by the `heal` action (capped at max hp).
pub const HEAL_AMOUNT: u32 = 15;

/// Hit points restored each round by the Regeneration passive.
pub const REGEN_AMOUNT: u32 = 3;

/// Rolling action history kept per fighter for narration and analysis.
pub const ACTION_HISTORY_LEN: usize = 3;

// ===== movement =====

/// Tiles covered by a dash.
pub const DASH_DISTANCE: u32 = 2;

/// Rounds before dash can be used again.
pub const DASH_COOLDOWN: u8 = 3;

/// Extra movement granted by the Speed passive (move covers 2 tiles).
pub const SPEED_MOVE_STEPS: u32 = 2;

// ===== combat =====

/// Melee attack reach in tiles (Chebyshev distance).
pub const ATTACK_RANGE: u32 = 1;

/// Special attack reach in tiles (Chebyshev distance, requires line of sight).
pub const SPECIAL_RANGE: u32 = 3;

/// Rounds before special can be used again.
pub const SPECIAL_COOLDOWN: u8 = 3;

/// Melee base damage range (inclusive).
pub const ATTACK_DAMAGE_MIN: u32 = 15;
pub const ATTACK_DAMAGE_MAX: u32 = 25;

/// Special base damage range (inclusive).
pub const SPECIAL_DAMAGE_MIN: u32 = 10;
pub const SPECIAL_DAMAGE_MAX: u32 = 20;

/// Critical hit chance in percent.
pub const CRIT_CHANCE: u32 = 15;

/// Critical hit damage multiplier.
pub const CRIT_MULTIPLIER: u32 = 2;

/// Critical hit multiplier with the Berserker passive.
pub const BERSERKER_CRIT_MULTIPLIER: u32 = 3;

/// Evasion passive dodge chance in percent.
pub const DODGE_CHANCE: u32 = 15;

/// Unpredictable passive bonus chance in percent, rolled independently of
/// the crit roll.
pub const UNPREDICTABLE_CHANCE: u32 = 20;

/// Flat bonus added when the Unpredictable roll lands.
pub const UNPREDICTABLE_BONUS: u32 = 10;

/// Charge stance multiplier for the next attack or special (3/2 = 1.5x).
pub const CHARGE_NUMERATOR: u32 = 3;
pub const CHARGE_DENOMINATOR: u32 = 2;

/// Combo decay multiplier once an action type is repeated to the threshold
/// (7/10 = 0.7x).
pub const COMBO_DECAY_NUMERATOR: u32 = 7;
pub const COMBO_DECAY_DENOMINATOR: u32 = 10;

/// Consecutive repeats of one action type before combo decay kicks in.
pub const COMBO_DECAY_THRESHOLD: u32 = 3;

/// Damage reduction kept by the Fortified passive (9/10 = 10% off).
pub const FORTIFIED_NUMERATOR: u32 = 9;
pub const FORTIFIED_DENOMINATOR: u32 = 10;

/// Flat damage returned by a defending fighter that absorbs a melee hit.
pub const COUNTER_DAMAGE: u32 = 8;

/// Flat bonus granted by the damage power-up, consumed on the next attempt.
pub const DAMAGE_BOOST_BONUS: u32 = 10;

/// Damage taken when knocked into a wall or the arena edge.
pub const WALL_KNOCKBACK_DAMAGE: u32 = 5;

/// Damage taken when standing in or thrown into lava.
pub const LAVA_DAMAGE: u32 = 10;

// ===== round bookkeeping =====

/// Rounds before the battle is decided on remaining hit points.
pub const MAX_ROUNDS: u32 = 25;

/// Rounds between arena shrink steps.
pub const SHRINK_INTERVAL: u32 = 10;

/// Deepest ring the arena ever shrinks to.
pub const MAX_SHRINK_LEVEL: u8 = 4;

/// Rounds between power-up spawn attempts.
pub const POWERUP_SPAWN_INTERVAL: u32 = 4;

/// Random cell draws before a spawn window is abandoned.
pub const POWERUP_SPAWN_ATTEMPTS: u32 = 30;

/// Hit points granted by the heal power-up (capped at max hp).
pub const POWERUP_HEAL_AMOUNT: u32 = 25;

// ===== decision briefing =====

/// Chebyshev radius of terrain reported around a fighter in its briefing.
pub const BRIEFING_TERRAIN_RADIUS: u32 = 2;

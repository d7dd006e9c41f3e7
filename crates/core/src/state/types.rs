use std::fmt;

use crate::config;

/// Label for one of the two fighters in a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FighterId {
    A,
    B,
}

impl FighterId {
    pub const BOTH: [FighterId; 2] = [FighterId::A, FighterId::B];

    /// Index into the fighter pair array.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            FighterId::A => 0,
            FighterId::B => 1,
        }
    }

    /// The other fighter's label.
    #[inline]
    pub const fn opponent(self) -> FighterId {
        match self {
            FighterId::A => FighterId::B,
            FighterId::B => FighterId::A,
        }
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FighterId::A => write!(f, "A"),
            FighterId::B => write!(f, "B"),
        }
    }
}

/// Discrete arena position in tile coordinates.
///
/// `x` runs west to east, `z` runs north to south (row 0 is the north edge).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The adjacent position one tile in `direction`. May be out of bounds;
    /// callers check with [`Position::in_bounds`].
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dz) = direction.delta();
        Self::new(self.x + dx, self.z + dz)
    }

    /// Chebyshev (king-move) distance to `other`.
    pub fn chebyshev(self, other: Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        dx.max(dz)
    }

    /// True if the position lies inside the arena grid.
    pub fn in_bounds(self) -> bool {
        let size = config::GRID_SIZE as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Cardinal movement direction on the arena grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Tile delta as `(dx, dz)`. North decreases `z`.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// Static terrain of a single arena tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TileType {
    #[default]
    Empty,
    /// Impassable, blocks movement, line of sight, and knockback.
    Wall,
    /// Passable hazard; entering or standing on it burns.
    Lava,
}

/// Kind of a pickup on the arena floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PowerUpKind {
    /// Restores hit points on pickup.
    Heal,
    /// Arms a flat damage bonus for the next attack or special.
    Damage,
    /// Arms a shield that halves the next incoming hit.
    Shield,
}

/// A transient pickup; created by the spawner, destroyed on pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerUp {
    pub position: Position,
    pub kind: PowerUpKind,
}

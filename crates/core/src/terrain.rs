//! Arena terrain: generation, shrink escalation, and line of sight.
//!
//! The grid is generated once per battle and mutated only by the shrink
//! process, which converts outer rings to lava. Walls placed at generation
//! are permanent and are never converted.

use crate::config;
use crate::rng::RngOracle;
use crate::state::{Position, TileType};

/// Fixed 10x10 tile grid, indexed `[z][x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terrain {
    tiles: [[TileType; config::GRID_SIZE]; config::GRID_SIZE],
}

impl Terrain {
    /// All-empty grid, used by tests that need hand-built layouts.
    pub fn empty() -> Self {
        Self {
            tiles: [[TileType::Empty; config::GRID_SIZE]; config::GRID_SIZE],
        }
    }

    /// Generate a fresh battle arena: 5-8 walls, then 2-3 lava cells, on
    /// uniformly random cells outside the spawn safe zones. Placement
    /// retries until the rolled counts are satisfied; the grid is large
    /// enough relative to the counts that this always terminates.
    pub fn generate<R: RngOracle + ?Sized>(rng: &mut R) -> Self {
        let mut terrain = Self::empty();
        let walls = rng.range(config::WALL_COUNT_MIN, config::WALL_COUNT_MAX);
        terrain.scatter(rng, TileType::Wall, walls);
        let lava = rng.range(config::LAVA_COUNT_MIN, config::LAVA_COUNT_MAX);
        terrain.scatter(rng, TileType::Lava, lava);
        terrain
    }

    fn scatter<R: RngOracle + ?Sized>(&mut self, rng: &mut R, tile: TileType, count: u32) {
        let max = (config::GRID_SIZE - 1) as u32;
        let mut placed = 0;
        while placed < count {
            let position = Position::new(rng.range(0, max) as i32, rng.range(0, max) as i32);
            if Self::in_spawn_safe_zone(position) || self.tile(position) != TileType::Empty {
                continue;
            }
            self.set(position, tile);
            placed += 1;
        }
    }

    /// True inside either fighter's rectangular spawn protection area.
    pub fn in_spawn_safe_zone(position: Position) -> bool {
        let (z_min, z_max) = config::SPAWN_SAFE_Z;
        if !(z_min..=z_max).contains(&position.z) {
            return false;
        }
        config::SPAWN_SAFE_X
            .iter()
            .any(|(x_min, x_max)| (*x_min..=*x_max).contains(&position.x))
    }

    /// Tile at `position`. Out-of-bounds reads as a wall, which makes the
    /// arena edge uniformly impassable for movement and knockback.
    pub fn tile(&self, position: Position) -> TileType {
        if !position.in_bounds() {
            return TileType::Wall;
        }
        self.tiles[position.z as usize][position.x as usize]
    }

    /// Overwrite the tile at an in-bounds `position`.
    pub fn set(&mut self, position: Position, tile: TileType) {
        debug_assert!(position.in_bounds());
        self.tiles[position.z as usize][position.x as usize] = tile;
    }

    #[inline]
    pub fn is_wall(&self, position: Position) -> bool {
        self.tile(position) == TileType::Wall
    }

    #[inline]
    pub fn is_lava(&self, position: Position) -> bool {
        self.tile(position) == TileType::Lava
    }

    /// Convert the outermost `level` rings to lava, sparing walls.
    pub fn shrink_to(&mut self, level: u8) {
        let size = config::GRID_SIZE as i32;
        for z in 0..size {
            for x in 0..size {
                let ring = x.min(z).min(size - 1 - x).min(size - 1 - z);
                if ring < level as i32 {
                    let position = Position::new(x, z);
                    if !self.is_wall(position) {
                        self.set(position, TileType::Lava);
                    }
                }
            }
        }
    }

    /// Line-of-sight check for ranged attacks: walk tile by tile from
    /// `from` to `to`, first along x then along z. Any wall on an
    /// intermediate tile blocks the shot; the endpoints themselves do not.
    pub fn line_of_sight(&self, from: Position, to: Position) -> bool {
        let mut cursor = from;
        while cursor.x != to.x {
            cursor.x += (to.x - cursor.x).signum();
            if cursor == to {
                return true;
            }
            if self.is_wall(cursor) {
                return false;
            }
        }
        while cursor.z != to.z {
            cursor.z += (to.z - cursor.z).signum();
            if cursor == to {
                return true;
            }
            if self.is_wall(cursor) {
                return false;
            }
        }
        true
    }

    /// Iterate all tiles with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (Position, TileType)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(z, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, tile)| (Position::new(x as i32, z as i32), *tile))
        })
    }
}

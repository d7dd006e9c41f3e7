//! Deterministic battle simulation for two-fighter arena duels.
//!
//! `arena-core` defines the canonical rules (actions, engine, battle state)
//! and exposes pure APIs reused by the runtime and offline tools. All state
//! mutation flows through [`engine::BattleEngine`]; randomness enters only
//! through the injected [`rng::RngOracle`], so every battle is replayable
//! from its seed and action log.

pub mod action;
pub mod config;
pub mod engine;
pub mod passives;
pub mod result;
pub mod rng;
pub mod state;
pub mod terrain;
pub mod view;

pub use action::{Action, ActionKind, ActionTag};
pub use engine::BattleEngine;
pub use passives::{Passive, PassiveRegistry};
pub use result::{RoundResult, TurnResult};
pub use rng::{PcgRng, RngOracle, mix_seed};
pub use state::{
    Direction, Fighter, FighterId, FighterSpec, GameState, Position, PowerUp, PowerUpEffects,
    PowerUpKind, TileType, Winner,
};
pub use terrain::Terrain;
pub use view::compose_briefing;

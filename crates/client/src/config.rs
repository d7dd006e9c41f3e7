//! Client configuration loaded from the process environment.

use std::env;
use std::str::FromStr;

/// Settings for one battle run.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// Seed for the battle RNG stream. Randomized when unset, so reruns
    /// with an explicit seed replay the exact battle.
    pub seed: u64,
    pub model_a: String,
    pub model_b: String,
    pub name_a: String,
    pub name_b: String,
}

impl ArenaConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_SEED` - Battle seed (default: random)
    /// - `ARENA_MODEL_A` / `ARENA_MODEL_B` - Model identifiers, also used
    ///   for passive resolution
    /// - `ARENA_NAME_A` / `ARENA_NAME_B` - Display names (default: the
    ///   model identifier)
    pub fn from_env() -> Self {
        let model_a = read_env::<String>("ARENA_MODEL_A").unwrap_or_else(|| "gpt-4o".to_string());
        let model_b =
            read_env::<String>("ARENA_MODEL_B").unwrap_or_else(|| "claude-sonnet".to_string());
        Self {
            seed: read_env("ARENA_SEED").unwrap_or_else(rand::random),
            name_a: read_env("ARENA_NAME_A").unwrap_or_else(|| model_a.clone()),
            name_b: read_env("ARENA_NAME_B").unwrap_or_else(|| model_b.clone()),
            model_a,
            model_b,
        }
    }
}

/// Read and parse one environment variable, `None` when unset or unparsable.
fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.trim().parse().ok()
}

//! Arena battle client binary.
//!
//! Composition root: loads configuration from the environment, builds the
//! engine and a pair of decision providers, and drives one battle to its
//! verdict while printing the round-by-round narration.
//!
//! ```bash
//! ARENA_SEED=7 ARENA_MODEL_A=gpt-4o ARENA_MODEL_B=claude-sonnet cargo run -p arena-client
//! ```

mod config;

use anyhow::Result;

use arena_core::{BattleEngine, FighterSpec, PassiveRegistry, PcgRng, Winner, mix_seed};
use arena_runtime::{BattleSession, RandomProvider};

use crate::config::ArenaConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let config = ArenaConfig::from_env();
    tracing::info!(seed = config.seed, "starting arena battle");

    let mut engine = BattleEngine::new(PcgRng::seeded(config.seed));
    let registry = PassiveRegistry::builtin();
    let state = engine.create_battle(
        FighterSpec::new(&config.model_a, &config.name_a),
        FighterSpec::new(&config.model_b, &config.name_b),
        &registry,
    );

    println!(
        "{} ({}) vs {} ({}), seed {}",
        config.name_a, config.model_a, config.name_b, config.model_b, config.seed
    );
    for fighter in &state.fighters {
        println!(
            "  {} starts at {} with passive {}",
            fighter.name,
            fighter.position,
            fighter.passive.name()
        );
    }
    println!();

    // Derived provider seeds keep the whole run replayable from one seed.
    let mut session = BattleSession::new(
        engine,
        state,
        Box::new(RandomProvider::seeded(mix_seed(config.seed ^ 0xA))),
        Box::new(RandomProvider::seeded(mix_seed(config.seed ^ 0xB))),
    );

    while !session.state().is_terminal() {
        let result = session.step().await?;
        println!("{}", result.summary);
    }

    let state = session.state();
    println!();
    match state.winner {
        Some(Winner::A) => println!("Winner: {}", state.fighters[0].name),
        Some(Winner::B) => println!("Winner: {}", state.fighters[1].name),
        Some(Winner::Draw) => println!("The battle ends in a draw."),
        None => {}
    }
    Ok(())
}

//! Asynchronous abstraction for sourcing fighter decisions.
//!
//! Session users plug in [`DecisionProvider`] implementations so a battle
//! can run against an LLM endpoint, a scripted fixture, or a random policy.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use arena_core::{Action, ActionKind, Direction, FighterId, GameState};

use crate::error::Result;

/// Trait for choosing one fighter's action each round.
///
/// The `briefing` is the rendered text view of everything this fighter is
/// allowed to observe; `state` is the full authoritative snapshot for
/// implementations that want structured access instead.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    async fn decide(
        &self,
        fighter: FighterId,
        briefing: &str,
        state: &GameState,
    ) -> Result<Action>;
}

/// Replays a fixed action sequence, then attacks forever.
///
/// Testing fixture: deterministic and independent of the briefing text.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Action>>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: Mutex::new(actions.into_iter().collect()),
        }
    }
}

#[async_trait]
impl DecisionProvider for ScriptedProvider {
    async fn decide(
        &self,
        _fighter: FighterId,
        _briefing: &str,
        _state: &GameState,
    ) -> Result<Action> {
        let next = self
            .script
            .lock()
            .map(|mut script| script.pop_front())
            .unwrap_or(None);
        Ok(next.unwrap_or_else(|| Action::new(ActionKind::Attack)))
    }
}

/// Picks a uniformly random action each round from its own seeded stream.
///
/// Useful as a baseline opponent and for soak-testing the engine.
pub struct RandomProvider {
    rng: Mutex<StdRng>,
}

impl RandomProvider {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn pick(&self) -> Action {
        let Ok(mut rng) = self.rng.lock() else {
            return Action::new(ActionKind::Attack);
        };
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let kind = match rng.gen_range(0..7) {
            0 => ActionKind::Move { direction },
            1 => ActionKind::Dash { direction },
            2 => ActionKind::Attack,
            3 => ActionKind::Special,
            4 => ActionKind::Defend,
            5 => ActionKind::Heal,
            _ => ActionKind::Charge,
        };
        Action::new(kind)
    }
}

#[async_trait]
impl DecisionProvider for RandomProvider {
    async fn decide(
        &self,
        _fighter: FighterId,
        _briefing: &str,
        _state: &GameState,
    ) -> Result<Action> {
        Ok(self.pick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_provider_replays_then_attacks() {
        let provider = ScriptedProvider::new([
            Action::new(ActionKind::Defend),
            Action::new(ActionKind::Charge),
        ]);
        let state = crate::session::tests::fresh_state();

        let first = provider.decide(FighterId::A, "", &state).await.unwrap();
        let second = provider.decide(FighterId::A, "", &state).await.unwrap();
        let third = provider.decide(FighterId::A, "", &state).await.unwrap();

        assert_eq!(first.kind, ActionKind::Defend);
        assert_eq!(second.kind, ActionKind::Charge);
        assert_eq!(third.kind, ActionKind::Attack);
    }

    #[tokio::test]
    async fn random_provider_is_reproducible_per_seed() {
        let state = crate::session::tests::fresh_state();
        let a = RandomProvider::seeded(11);
        let b = RandomProvider::seeded(11);
        for _ in 0..20 {
            let lhs = a.decide(FighterId::A, "", &state).await.unwrap();
            let rhs = b.decide(FighterId::A, "", &state).await.unwrap();
            assert_eq!(lhs.kind, rhs.kind);
        }
    }
}

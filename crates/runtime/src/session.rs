//! Battle orchestration over async decision providers.
//!
//! [`BattleSession`] owns the engine and the authoritative state, gathers
//! both fighters' decisions concurrently each round, and publishes
//! [`BattleEvent`]s for front-ends to observe without blocking the loop.

use tokio::sync::broadcast;

use arena_core::{
    Action, ActionKind, BattleEngine, FighterId, GameState, RngOracle, RoundResult, Winner,
    compose_briefing,
};

use crate::error::{Result, RuntimeError};
use crate::provider::DecisionProvider;

const EVENT_BUFFER_SIZE: usize = 64;

/// Events emitted as a battle progresses.
#[derive(Debug, Clone)]
pub enum BattleEvent {
    /// A round was resolved; `state` is the snapshot after it.
    RoundResolved {
        result: RoundResult,
        state: Box<GameState>,
    },
    /// The battle reached a verdict.
    BattleEnded { winner: Winner, rounds: u32 },
}

/// Final outcome of a completed battle.
#[derive(Debug, Clone)]
pub struct BattleReport {
    pub winner: Winner,
    pub rounds: u32,
    pub state: GameState,
}

/// Drives one battle to completion, one simultaneous round at a time.
pub struct BattleSession<R: RngOracle> {
    engine: BattleEngine<R>,
    state: GameState,
    providers: [Box<dyn DecisionProvider>; 2],
    events: broadcast::Sender<BattleEvent>,
}

impl<R: RngOracle> BattleSession<R> {
    pub fn new(
        engine: BattleEngine<R>,
        state: GameState,
        provider_a: Box<dyn DecisionProvider>,
        provider_b: Box<dyn DecisionProvider>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self {
            engine,
            state,
            providers: [provider_a, provider_b],
            events,
        }
    }

    /// Subscribe to battle events. Slow subscribers may observe lag; the
    /// session never waits for them.
    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.events.subscribe()
    }

    /// The current authoritative state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Gather both decisions concurrently and resolve one round.
    pub async fn step(&mut self) -> Result<RoundResult> {
        if self.state.is_terminal() {
            return Err(RuntimeError::BattleFinished);
        }

        let briefing_a = compose_briefing(&self.state, FighterId::A);
        let briefing_b = compose_briefing(&self.state, FighterId::B);
        let (decision_a, decision_b) = tokio::join!(
            self.providers[0].decide(FighterId::A, &briefing_a, &self.state),
            self.providers[1].decide(FighterId::B, &briefing_b, &self.state),
        );
        let action_a = recover(FighterId::A, decision_a);
        let action_b = recover(FighterId::B, decision_b);

        let (next, result) = self.engine.apply_round(&self.state, action_a, action_b);
        self.state = next;

        tracing::info!(round = result.round, "{}", result.summary);
        let _ = self.events.send(BattleEvent::RoundResolved {
            result: result.clone(),
            state: Box::new(self.state.clone()),
        });
        if let Some(winner) = self.state.winner {
            tracing::info!(?winner, rounds = result.round, "battle finished");
            let _ = self.events.send(BattleEvent::BattleEnded {
                winner,
                rounds: result.round,
            });
        }
        Ok(result)
    }

    /// Run rounds until the battle reaches a verdict.
    pub async fn run(&mut self) -> Result<BattleReport> {
        loop {
            match self.state.winner {
                Some(winner) => {
                    return Ok(BattleReport {
                        winner,
                        rounds: self.state.round.saturating_sub(1),
                        state: self.state.clone(),
                    });
                }
                None => {
                    self.step().await?;
                }
            }
        }
    }
}

/// A provider failure never stalls the battle: log it and fall back to the
/// safe default action.
fn recover(fighter: FighterId, decision: Result<Action>) -> Action {
    match decision {
        Ok(action) => action,
        Err(error) => {
            tracing::warn!(%fighter, %error, "decision provider failed, defaulting to attack");
            Action::new(ActionKind::Attack)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::provider::ScriptedProvider;
    use arena_core::{FighterSpec, PassiveRegistry, PcgRng};

    pub(crate) fn fresh_state() -> GameState {
        let mut rng = PcgRng::seeded(7);
        GameState::new(
            FighterSpec::new("gpt-4o", "Alpha"),
            FighterSpec::new("claude-sonnet", "Bravo"),
            &PassiveRegistry::builtin(),
            &mut rng,
        )
    }

    fn scripted_session(seed: u64) -> BattleSession<PcgRng> {
        let mut engine = BattleEngine::new(PcgRng::seeded(seed));
        let state = engine.create_battle(
            FighterSpec::new("gpt-4o", "Alpha"),
            FighterSpec::new("claude-sonnet", "Bravo"),
            &PassiveRegistry::builtin(),
        );
        BattleSession::new(
            engine,
            state,
            Box::new(ScriptedProvider::new([])),
            Box::new(ScriptedProvider::new([])),
        )
    }

    #[tokio::test]
    async fn battle_runs_to_a_verdict() {
        let mut session = scripted_session(3);
        let report = session.run().await.unwrap();
        assert!(report.rounds >= 1 && report.rounds <= 25);
        assert_eq!(session.state().winner, Some(report.winner));
    }

    #[tokio::test]
    async fn step_after_the_verdict_is_an_error() {
        let mut session = scripted_session(3);
        session.run().await.unwrap();
        let err = session.step().await.unwrap_err();
        assert!(matches!(err, RuntimeError::BattleFinished));
    }

    #[tokio::test]
    async fn same_seed_same_transcript() {
        let mut first = scripted_session(42);
        let mut second = scripted_session(42);
        let a = first.run().await.unwrap();
        let b = second.run().await.unwrap();
        assert_eq!(a.winner, b.winner);
        assert_eq!(a.rounds, b.rounds);
        assert_eq!(first.state(), second.state());
    }

    #[tokio::test]
    async fn events_mirror_the_round_log() {
        let mut session = scripted_session(9);
        let mut events = session.subscribe();
        let report = session.run().await.unwrap();

        let mut resolved = 0;
        let mut ended = 0;
        while let Ok(event) = events.try_recv() {
            match event {
                BattleEvent::RoundResolved { result, .. } => {
                    resolved += 1;
                    assert_eq!(result.round, resolved);
                }
                BattleEvent::BattleEnded { winner, rounds } => {
                    ended += 1;
                    assert_eq!(winner, report.winner);
                    assert_eq!(rounds, report.rounds);
                }
            }
        }
        assert_eq!(resolved, report.rounds);
        assert_eq!(ended, 1);
    }

    struct FailingProvider;

    #[async_trait::async_trait]
    impl DecisionProvider for FailingProvider {
        async fn decide(
            &self,
            fighter: FighterId,
            _briefing: &str,
            _state: &GameState,
        ) -> Result<Action> {
            Err(RuntimeError::provider(
                fighter,
                std::io::Error::new(std::io::ErrorKind::TimedOut, "model endpoint timed out"),
            ))
        }
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_attack() {
        let mut engine = BattleEngine::new(PcgRng::seeded(5));
        let state = engine.create_battle(
            FighterSpec::new("gpt-4o", "Alpha"),
            FighterSpec::new("claude-sonnet", "Bravo"),
            &PassiveRegistry::builtin(),
        );
        let mut session = BattleSession::new(
            engine,
            state,
            Box::new(FailingProvider),
            Box::new(ScriptedProvider::new([])),
        );

        let report = session.run().await.unwrap();
        assert!(report.rounds >= 1);
        for round in &report.state.log {
            assert_eq!(round.a.tag, arena_core::ActionTag::Attack);
        }
    }

    #[tokio::test]
    async fn state_survives_a_serde_round_trip() {
        let state = fresh_state();
        let encoded = serde_json::to_string(&state).unwrap();
        let decoded: GameState = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, state);
    }
}

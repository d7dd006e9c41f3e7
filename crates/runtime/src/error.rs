//! Unified error types surfaced by the runtime API.

use arena_core::FighterId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("decision provider for fighter {fighter} failed")]
    Provider {
        fighter: FighterId,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("round applied to a finished battle")]
    BattleFinished,
}

impl RuntimeError {
    /// Wrap an arbitrary provider failure with the fighter it belongs to.
    pub fn provider(
        fighter: FighterId,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            fighter,
            source: Box::new(source),
        }
    }
}

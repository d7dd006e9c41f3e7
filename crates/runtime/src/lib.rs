//! Async orchestration for arena battles.
//!
//! This crate wires the pure engine in `arena-core` to asynchronous
//! decision-makers. Consumers embed [`BattleSession`] to drive rounds,
//! subscribe to events, and collect the final [`BattleReport`].
//!
//! Modules are organized by responsibility:
//! - [`provider`] defines the decision boundary and built-in policies
//! - [`decision`] repairs untrusted model replies into actions
//! - [`session`] hosts the battle loop and event stream

pub mod decision;
pub mod error;
pub mod provider;
pub mod session;

pub use decision::repair_decision;
pub use error::{Result, RuntimeError};
pub use provider::{DecisionProvider, RandomProvider, ScriptedProvider};
pub use session::{BattleEvent, BattleReport, BattleSession};

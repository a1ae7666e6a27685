use crate::GamePhase;
use thiserror::Error;

/// Caller contract violations. User input never reaches this crate
/// unvalidated, so every variant marks a bug in the driving layer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("rules must allow at least one player and one deck")]
    InvalidRules,
    #[error("expected {expected} player names, got {got}")]
    PlayerCount { expected: usize, got: usize },
    #[error("{action} is not legal during the {phase:?} phase")]
    OutOfPhase {
        action: &'static str,
        phase: GamePhase,
    },
    #[error("player index {0} out of range")]
    UnknownPlayer(usize),
    #[error("hand index {0} out of range")]
    UnknownHand(usize),
    #[error("hand is no longer live")]
    HandNotLive,
    #[error("hand cannot be split under the current rules")]
    SplitNotAllowed,
    #[error("hand cannot be hit under the current rules")]
    HitNotAllowed,
    #[error("player hands are still live")]
    PlayersStillActing,
    #[error("dealer has not finished acting")]
    DealerStillActing,
}

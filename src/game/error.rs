use thiserror::Error;

use crate::board::BoardError;
use crate::core::{ConfigError, DiceError, PlayerId, RuleViolation};
use crate::effects::ResolveError;
use crate::events::EventBusError;
use crate::turns::TurnError;

/// Everything a game session can fail with.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("the game has already ended")]
    GameEnded,

    #[error("no players remain")]
    NoPlayers,

    #[error("a game needs a board")]
    MissingBoard,

    #[error("{0} is already in the game")]
    DuplicatePlayer(PlayerId),

    #[error("snapshot was taken on board '{expected}', not '{actual}'")]
    BoardMismatch { expected: String, actual: String },

    #[error(transparent)]
    Turn(TurnError),

    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error(transparent)]
    Events(#[from] EventBusError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ResolveError> for GameError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Rule(rule) => GameError::Rule(rule),
            ResolveError::Board(board) => GameError::Board(board),
        }
    }
}

impl From<TurnError> for GameError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::NoPlayers => GameError::NoPlayers,
            other => GameError::Turn(other),
        }
    }
}

impl GameError {
    /// The rule violation behind this error, if it is one.
    #[must_use]
    pub fn rule_violation(&self) -> Option<&RuleViolation> {
        match self {
            GameError::Rule(rule) => Some(rule),
            _ => None,
        }
    }
}

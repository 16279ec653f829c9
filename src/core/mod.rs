//! Core engine types: players, dice, RNG, configuration, rule errors.
//!
//! These have no knowledge of boards or turn order; everything else in
//! the crate builds on them.

pub mod config;
pub mod dice;
pub mod error;
pub mod player;
pub mod rng;
pub mod roster;

pub use config::{ConfigError, GameConfig, GameVariant, DEFAULT_JAIL_ROUNDS, DEFAULT_MAX_CHAIN_DEPTH};
pub use dice::{Dice, DiceError, DiceRoll, RandomDice, ScriptedDice, MAX_FACE, MIN_FACE};
pub use error::RuleViolation;
pub use player::{Figure, JailState, Player, PlayerId, UnknownFigure};
pub use rng::{GameRng, GameRngState};
pub use roster::Roster;

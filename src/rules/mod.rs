//! Variant rules.
//!
//! Games implement `Ruleset` to define:
//! - Where a roll takes a player (wrap around, or stop at the finish)
//! - When the game is over and who won
//! - Whether doubles break a player out of jail
//!
//! The turn loop calls into `Ruleset` but never checks the variant itself.

pub mod engine;

pub use engine::{for_variant, GameResult, Movement, MonopolyRules, Ruleset, SnakesAndLaddersRules};

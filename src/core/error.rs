//! Rule violations.
//!
//! These are the runtime failures a host is expected to react to
//! individually (force a sale, declare bankruptcy, log and move on),
//! so each one is a distinct variant rather than a message.

use thiserror::Error;

use super::PlayerId;

/// A game rule that could not be honored.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("{player} cannot pay {needed} (balance {available})")]
    InsufficientFunds {
        player: PlayerId,
        needed: u64,
        available: u64,
    },

    #[error("{player} is already jailed")]
    AlreadyJailed { player: PlayerId },

    #[error("{player} is not jailed")]
    NotJailed { player: PlayerId },

    #[error("effect chain starting at tile {position} exceeded {limit} re-resolution(s)")]
    ChainTooDeep { position: usize, limit: u32 },

    #[error("{0} is not part of this game")]
    UnknownPlayer(PlayerId),

    #[error("{player} is no longer in the turn rotation")]
    NotInRotation { player: PlayerId },

    #[error("{player} has not been placed on the board")]
    NotPlaced { player: PlayerId },

    #[error("tile {position} is already owned by {owner}")]
    AlreadyOwned { position: usize, owner: PlayerId },

    #[error("tile {position} is not a property")]
    NotPurchasable { position: usize },
}

//! Game events.
//!
//! Events are the only thing observers (renderers, loggers, persistence)
//! see of a turn. The set is closed; listeners subscribe by [`EventKind`],
//! the payload-free discriminant of [`GameEvent`].

use serde::{Deserialize, Serialize};

use crate::core::{DiceRoll, PlayerId};

/// Something that happened during a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player threw the dice.
    DiceRolled { player: PlayerId, roll: DiceRoll },

    /// A player's figure changed tile, by roll or by a tile effect.
    PlayerMoved {
        player: PlayerId,
        from: usize,
        to: usize,
    },

    /// A player left the turn rotation (bankruptcy, elimination).
    PlayerRemoved { player: PlayerId },

    /// A player bought the deed at `position`.
    PropertyPurchased {
        player: PlayerId,
        position: usize,
        price: u64,
    },

    /// Human-readable narration.
    DisplayText { message: String },
}

impl GameEvent {
    /// Narration event.
    pub fn text(message: impl Into<String>) -> Self {
        GameEvent::DisplayText {
            message: message.into(),
        }
    }

    /// The discriminant listeners subscribe to.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::DiceRolled { .. } => EventKind::DiceRolled,
            GameEvent::PlayerMoved { .. } => EventKind::PlayerMoved,
            GameEvent::PlayerRemoved { .. } => EventKind::PlayerRemoved,
            GameEvent::PropertyPurchased { .. } => EventKind::PropertyPurchased,
            GameEvent::DisplayText { .. } => EventKind::DisplayText,
        }
    }

    /// The player the event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::DiceRolled { player, .. }
            | GameEvent::PlayerMoved { player, .. }
            | GameEvent::PlayerRemoved { player }
            | GameEvent::PropertyPurchased { player, .. } => Some(*player),
            GameEvent::DisplayText { .. } => None,
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::DiceRolled { player, roll } => write!(f, "{player} rolled {roll}"),
            GameEvent::PlayerMoved { player, from, to } => {
                write!(f, "{player} moved from {from} to {to}")
            }
            GameEvent::PlayerRemoved { player } => write!(f, "{player} left the game"),
            GameEvent::PropertyPurchased {
                player,
                position,
                price,
            } => write!(f, "{player} bought tile {position} for {price}"),
            GameEvent::DisplayText { message } => f.write_str(message),
        }
    }
}

/// Event discriminant, used as the subscription key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    DiceRolled,
    PlayerMoved,
    PlayerRemoved,
    PropertyPurchased,
    DisplayText,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::DiceRolled,
        EventKind::PlayerMoved,
        EventKind::PlayerRemoved,
        EventKind::PropertyPurchased,
        EventKind::DisplayText,
    ];
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

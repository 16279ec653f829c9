//! Cyclic turn order.
//!
//! ## Cursor Semantics
//!
//! The manager keeps the join-ordered player ids and a cursor. The player
//! under the cursor may be *pending*: known to be next but not yet handed
//! a turn. A fresh manager is pending on its first player, and removing
//! the current player leaves the cursor pending on the survivor that
//! followed it. `next_player` hands out a pending player without moving;
//! otherwise it advances one seat, wrapping at the end.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::PlayerId;

/// Turn rotation failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("no players remain in the rotation")]
    NoPlayers,

    #[error("turn cursor {cursor} is outside a rotation of {len}")]
    CursorOutOfRange { cursor: usize, len: usize },

    #[error("{0} appears more than once in the rotation")]
    DuplicatePlayer(PlayerId),
}

/// Cyclic player order with a cursor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnManager {
    order: Vec<PlayerId>,
    cursor: usize,
    pending: bool,
}

impl Default for TurnManager {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            cursor: 0,
            pending: true,
        }
    }
}

impl TurnManager {
    /// Create a rotation in the given join order. Duplicates are dropped.
    pub fn new(players: impl IntoIterator<Item = PlayerId>) -> Self {
        let mut manager = Self::default();
        for player in players {
            manager.add_player(player);
        }
        manager
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.order.contains(&player)
    }

    /// Players in rotation order, starting from the first to join.
    #[must_use]
    pub fn players(&self) -> &[PlayerId] {
        &self.order
    }

    /// Append a player to the end of the rotation.
    ///
    /// Returns false if the player is already seated.
    pub fn add_player(&mut self, player: PlayerId) -> bool {
        if self.contains(player) {
            return false;
        }
        self.order.push(player);
        true
    }

    /// The player under the cursor.
    pub fn current_player(&self) -> Result<PlayerId, TurnError> {
        self.order.get(self.cursor).copied().ok_or(TurnError::NoPlayers)
    }

    /// The player `next_player` would return, without moving the cursor.
    pub fn peek_next(&self) -> Result<PlayerId, TurnError> {
        if self.order.is_empty() {
            return Err(TurnError::NoPlayers);
        }
        let index = if self.pending {
            self.cursor
        } else {
            (self.cursor + 1) % self.order.len()
        };
        Ok(self.order[index])
    }

    /// Hand the turn to the next player and return them.
    pub fn next_player(&mut self) -> Result<PlayerId, TurnError> {
        if self.order.is_empty() {
            return Err(TurnError::NoPlayers);
        }
        if self.pending {
            self.pending = false;
        } else {
            self.cursor = (self.cursor + 1) % self.order.len();
        }
        Ok(self.order[self.cursor])
    }

    /// Check a rotation that did not come from `new`/`add_player`, such as
    /// one read back from a save file.
    pub fn validate(&self) -> Result<(), TurnError> {
        let len = self.order.len();
        if self.cursor >= len && !(len == 0 && self.cursor == 0) {
            return Err(TurnError::CursorOutOfRange {
                cursor: self.cursor,
                len,
            });
        }
        for (index, player) in self.order.iter().enumerate() {
            if self.order[..index].contains(player) {
                return Err(TurnError::DuplicatePlayer(*player));
            }
        }
        Ok(())
    }

    /// Take a player out of the rotation.
    ///
    /// Relative order of the others is unchanged. Removing the current
    /// player leaves the cursor pending on the one who followed them.
    /// Returns false (and changes nothing) if the player was not seated.
    pub fn remove_player(&mut self, player: PlayerId) -> bool {
        let Some(index) = self.order.iter().position(|&p| p == player) else {
            return false;
        };
        self.order.remove(index);

        if self.order.is_empty() {
            self.cursor = 0;
            self.pending = true;
        } else if index < self.cursor {
            self.cursor -= 1;
        } else if index == self.cursor {
            if self.cursor >= self.order.len() {
                self.cursor = 0;
            }
            self.pending = true;
        }
        true
    }
}

//! The players seated in a game.
//!
//! Backed by an `im::Vector` so a game snapshot clones in O(1).
//! Order is join order; lookups are linear, which is fine for the
//! handful of players a board game seats.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::RuleViolation;
use super::player::{Player, PlayerId};

/// Ordered player collection with ownership queries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vector<Player>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id() == id)
    }

    /// Add a player. Returns false (and drops nothing) if the id is taken.
    pub fn insert(&mut self, player: Player) -> bool {
        if self.contains(player.id()) {
            return false;
        }
        self.players.push_back(player);
        true
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    /// Like [`get`](Self::get), failing with `UnknownPlayer`.
    pub fn player(&self, id: PlayerId) -> Result<&Player, RuleViolation> {
        self.get(id).ok_or(RuleViolation::UnknownPlayer(id))
    }

    /// Like [`get_mut`](Self::get_mut), failing with `UnknownPlayer`.
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, RuleViolation> {
        self.get_mut(id).ok_or(RuleViolation::UnknownPlayer(id))
    }

    /// Iterate players in join order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate player ids in join order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(Player::id)
    }

    /// Who holds the deed at `position`, if anyone.
    #[must_use]
    pub fn owner_of(&self, position: usize) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.owns(position))
            .map(Player::id)
    }

    /// Check if `owner` holds every one of `positions`.
    ///
    /// An empty set of positions is never "held".
    pub fn holds_all(&self, owner: PlayerId, positions: impl IntoIterator<Item = usize>) -> bool {
        let Some(player) = self.get(owner) else {
            return false;
        };
        let mut any = false;
        for position in positions {
            if !player.owns(position) {
                return false;
            }
            any = true;
        }
        any
    }
}

impl FromIterator<Player> for Roster {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for player in iter {
            roster.insert(player);
        }
        roster
    }
}

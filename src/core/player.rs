//! Player identification and per-player board state.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting up to 256 players.
//!
//! ## Player
//!
//! Everything the engine tracks about a seat at the table: where the
//! figure stands, how much money is left, which deeds are held and
//! whether the player is currently in jail.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::RuleViolation;

/// Player identifier.
///
/// Identifiers are assigned by whoever seats the players (a roster file,
/// a lobby) and only need to be unique within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// The token a player moves around the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Figure {
    Hat,
    Car,
    Dog,
    Ship,
    Thimble,
    Boot,
    Iron,
    Wheelbarrow,
}

impl Figure {
    /// Every figure, in box order.
    pub const ALL: [Figure; 8] = [
        Figure::Hat,
        Figure::Car,
        Figure::Dog,
        Figure::Ship,
        Figure::Thimble,
        Figure::Boot,
        Figure::Iron,
        Figure::Wheelbarrow,
    ];

    /// Lowercase name, as used in roster files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Figure::Hat => "hat",
            Figure::Car => "car",
            Figure::Dog => "dog",
            Figure::Ship => "ship",
            Figure::Thimble => "thimble",
            Figure::Boot => "boot",
            Figure::Iron => "iron",
            Figure::Wheelbarrow => "wheelbarrow",
        }
    }
}

impl std::fmt::Display for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a figure name does not match any [`Figure`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown figure '{0}'")]
pub struct UnknownFigure(pub String);

impl FromStr for Figure {
    type Err = UnknownFigure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Figure::ALL
            .into_iter()
            .find(|figure| figure.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownFigure(wanted.to_string()))
    }
}

/// Jail status of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JailState {
    /// Moving normally.
    #[default]
    Free,
    /// Confined; each served round decrements the counter.
    Jailed { rounds_remaining: u32 },
}

impl JailState {
    /// Check if this state confines the player.
    #[must_use]
    pub const fn is_jailed(self) -> bool {
        matches!(self, JailState::Jailed { .. })
    }

    /// Rounds left to serve (0 when free).
    #[must_use]
    pub const fn rounds_remaining(self) -> u32 {
        match self {
            JailState::Free => 0,
            JailState::Jailed { rounds_remaining } => rounds_remaining,
        }
    }
}

/// A seat at the table.
///
/// Players are created off-board (`position() == None`) and placed on the
/// start tile when a game admits them. They are never destroyed; a
/// bankrupt player is only taken out of the turn rotation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    figure: Figure,
    position: Option<usize>,
    balance: u64,
    properties: BTreeSet<usize>,
    jail: JailState,
}

impl Player {
    /// Create an unplaced player with an empty purse.
    pub fn new(id: PlayerId, name: impl Into<String>, figure: Figure) -> Self {
        Self {
            id,
            name: name.into(),
            figure,
            position: None,
            balance: 0,
            properties: BTreeSet::new(),
            jail: JailState::Free,
        }
    }

    /// Start with a given balance (builder pattern).
    #[must_use]
    pub fn with_balance(mut self, balance: u64) -> Self {
        self.balance = balance;
        self
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn figure(&self) -> Figure {
        self.figure
    }

    /// Board index the figure stands on, `None` before placement.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    #[must_use]
    pub fn balance(&self) -> u64 {
        self.balance
    }

    #[must_use]
    pub fn jail_state(&self) -> JailState {
        self.jail
    }

    #[must_use]
    pub fn is_jailed(&self) -> bool {
        self.jail.is_jailed()
    }

    /// Board positions of every deed this player holds, ascending.
    pub fn properties(&self) -> impl Iterator<Item = usize> + '_ {
        self.properties.iter().copied()
    }

    /// Check if this player holds the deed at `position`.
    #[must_use]
    pub fn owns(&self, position: usize) -> bool {
        self.properties.contains(&position)
    }

    // === Movement ===

    /// Put the figure on a board index.
    pub fn move_to(&mut self, position: usize) {
        self.position = Some(position);
    }

    // === Money ===

    /// Add money to the purse.
    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Take money from the purse.
    ///
    /// The balance never goes negative: if it cannot cover `amount`
    /// nothing is taken and `InsufficientFunds` is returned.
    pub fn debit(&mut self, amount: u64) -> Result<(), RuleViolation> {
        if amount > self.balance {
            return Err(RuleViolation::InsufficientFunds {
                player: self.id,
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    // === Deeds ===

    /// Record ownership of the deed at `position`.
    ///
    /// Returns false if the deed was already held.
    pub fn add_property(&mut self, position: usize) -> bool {
        self.properties.insert(position)
    }

    /// Return every deed to the bank, yielding the positions released.
    pub fn release_properties(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.properties).into_iter().collect()
    }

    // === Jail ===

    /// Confine the player for `rounds` rounds (at least one).
    pub fn jail(&mut self, rounds: u32) -> Result<(), RuleViolation> {
        if self.jail.is_jailed() {
            return Err(RuleViolation::AlreadyJailed { player: self.id });
        }
        self.jail = JailState::Jailed {
            rounds_remaining: rounds.max(1),
        };
        Ok(())
    }

    /// Serve one round of a jail sentence and return the new state.
    ///
    /// Serving the last round frees the player. Calling this on a free
    /// player fails with `NotJailed`.
    pub fn release(&mut self) -> Result<JailState, RuleViolation> {
        self.jail = match self.jail {
            JailState::Free => return Err(RuleViolation::NotJailed { player: self.id }),
            JailState::Jailed { rounds_remaining } if rounds_remaining <= 1 => JailState::Free,
            JailState::Jailed { rounds_remaining } => JailState::Jailed {
                rounds_remaining: rounds_remaining - 1,
            },
        };
        Ok(self.jail)
    }

    /// Free the player immediately, whatever remains of the sentence.
    pub fn pardon(&mut self) {
        self.jail = JailState::Free;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Player {
        Player::new(PlayerId::new(0), "Alice", Figure::Hat)
    }

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_new_player_is_unplaced() {
        let player = alice();

        assert_eq!(player.position(), None);
        assert_eq!(player.balance(), 0);
        assert_eq!(player.properties().count(), 0);
        assert_eq!(player.jail_state(), JailState::Free);
    }

    #[test]
    fn test_figure_parse() {
        assert_eq!("hat".parse::<Figure>(), Ok(Figure::Hat));
        assert_eq!(" Wheelbarrow ".parse::<Figure>(), Ok(Figure::Wheelbarrow));
        assert_eq!(
            "meeple".parse::<Figure>(),
            Err(UnknownFigure("meeple".to_string()))
        );
    }

    #[test]
    fn test_debit_and_credit() {
        let mut player = alice().with_balance(100);

        player.credit(50);
        assert_eq!(player.balance(), 150);

        player.debit(120).unwrap();
        assert_eq!(player.balance(), 30);
    }

    #[test]
    fn test_debit_insufficient_funds_leaves_balance() {
        let mut player = alice().with_balance(10);

        let err = player.debit(11).unwrap_err();
        assert_eq!(
            err,
            RuleViolation::InsufficientFunds {
                player: PlayerId::new(0),
                needed: 11,
                available: 10,
            }
        );
        assert_eq!(player.balance(), 10);
    }

    #[test]
    fn test_jail_countdown() {
        let mut player = alice();

        player.jail(3).unwrap();
        assert_eq!(player.jail_state(), JailState::Jailed { rounds_remaining: 3 });

        assert_eq!(player.release(), Ok(JailState::Jailed { rounds_remaining: 2 }));
        assert_eq!(player.release(), Ok(JailState::Jailed { rounds_remaining: 1 }));
        assert_eq!(player.release(), Ok(JailState::Free));
        assert!(!player.is_jailed());
    }

    #[test]
    fn test_release_when_free_fails() {
        let mut player = alice();
        player.jail(1).unwrap();
        player.release().unwrap();

        assert_eq!(
            player.release(),
            Err(RuleViolation::NotJailed { player: PlayerId::new(0) })
        );
    }

    #[test]
    fn test_jail_twice_fails() {
        let mut player = alice();
        player.jail(3).unwrap();

        assert_eq!(
            player.jail(3),
            Err(RuleViolation::AlreadyJailed { player: PlayerId::new(0) })
        );
        // The original sentence is untouched
        assert_eq!(player.jail_state().rounds_remaining(), 3);
    }

    #[test]
    fn test_pardon() {
        let mut player = alice();
        player.jail(3).unwrap();
        player.pardon();
        assert!(!player.is_jailed());
    }

    #[test]
    fn test_release_properties() {
        let mut player = alice();
        assert!(player.add_property(3));
        assert!(player.add_property(1));
        assert!(!player.add_property(3));

        assert!(player.owns(1));
        assert_eq!(player.release_properties(), vec![1, 3]);
        assert!(!player.owns(1));
    }

    #[test]
    fn test_player_serialization() {
        let mut player = alice().with_balance(1500);
        player.move_to(4);
        player.add_property(4);
        player.jail(2).unwrap();

        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}

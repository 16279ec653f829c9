//! Ruleset trait and the two built-in variants.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError};
use crate::core::{GameVariant, PlayerId, Roster};
use crate::turns::TurnManager;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Ended without a winner (explicit end, or everyone left).
    Abandoned,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Abandoned => false,
        }
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Abandoned => None,
        }
    }
}

/// Where a roll takes a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Movement {
    pub to: usize,
    /// The move reached or crossed position 0.
    pub passed_start: bool,
}

/// Variant rules.
///
/// ## Implementation Notes
///
/// - `plan_move`: Pure; the caller applies the move
/// - `outcome`: Return `None` if the game continues
pub trait Ruleset {
    fn variant(&self) -> GameVariant;

    /// Plan a forward move of `steps` from `from`.
    fn plan_move(&self, board: &Board, from: usize, steps: u32) -> Result<Movement, BoardError>;

    /// Check if the game is over.
    fn outcome(&self, board: &Board, roster: &Roster, rotation: &TurnManager) -> Option<GameResult>;

    /// Whether rolling doubles frees a jailed player at once.
    fn doubles_release_from_jail(&self) -> bool {
        false
    }
}

/// Wraparound board; last player in the rotation wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonopolyRules;

impl Ruleset for MonopolyRules {
    fn variant(&self) -> GameVariant {
        GameVariant::Monopoly
    }

    fn plan_move(&self, board: &Board, from: usize, steps: u32) -> Result<Movement, BoardError> {
        let steps = i64::from(steps);
        Ok(Movement {
            to: board.position_after_steps(from, steps)?,
            passed_start: board.passes_start(from, steps),
        })
    }

    fn outcome(&self, _board: &Board, _roster: &Roster, rotation: &TurnManager) -> Option<GameResult> {
        match rotation.players() {
            [] => Some(GameResult::Abandoned),
            [last] => Some(GameResult::Winner(*last)),
            _ => None,
        }
    }

    fn doubles_release_from_jail(&self) -> bool {
        true
    }
}

/// Race to the last tile; overshooting stops on it.
#[derive(Clone, Copy, Debug, Default)]
pub struct SnakesAndLaddersRules;

impl Ruleset for SnakesAndLaddersRules {
    fn variant(&self) -> GameVariant {
        GameVariant::SnakesAndLadders
    }

    fn plan_move(&self, board: &Board, from: usize, steps: u32) -> Result<Movement, BoardError> {
        board.tile_at(from)?;
        Ok(Movement {
            to: board.clamped_position(from, steps),
            passed_start: false,
        })
    }

    fn outcome(&self, board: &Board, roster: &Roster, rotation: &TurnManager) -> Option<GameResult> {
        if rotation.is_empty() {
            return Some(GameResult::Abandoned);
        }
        let finish = board.last_position();
        rotation
            .players()
            .iter()
            .copied()
            .find(|&id| roster.get(id).and_then(|p| p.position()) == Some(finish))
            .map(GameResult::Winner)
    }
}

/// The built-in rules for a variant.
#[must_use]
pub fn for_variant(variant: GameVariant) -> Box<dyn Ruleset> {
    match variant {
        GameVariant::Monopoly => Box::new(MonopolyRules),
        GameVariant::SnakesAndLadders => Box::new(SnakesAndLaddersRules),
    }
}

//! Saved game state.
//!
//! A snapshot holds everything that changes during play. The board is
//! stored by name only: boards are static layouts loaded separately, and
//! restoring checks that the caller supplied the same one.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, Roster};
use crate::rules::GameResult;
use crate::turns::TurnManager;

/// Serializable game state, minus the board, dice and listeners.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    pub board_name: String,
    pub roster: Roster,
    pub turns: TurnManager,
    pub result: Option<GameResult>,
    pub turn_number: u32,
}

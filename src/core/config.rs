//! Game configuration.
//!
//! Hosts pick a variant preset and adjust it with builder methods, or
//! load the whole thing from JSON. The engine reads these values; it
//! never hardcodes jail lengths, dice counts or money.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default jail sentence, in rounds.
pub const DEFAULT_JAIL_ROUNDS: u32 = 3;

/// Default cap on chained re-resolutions after the first landing.
pub const DEFAULT_MAX_CHAIN_DEPTH: u32 = 1;

/// Which family of rules a game follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVariant {
    /// Wraparound board, money, deeds and rent; last solvent player wins.
    Monopoly,
    /// Race to the last tile; no money.
    SnakesAndLadders,
}

impl std::fmt::Display for GameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameVariant::Monopoly => f.write_str("monopoly"),
            GameVariant::SnakesAndLadders => f.write_str("snakes-and-ladders"),
        }
    }
}

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("dice_count must be at least 1")]
    NoDice,

    #[error("jail_rounds must be at least 1")]
    NoJailRounds,

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rule family.
    pub variant: GameVariant,

    /// Dice thrown per turn.
    pub dice_count: usize,

    /// Rounds a jailed player sits out.
    pub jail_rounds: u32,

    /// How many times one landing may re-enter resolution because an
    /// effect moved the player onto another tile.
    pub max_chain_depth: u32,

    /// Money each player receives on joining.
    pub starting_balance: u64,

    /// Salary for moving past the start tile.
    pub pass_start_bonus: u64,
}

impl GameConfig {
    /// Two dice, 1500 to start, 200 salary.
    #[must_use]
    pub fn monopoly() -> Self {
        Self {
            variant: GameVariant::Monopoly,
            dice_count: 2,
            jail_rounds: DEFAULT_JAIL_ROUNDS,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            starting_balance: 1500,
            pass_start_bonus: 200,
        }
    }

    /// One die and no money.
    #[must_use]
    pub fn snakes_and_ladders() -> Self {
        Self {
            variant: GameVariant::SnakesAndLadders,
            dice_count: 1,
            jail_rounds: DEFAULT_JAIL_ROUNDS,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
            starting_balance: 0,
            pass_start_bonus: 0,
        }
    }

    /// Parse and validate a JSON config. Missing fields take the
    /// Monopoly defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the engine cannot run without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dice_count == 0 {
            return Err(ConfigError::NoDice);
        }
        if self.jail_rounds == 0 {
            return Err(ConfigError::NoJailRounds);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_dice_count(mut self, dice_count: usize) -> Self {
        self.dice_count = dice_count;
        self
    }

    #[must_use]
    pub fn with_jail_rounds(mut self, rounds: u32) -> Self {
        self.jail_rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_max_chain_depth(mut self, depth: u32) -> Self {
        self.max_chain_depth = depth;
        self
    }

    #[must_use]
    pub fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    #[must_use]
    pub fn with_pass_start_bonus(mut self, bonus: u64) -> Self {
        self.pass_start_bonus = bonus;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::monopoly()
    }
}

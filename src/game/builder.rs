//! Game construction.

use std::sync::Arc;

use crate::board::Board;
use crate::core::{Dice, GameConfig, Player, RandomDice, Roster};
use crate::events::SharedEventBus;
use crate::rules::{self, GameResult, Ruleset};
use crate::turns::TurnManager;

use super::decider::{NeverBuy, PurchaseDecider};
use super::error::GameError;
use super::session::Game;
use super::snapshot::GameSnapshot;

/// Builder for creating a [`Game`].
///
/// Only the board is required. Everything else defaults: Monopoly config,
/// seeded random dice (seed 0), a private event bus, rules for the
/// configured variant, and a decider that never buys.
pub struct GameBuilder {
    config: GameConfig,
    board: Option<Arc<Board>>,
    seed: u64,
    dice: Option<Box<dyn Dice>>,
    bus: Option<SharedEventBus>,
    rules: Option<Box<dyn Ruleset>>,
    decider: Option<Box<dyn PurchaseDecider>>,
    players: Vec<Player>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
            board: None,
            seed: 0,
            dice: None,
            bus: None,
            rules: None,
            decider: None,
            players: Vec::new(),
        }
    }
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn board(mut self, board: impl Into<Arc<Board>>) -> Self {
        self.board = Some(board.into());
        self
    }

    /// Seed for the default random dice. Ignored if `dice` is set.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn dice(mut self, dice: impl Dice + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// Share a host's event bus instead of creating a private one.
    pub fn event_bus(mut self, bus: SharedEventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Override the rules picked from the config's variant.
    pub fn rules(mut self, rules: impl Ruleset + 'static) -> Self {
        self.rules = Some(Box::new(rules));
        self
    }

    pub fn decider(mut self, decider: impl PurchaseDecider + 'static) -> Self {
        self.decider = Some(Box::new(decider));
        self
    }

    /// Seat a player when the game is built.
    pub fn player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    pub fn players(mut self, players: impl IntoIterator<Item = Player>) -> Self {
        self.players.extend(players);
        self
    }

    /// Build a fresh game and seat the queued players.
    ///
    /// If any players were queued, the end condition is checked once they
    /// are seated: a Monopoly game with a single player is already won.
    pub fn build(mut self) -> Result<Game, GameError> {
        let players = std::mem::take(&mut self.players);
        let mut game = self.assemble(Roster::new(), TurnManager::default(), None, 0)?;
        game.add_players(players)?;
        if !game.turns().is_empty() {
            game.settle()?;
        }
        tracing::info!(
            board = game.board().name(),
            players = game.turns().len(),
            variant = %game.config().variant,
            "game created"
        );
        Ok(game)
    }

    /// Rebuild a game from a snapshot onto this builder's board.
    ///
    /// The snapshot's config replaces the builder's; queued players are
    /// ignored.
    pub fn restore(mut self, snapshot: GameSnapshot) -> Result<Game, GameError> {
        let board = self.board.as_ref().ok_or(GameError::MissingBoard)?;
        Game::check_snapshot(board, &snapshot)?;

        self.config = snapshot.config;
        let game = self.assemble(
            snapshot.roster,
            snapshot.turns,
            snapshot.result,
            snapshot.turn_number,
        )?;
        tracing::info!(board = game.board().name(), turn = game.turn_number(), "game restored");
        Ok(game)
    }

    fn assemble(
        self,
        roster: Roster,
        turns: TurnManager,
        result: Option<GameResult>,
        turn_number: u32,
    ) -> Result<Game, GameError> {
        self.config.validate()?;
        let board = self.board.ok_or(GameError::MissingBoard)?;
        board.check_chains(self.config.max_chain_depth)?;
        let variant = self.config.variant;
        let seed = self.seed;

        Ok(Game {
            config: self.config,
            board,
            roster,
            turns,
            bus: self.bus.unwrap_or_default(),
            dice: self.dice.unwrap_or_else(|| Box::new(RandomDice::new(seed))),
            rules: self.rules.unwrap_or_else(|| rules::for_variant(variant)),
            decider: self.decider.unwrap_or_else(|| Box::new(NeverBuy)),
            result,
            turn_number,
        })
    }
}

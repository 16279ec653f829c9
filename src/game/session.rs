//! A playable game session.
//!
//! `Game` owns the roster, the turn rotation and the dice; it shares the
//! board (read-only) and the event bus (with the host). One call to
//! [`Game::take_turn`] plays one complete turn:
//!
//! 1. Hand the turn to the next player in rotation
//! 2. Jailed: serve a round (or, where the rules allow, roll doubles to escape)
//! 3. Roll, move, collect salary for passing start
//! 4. Resolve the landing, following chained moves
//! 5. Offer unowned property to the purchase decider
//! 6. Publish every event of the turn, in order
//! 7. Check whether the game is over

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::{Board, TileKind};
use crate::core::{Dice, DiceRoll, GameConfig, Player, PlayerId, Roster, RuleViolation};
use crate::effects::{EffectResolver, ResolveOutcome, ResolverContext};
use crate::events::{GameEvent, SharedEventBus};
use crate::rules::{GameResult, Ruleset};
use crate::turns::{TurnError, TurnManager};

use super::decider::PurchaseDecider;
use super::error::GameError;
use super::snapshot::GameSnapshot;

/// What the active player's turn amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player moved and the landing resolved.
    Moved {
        from: usize,
        to: usize,
        resolution: ResolveOutcome,
        /// Position of a property bought this turn.
        purchased: Option<usize>,
    },
    /// The player sat out a round in jail.
    ServedJail { rounds_remaining: u32 },
}

/// Summary of one completed turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// 1-based turn counter.
    pub turn: u32,
    pub player: PlayerId,
    pub roll: Option<DiceRoll>,
    pub outcome: TurnOutcome,
    /// Everything published during the turn, in order.
    pub events: Vec<GameEvent>,
    /// Set if this turn ended the game.
    pub result: Option<GameResult>,
}

/// A board game in progress.
pub struct Game {
    pub(super) config: GameConfig,
    pub(super) board: Arc<Board>,
    pub(super) roster: Roster,
    pub(super) turns: TurnManager,
    pub(super) bus: SharedEventBus,
    pub(super) dice: Box<dyn Dice>,
    pub(super) rules: Box<dyn Ruleset>,
    pub(super) decider: Box<dyn PurchaseDecider>,
    pub(super) result: Option<GameResult>,
    pub(super) turn_number: u32,
}

impl Game {
    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Arc<Board> {
        &self.board
    }

    /// Every player ever admitted, including those removed from rotation.
    #[must_use]
    pub fn players(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.get(id)
    }

    /// The turn rotation.
    #[must_use]
    pub fn turns(&self) -> &TurnManager {
        &self.turns
    }

    /// The bus this game publishes to.
    #[must_use]
    pub fn event_bus(&self) -> &SharedEventBus {
        &self.bus
    }

    /// Who will play the next turn.
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.turns.peek_next().ok()
    }

    /// Who holds the deed at `position`.
    #[must_use]
    pub fn owner_of(&self, position: usize) -> Option<PlayerId> {
        self.roster.owner_of(position)
    }

    /// Turns played so far.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Check if the game is over.
    ///
    /// The end condition is evaluated after every turn and removal, and
    /// once when the builder seats its players. Players added later
    /// through `add_player` do not end a game on their own.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.result.is_some()
    }

    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    // === Membership ===

    /// Seat a player: place them on position 0, pay the starting balance
    /// and append them to the rotation.
    pub fn add_player(&mut self, mut player: Player) -> Result<(), GameError> {
        self.ensure_running()?;
        let id = player.id();
        if self.roster.contains(id) {
            return Err(GameError::DuplicatePlayer(id));
        }

        player.move_to(0);
        player.credit(self.config.starting_balance);
        let message = format!("{} joins as the {}", player.name(), player.figure());

        self.roster.insert(player);
        self.turns.add_player(id);
        tracing::info!(player = %id, "player joined");

        self.bus.publish(&GameEvent::text(message))?;
        Ok(())
    }

    /// Seat several players in order. Stops at the first failure.
    pub fn add_players(&mut self, players: impl IntoIterator<Item = Player>) -> Result<(), GameError> {
        for player in players {
            self.add_player(player)?;
        }
        Ok(())
    }

    /// Take a player out of the rotation (bankruptcy, elimination).
    ///
    /// Their deeds go back to the bank and are returned. The player stays
    /// in [`players`](Self::players). Removing someone already out of the
    /// rotation does nothing and returns no deeds.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<Vec<usize>, GameError> {
        self.ensure_running()?;
        let released = self.roster.player_mut(id)?.release_properties();
        if !self.turns.remove_player(id) {
            return Ok(released);
        }
        tracing::info!(player = %id, deeds = released.len(), "player removed");

        let mut events = vec![GameEvent::PlayerRemoved { player: id }];
        self.check_outcome(&mut events);
        self.bus.publish_all(&events)?;
        Ok(released)
    }

    // === Play ===

    /// Play one full turn for the next player in rotation.
    ///
    /// Once the game has ended this fails with `GameEnded`. With nobody
    /// left to play it ends the game and fails with `NoPlayers`.
    ///
    /// If the turn fails partway (for example rent the player cannot
    /// afford), the events produced up to that point are still published
    /// before the error is returned, and the turn has been used up.
    pub fn take_turn(&mut self) -> Result<TurnReport, GameError> {
        self.ensure_running()?;

        let player = match self.turns.next_player() {
            Ok(player) => player,
            Err(TurnError::NoPlayers) => {
                tracing::info!("no players left; ending game");
                self.result = Some(GameResult::Abandoned);
                return Err(GameError::NoPlayers);
            }
            Err(other) => return Err(other.into()),
        };
        self.turn_number += 1;
        tracing::debug!(turn = self.turn_number, %player, "turn started");

        let mut events = Vec::new();
        let played = self.play_turn(player, &mut events);
        if played.is_ok() {
            self.check_outcome(&mut events);
        }

        let published = self.bus.publish_all(&events);
        let (roll, outcome) = played.inspect_err(|err| {
            tracing::warn!(%player, error = %err, "turn failed");
        })?;
        published?;

        Ok(TurnReport {
            turn: self.turn_number,
            player,
            roll,
            outcome,
            events,
            result: self.result.clone(),
        })
    }

    fn play_turn(
        &mut self,
        player: PlayerId,
        events: &mut Vec<GameEvent>,
    ) -> Result<(Option<DiceRoll>, TurnOutcome), GameError> {
        if self.roster.player(player)?.is_jailed() {
            return self.play_jailed(player, events);
        }

        let roll = self.roll(player, events)?;
        let outcome = self.advance(player, roll.total(), events)?;
        Ok((Some(roll), outcome))
    }

    fn play_jailed(
        &mut self,
        player: PlayerId,
        events: &mut Vec<GameEvent>,
    ) -> Result<(Option<DiceRoll>, TurnOutcome), GameError> {
        if self.rules.doubles_release_from_jail() && self.config.dice_count >= 2 {
            let roll = self.roll(player, events)?;
            if roll.all_equal()? {
                self.roster.player_mut(player)?.pardon();
                events.push(GameEvent::text(format!("{player} rolled doubles and leaves jail")));
                let outcome = self.advance(player, roll.total(), events)?;
                return Ok((Some(roll), outcome));
            }
            let rounds_remaining = self.serve_round(player, events)?;
            return Ok((Some(roll), TurnOutcome::ServedJail { rounds_remaining }));
        }

        let rounds_remaining = self.serve_round(player, events)?;
        Ok((None, TurnOutcome::ServedJail { rounds_remaining }))
    }

    fn serve_round(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) -> Result<u32, GameError> {
        let state = self.roster.player_mut(player)?.release()?;
        let rounds_remaining = state.rounds_remaining();
        let message = if state.is_jailed() {
            format!("{player} serves a round in jail, {rounds_remaining} left")
        } else {
            format!("{player} is released from jail")
        };
        tracing::debug!(%player, rounds_remaining, "served jail round");
        events.push(GameEvent::text(message));
        Ok(rounds_remaining)
    }

    fn roll(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) -> Result<DiceRoll, GameError> {
        let roll = self.dice.roll(self.config.dice_count)?;
        tracing::debug!(%player, %roll, "rolled");
        events.push(GameEvent::DiceRolled {
            player,
            roll: roll.clone(),
        });
        Ok(roll)
    }

    /// Move `steps` forward, then resolve where the player lands.
    fn advance(
        &mut self,
        player: PlayerId,
        steps: u32,
        events: &mut Vec<GameEvent>,
    ) -> Result<TurnOutcome, GameError> {
        let from = self
            .roster
            .player(player)?
            .position()
            .ok_or(RuleViolation::NotPlaced { player })?;
        let movement = self.rules.plan_move(&self.board, from, steps)?;

        let mover = self.roster.player_mut(player)?;
        mover.move_to(movement.to);
        events.push(GameEvent::PlayerMoved {
            player,
            from,
            to: movement.to,
        });
        tracing::debug!(%player, from, to = movement.to, "moved");

        let bonus = self.config.pass_start_bonus;
        if movement.passed_start && bonus > 0 {
            mover.credit(bonus);
            events.push(GameEvent::text(format!("{player} passes start and collects {bonus}")));
        }

        let context = ResolverContext::from_config(&self.config);
        let landing = EffectResolver::resolve_into(&self.board, &mut self.roster, player, &context, events)?;

        let purchased = match landing.outcome {
            ResolveOutcome::PurchaseOffer { position, price } => {
                self.offer_purchase(player, position, price, events)?
            }
            _ => None,
        };

        Ok(TurnOutcome::Moved {
            from,
            to: landing.final_position,
            resolution: landing.outcome,
            purchased,
        })
    }

    fn offer_purchase(
        &mut self,
        player: PlayerId,
        position: usize,
        price: u64,
        events: &mut Vec<GameEvent>,
    ) -> Result<Option<usize>, GameError> {
        let buyer = self.roster.player(player)?;
        if buyer.balance() < price {
            events.push(GameEvent::text(format!("{player} cannot afford tile {position}")));
            return Ok(None);
        }
        let Some(deed) = self.board.tile_at(position)?.kind.deed() else {
            return Err(RuleViolation::NotPurchasable { position }.into());
        };
        if !self.decider.wants_to_buy(buyer, deed) {
            return Ok(None);
        }
        self.buy(player, position, events)?;
        Ok(Some(position))
    }

    /// Buy the deed at `position` for `player` at its printed price.
    ///
    /// Only players still in the rotation may buy.
    pub fn purchase_property(&mut self, player: PlayerId, position: usize) -> Result<(), GameError> {
        self.ensure_running()?;
        let mut events = Vec::new();
        self.buy(player, position, &mut events)?;
        self.bus.publish_all(&events)?;
        Ok(())
    }

    fn buy(&mut self, player: PlayerId, position: usize, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let price = match &self.board.tile_at(position)?.kind {
            TileKind::Property(deed) => deed.price,
            _ => return Err(RuleViolation::NotPurchasable { position }.into()),
        };
        self.roster.player(player)?;
        if !self.turns.contains(player) {
            return Err(RuleViolation::NotInRotation { player }.into());
        }
        if let Some(owner) = self.roster.owner_of(position) {
            return Err(RuleViolation::AlreadyOwned { position, owner }.into());
        }

        let buyer = self.roster.player_mut(player)?;
        buyer.debit(price)?;
        buyer.add_property(position);
        tracing::info!(%player, position, price, "property purchased");

        events.push(GameEvent::PropertyPurchased {
            player,
            position,
            price,
        });
        Ok(())
    }

    // === Ending ===

    /// End the game now. Idempotent: an already ended game keeps its
    /// result.
    pub fn end(&mut self) -> Result<GameResult, GameError> {
        if let Some(result) = &self.result {
            return Ok(result.clone());
        }
        let mut events = Vec::new();
        self.finish(GameResult::Abandoned, &mut events);
        self.bus.publish_all(&events)?;
        Ok(GameResult::Abandoned)
    }

    /// Evaluate the end condition outside a turn, publishing the result.
    pub(super) fn settle(&mut self) -> Result<(), GameError> {
        let mut events = Vec::new();
        self.check_outcome(&mut events);
        self.bus.publish_all(&events)?;
        Ok(())
    }

    fn check_outcome(&mut self, events: &mut Vec<GameEvent>) {
        if self.result.is_some() {
            return;
        }
        if let Some(result) = self.rules.outcome(&self.board, &self.roster, &self.turns) {
            self.finish(result, events);
        }
    }

    fn finish(&mut self, result: GameResult, events: &mut Vec<GameEvent>) {
        let message = match &result {
            GameResult::Winner(winner) => format!("Game over: {winner} wins"),
            GameResult::Abandoned => "Game over".to_string(),
        };
        tracing::info!(?result, turns = self.turn_number, "game ended");
        events.push(GameEvent::text(message));
        self.result = Some(result);
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.result.is_some() {
            return Err(GameError::GameEnded);
        }
        Ok(())
    }

    // === Persistence ===

    /// Capture the mutable game state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            config: self.config.clone(),
            board_name: self.board.name().to_string(),
            roster: self.roster.clone(),
            turns: self.turns.clone(),
            result: self.result.clone(),
            turn_number: self.turn_number,
        }
    }

    /// Check a snapshot against the board it is being restored onto.
    ///
    /// Snapshots are plain data and may have been edited, so everything
    /// the constructors normally guarantee is checked again here.
    pub(super) fn check_snapshot(board: &Board, snapshot: &GameSnapshot) -> Result<(), GameError> {
        if board.name() != snapshot.board_name {
            return Err(GameError::BoardMismatch {
                expected: snapshot.board_name.clone(),
                actual: board.name().to_string(),
            });
        }

        let mut seen = FxHashSet::default();
        let mut deeds: FxHashMap<usize, PlayerId> = FxHashMap::default();
        for player in snapshot.roster.iter() {
            let id = player.id();
            if !seen.insert(id) {
                return Err(GameError::DuplicatePlayer(id));
            }
            if let Some(position) = player.position() {
                board.tile_at(position)?;
            }
            for position in player.properties() {
                if board.tile_at(position)?.kind.deed().is_none() {
                    return Err(RuleViolation::NotPurchasable { position }.into());
                }
                if let Some(owner) = deeds.insert(position, id) {
                    return Err(RuleViolation::AlreadyOwned { position, owner }.into());
                }
            }
        }

        snapshot.turns.validate()?;
        for &id in snapshot.turns.players() {
            if !snapshot.roster.contains(id) {
                return Err(RuleViolation::UnknownPlayer(id).into());
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("board", &self.board.name())
            .field("roster", &self.roster)
            .field("turns", &self.turns)
            .field("result", &self.result)
            .field("turn_number", &self.turn_number)
            .finish_non_exhaustive()
    }
}

//! Effect resolution - applying a landing to the game state.
//!
//! ## Landing State Machine
//!
//! ```text
//! Idle -> Resolving -> Done
//!            |  ^
//!            v  |
//!          Chained
//! ```
//!
//! Resolving classifies the tile under the player and applies exactly one
//! effect. If the effect moved the player, resolution is Chained and
//! re-enters on the destination tile. Re-entries are capped by
//! `ResolverContext::max_chain_depth`; one more relocation past the cap
//! fails with `ChainTooDeep` before the player is moved.

use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::core::{GameConfig, PlayerId, Roster, RuleViolation, DEFAULT_JAIL_ROUNDS, DEFAULT_MAX_CHAIN_DEPTH};
use crate::events::GameEvent;

use super::effect::{Relocation, TileEffect};

/// Engine policy the resolver needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolverContext {
    /// Rounds a player is jailed for.
    pub jail_rounds: u32,
    /// Re-resolutions allowed after the first landing.
    pub max_chain_depth: u32,
}

impl ResolverContext {
    #[must_use]
    pub fn new(jail_rounds: u32, max_chain_depth: u32) -> Self {
        Self {
            jail_rounds,
            max_chain_depth,
        }
    }

    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.jail_rounds, config.max_chain_depth)
    }
}

impl Default for ResolverContext {
    fn default() -> Self {
        Self::new(DEFAULT_JAIL_ROUNDS, DEFAULT_MAX_CHAIN_DEPTH)
    }
}

/// Resolution failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Rule(#[from] RuleViolation),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// How a landing settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Nothing further to do.
    Settled,
    /// The player was jailed.
    Jailed { rounds: u32 },
    /// The player stands on an unowned property. Buying is up to the caller.
    PurchaseOffer { position: usize, price: u64 },
    /// Rent went from the player to `owner`.
    RentPaid { owner: PlayerId, amount: u64 },
}

/// Where a landing ended, without its events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Landing {
    pub final_position: usize,
    pub outcome: ResolveOutcome,
    /// Re-resolutions that happened.
    pub chain_depth: u32,
}

/// A finished landing and everything it produced, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub final_position: usize,
    pub outcome: ResolveOutcome,
    pub chain_depth: u32,
    pub events: Vec<GameEvent>,
}

enum ResolveState {
    Resolving {
        position: usize,
        depth: u32,
    },
    Chained {
        from: usize,
        to: usize,
        cause: Relocation,
        depth: u32,
    },
    Done {
        position: usize,
        outcome: ResolveOutcome,
        depth: u32,
    },
}

/// Resolves landings.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve the tile `player` currently stands on.
    pub fn resolve(
        board: &Board,
        roster: &mut Roster,
        player: PlayerId,
        context: &ResolverContext,
    ) -> Result<Resolution, ResolveError> {
        let mut events = Vec::new();
        let landing = Self::resolve_into(board, roster, player, context, &mut events)?;
        Ok(Resolution {
            final_position: landing.final_position,
            outcome: landing.outcome,
            chain_depth: landing.chain_depth,
            events,
        })
    }

    /// Like [`resolve`](Self::resolve), appending events to `events`.
    ///
    /// Events produced before a failure stay in the buffer, and any moves
    /// they describe have been applied.
    pub fn resolve_into(
        board: &Board,
        roster: &mut Roster,
        player: PlayerId,
        context: &ResolverContext,
        events: &mut Vec<GameEvent>,
    ) -> Result<Landing, ResolveError> {
        let start = roster
            .player(player)?
            .position()
            .ok_or(RuleViolation::NotPlaced { player })?;

        let mut state = ResolveState::Resolving {
            position: start,
            depth: 0,
        };

        loop {
            state = match state {
                ResolveState::Resolving { position, depth } => {
                    Self::resolve_tile(board, roster, player, position, depth, context, events)?
                }

                ResolveState::Chained {
                    from,
                    to,
                    cause,
                    depth,
                } => {
                    if depth >= context.max_chain_depth {
                        tracing::warn!(%player, from, to, depth, "effect chain too deep");
                        return Err(RuleViolation::ChainTooDeep {
                            position: from,
                            limit: context.max_chain_depth,
                        }
                        .into());
                    }
                    roster.player_mut(player)?.move_to(to);
                    tracing::debug!(%player, from, to, %cause, "chained move");
                    events.push(GameEvent::PlayerMoved { player, from, to });
                    events.push(GameEvent::text(format!("{player} {cause}")));

                    ResolveState::Resolving {
                        position: to,
                        depth: depth + 1,
                    }
                }

                ResolveState::Done {
                    position,
                    outcome,
                    depth,
                } => {
                    return Ok(Landing {
                        final_position: position,
                        outcome,
                        chain_depth: depth,
                    });
                }
            };
        }
    }

    fn resolve_tile(
        board: &Board,
        roster: &mut Roster,
        player: PlayerId,
        position: usize,
        depth: u32,
        context: &ResolverContext,
        events: &mut Vec<GameEvent>,
    ) -> Result<ResolveState, ResolveError> {
        let tile = board.tile_at(position)?;
        let effect = TileEffect::classify(board, tile, roster, player, context.jail_rounds)?;
        tracing::debug!(%player, %tile, ?effect, "resolving tile");

        let outcome = match effect {
            TileEffect::None => ResolveOutcome::Settled,

            TileEffect::Relocate { to, cause } => {
                return Ok(ResolveState::Chained {
                    from: position,
                    to,
                    cause,
                    depth,
                });
            }

            TileEffect::Imprison { rounds } => {
                roster.player_mut(player)?.jail(rounds).inspect_err(|err| {
                    tracing::warn!(%player, error = %err, "cannot jail");
                })?;
                events.push(GameEvent::text(format!(
                    "{player} is in jail for {rounds} round(s)"
                )));
                ResolveOutcome::Jailed { rounds }
            }

            TileEffect::OfferPurchase { position, price } => {
                events.push(GameEvent::text(format!(
                    "{player} may buy {tile} for {price}"
                )));
                ResolveOutcome::PurchaseOffer { position, price }
            }

            TileEffect::PayRent { owner, amount } => {
                Self::pay_rent(roster, player, owner, amount)?;
                events.push(GameEvent::text(format!(
                    "{player} paid {amount} rent to {owner}"
                )));
                ResolveOutcome::RentPaid { owner, amount }
            }
        };

        Ok(ResolveState::Done {
            position,
            outcome,
            depth,
        })
    }

    /// Move rent between players. Nothing moves if the payer is short.
    fn pay_rent(
        roster: &mut Roster,
        payer: PlayerId,
        owner: PlayerId,
        amount: u64,
    ) -> Result<(), RuleViolation> {
        // Make sure the owner exists before any money leaves the payer
        roster.player(owner)?;
        roster.player_mut(payer)?.debit(amount).inspect_err(|err| {
            tracing::warn!(%payer, %owner, amount, error = %err, "rent unpaid");
        })?;
        roster.player_mut(owner)?.credit(amount);
        Ok(())
    }
}

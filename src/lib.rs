//! # rust-boardgame
//!
//! A turn and tile-resolution engine for Monopoly-style and
//! Snakes-and-Ladders board games.
//!
//! ## Design Principles
//!
//! 1. **Closed Effects**: Tiles carry one of a fixed set of effects,
//!    matched exhaustively. No scripting, no reflection.
//!
//! 2. **Injected Collaborators**: Dice, purchase decisions and the event
//!    bus are handed to the game. Nothing is global, so a scripted dice
//!    source replays any game exactly.
//!
//! 3. **Validate Early**: Boards are checked when built. A `Board` value
//!    is always playable; runtime failures are rule violations only.
//!
//! ## Architecture
//!
//! One `Game::take_turn` call runs a whole turn synchronously:
//! roll, move, resolve the landing (following chained snakes and
//! ladders), publish events, advance the rotation.
//!
//! ## Modules
//!
//! - `core`: Players, roster, dice, RNG, configuration, rule violations
//! - `board`: Tiles and validated boards
//! - `effects`: Tile effects and the landing resolver
//! - `turns`: Cyclic turn rotation
//! - `events`: Game events and the publish/subscribe bus
//! - `rules`: Variant rules (movement, end conditions)
//! - `game`: Game sessions, builder, snapshots
//! - `persistence`: Repositories, save files, roster CSV

pub mod board;
pub mod core;
pub mod effects;
pub mod events;
pub mod game;
pub mod persistence;
pub mod rules;
pub mod turns;

// Re-export commonly used types
pub use crate::core::{
    Dice, DiceError, DiceRoll, Figure, GameConfig, GameRng, GameRngState, GameVariant, JailState,
    Player, PlayerId, RandomDice, Roster, RuleViolation, ScriptedDice,
};

pub use crate::board::{Board, BoardError, ColorGroup, PropertyDeed, Tile, TileKind};

pub use crate::effects::{
    EffectResolver, Resolution, ResolveError, ResolveOutcome, ResolverContext, TileEffect,
};

pub use crate::turns::{TurnError, TurnManager};

pub use crate::events::{
    EventBus, EventBusError, EventKind, EventListener, GameEvent, ListenerError, ListenerId,
    SharedEventBus,
};

pub use crate::rules::{GameResult, MonopolyRules, Ruleset, SnakesAndLaddersRules};

pub use crate::game::{
    AlwaysBuy, Game, GameBuilder, GameError, GameSnapshot, NeverBuy, PurchaseDecider, TurnOutcome,
    TurnReport,
};

pub use crate::persistence::{
    InMemoryRepository, JsonFileRepository, Repository, RepositoryError,
};

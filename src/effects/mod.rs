//! Tile effect system.
//!
//! - `TileEffect`: the closed set of things a tile can do to a player
//! - `EffectResolver`: applies a landing, following chained moves
//!
//! ## Design Philosophy
//!
//! Effects are a fixed enum matched exhaustively. Adding a tile kind is a
//! compile error everywhere it needs handling, never a silent no-op.

mod effect;
mod resolver;

pub use effect::{Relocation, TileEffect};
pub use resolver::{
    EffectResolver, Landing, Resolution, ResolveError, ResolveOutcome, ResolverContext,
};

//! Boards and tiles.
//!
//! - `Tile` / `TileKind`: one position and the effect printed on it
//! - `Board`: validated, immutable ring of tiles with movement arithmetic
//! - `BoardError`: layout and lookup failures

mod error;
mod layout;
mod tile;

pub use error::BoardError;
pub use layout::{Board, BoardLayout};
pub use tile::{ColorGroup, PropertyDeed, Tile, TileKind};

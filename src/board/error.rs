use thiserror::Error;

/// Board construction and lookup failures.
///
/// Layout errors are raised while building a board and are fatal to game
/// setup. `IndexOutOfRange` and `IllegalTilePosition` come from lookups on
/// an already valid board.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("a board needs at least one tile")]
    Empty,

    #[error("no tile at position {position}")]
    MissingTile { position: usize },

    #[error("more than one tile claims position {position}")]
    DuplicateTile { position: usize },

    #[error("start tile at position {position}; start must be position 0")]
    MisplacedStart { position: usize },

    #[error("tile {position} moves players by zero tiles")]
    ZeroMagnitude { position: usize },

    #[error("tile {position} slides back {distance} tiles, past the first tile")]
    SlideUnderflow { position: usize, distance: usize },

    #[error("tile {position} is the last tile and cannot skip forward")]
    SkipFromLastTile { position: usize },

    #[error("go-to-jail tile {position} but the board has no jail")]
    MissingJail { position: usize },

    #[error("landing on tile {position} chains more than {limit} move(s)")]
    ChainTooLong { position: usize, limit: u32 },

    #[error("index {index} is outside a board of {len} tiles")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("tile at position {position} does not belong to this board")]
    IllegalTilePosition { position: usize },
}

impl BoardError {
    /// Check if this error comes from validating a layout, as opposed to a
    /// lookup on a built board.
    #[must_use]
    pub fn is_layout(&self) -> bool {
        !matches!(
            self,
            BoardError::IndexOutOfRange { .. } | BoardError::IllegalTilePosition { .. }
        )
    }
}

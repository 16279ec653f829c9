//! The board: an immutable, validated ring of tiles.
//!
//! Movement wraps (`(position + steps) mod len`), except skip-forward
//! effects which stop at the last tile. All layout checks happen once in
//! the constructor, so an existing `Board` is always playable.

use serde::{Deserialize, Serialize};

use super::error::BoardError;
use super::tile::{ColorGroup, Tile, TileKind};

/// A validated board layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardLayout", into = "BoardLayout")]
pub struct Board {
    name: String,
    tiles: Vec<Tile>,
    jail: Option<usize>,
}

/// Serialized form of a [`Board`]: tile positions are implied by order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub name: String,
    pub tiles: Vec<TileKind>,
}

impl Board {
    /// Build a board, assigning positions in order.
    ///
    /// Chains of moving tiles (a ladder ending on a snake) are accepted
    /// here; games check them against their chain limit with
    /// [`check_chains`](Self::check_chains).
    pub fn new(name: impl Into<String>, kinds: Vec<TileKind>) -> Result<Self, BoardError> {
        let tiles = kinds
            .into_iter()
            .enumerate()
            .map(|(position, kind)| Tile::new(position, kind))
            .collect();
        Self::validated(name.into(), tiles)
    }

    /// Build a board from tiles that carry their own positions.
    ///
    /// Positions must cover `0..tiles.len()` exactly once each; order in
    /// the input does not matter.
    pub fn from_tiles(name: impl Into<String>, tiles: Vec<Tile>) -> Result<Self, BoardError> {
        let len = tiles.len();
        let mut slots: Vec<Option<Tile>> = vec![None; len];

        for tile in tiles {
            // An out-of-range position leaves a gap reported below
            let Some(slot) = slots.get_mut(tile.position) else {
                continue;
            };
            if slot.is_some() {
                return Err(BoardError::DuplicateTile {
                    position: tile.position,
                });
            }
            *slot = Some(tile);
        }

        let tiles = slots
            .into_iter()
            .enumerate()
            .map(|(position, slot)| slot.ok_or(BoardError::MissingTile { position }))
            .collect::<Result<Vec<_>, _>>()?;

        Self::validated(name.into(), tiles)
    }

    fn validated(name: String, tiles: Vec<Tile>) -> Result<Self, BoardError> {
        if tiles.is_empty() {
            return Err(BoardError::Empty);
        }

        let last = tiles.len() - 1;
        let mut jail = None;
        let mut go_to_jail = None;

        for tile in &tiles {
            let position = tile.position;
            match &tile.kind {
                TileKind::Start if position != 0 => {
                    return Err(BoardError::MisplacedStart { position });
                }
                TileKind::SlideBack {
                    tiles_to_slide_back: 0,
                }
                | TileKind::SkipForward { tiles_to_skip: 0 } => {
                    return Err(BoardError::ZeroMagnitude { position });
                }
                TileKind::SlideBack {
                    tiles_to_slide_back,
                } if *tiles_to_slide_back > position => {
                    return Err(BoardError::SlideUnderflow {
                        position,
                        distance: *tiles_to_slide_back,
                    });
                }
                TileKind::SkipForward { .. } if position == last => {
                    return Err(BoardError::SkipFromLastTile { position });
                }
                TileKind::Jail => {
                    jail.get_or_insert(position);
                }
                TileKind::GoToJail => {
                    go_to_jail.get_or_insert(position);
                }
                _ => {}
            }
        }

        if let (Some(position), None) = (go_to_jail, jail) {
            return Err(BoardError::MissingJail { position });
        }

        Ok(Self { name, tiles, jail })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of tiles. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false; empty boards are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Index of the final tile.
    #[must_use]
    pub fn last_position(&self) -> usize {
        self.tiles.len() - 1
    }

    /// Position of the first jail tile, if the board has one.
    #[must_use]
    pub fn jail_position(&self) -> Option<usize> {
        self.jail
    }

    /// Get the tile at `index`.
    pub fn tile_at(&self, index: usize) -> Result<&Tile, BoardError> {
        self.tiles.get(index).ok_or(BoardError::IndexOutOfRange {
            index,
            len: self.tiles.len(),
        })
    }

    /// The tile reached by moving `steps` from `from`, wrapping in both
    /// directions.
    ///
    /// `from` must be a tile of this board.
    pub fn tile_after_steps(&self, from: &Tile, steps: i64) -> Result<&Tile, BoardError> {
        if self.tiles.get(from.position) != Some(from) {
            return Err(BoardError::IllegalTilePosition {
                position: from.position,
            });
        }
        let index = self.wrap(from.position, steps);
        self.tile_at(index)
    }

    /// Like [`tile_after_steps`](Self::tile_after_steps), by index.
    pub fn position_after_steps(&self, from: usize, steps: i64) -> Result<usize, BoardError> {
        self.tile_at(from)?;
        Ok(self.wrap(from, steps))
    }

    fn wrap(&self, from: usize, steps: i64) -> usize {
        let len = self.tiles.len() as i64;
        // rem_euclid keeps the result in 0..len for negative steps
        (from as i64 + steps.rem_euclid(len)).rem_euclid(len) as usize
    }

    /// Check if moving forward `steps` from `from` reaches or crosses
    /// position 0.
    #[must_use]
    pub fn passes_start(&self, from: usize, steps: i64) -> bool {
        steps > 0 && (from as i64).saturating_add(steps) >= self.tiles.len() as i64
    }

    /// Destination of a skip-forward of `distance`, stopping at the last
    /// tile rather than wrapping.
    #[must_use]
    pub fn skip_destination(&self, from: usize, distance: usize) -> usize {
        from.saturating_add(distance).min(self.last_position())
    }

    /// Destination of a forward move that may not run past the finish.
    #[must_use]
    pub fn clamped_position(&self, from: usize, steps: u32) -> usize {
        self.skip_destination(from, steps as usize)
    }

    /// Where landing on `position` moves the player, for tiles that move
    /// them somewhere else.
    #[must_use]
    pub fn relocation_target(&self, position: usize) -> Option<usize> {
        let target = match &self.tiles.get(position)?.kind {
            TileKind::SlideBack {
                tiles_to_slide_back,
            } => position.checked_sub(*tiles_to_slide_back)?,
            TileKind::SkipForward { tiles_to_skip } => self.skip_destination(position, *tiles_to_skip),
            TileKind::Reset => 0,
            TileKind::GoToJail => self.jail?,
            _ => return None,
        };
        (target != position).then_some(target)
    }

    /// Reject any tile whose landing would chain more than `limit`
    /// further moves.
    pub fn check_chains(&self, limit: u32) -> Result<(), BoardError> {
        for tile in &self.tiles {
            let mut current = tile.position;
            let mut moves = 0;
            while let Some(next) = self.relocation_target(current) {
                moves += 1;
                if moves > limit {
                    return Err(BoardError::ChainTooLong {
                        position: tile.position,
                        limit,
                    });
                }
                current = next;
            }
        }
        Ok(())
    }

    /// Positions of every property in a color group, ascending.
    pub fn color_group_positions(&self, color: ColorGroup) -> impl Iterator<Item = usize> + '_ {
        self.tiles.iter().filter_map(move |tile| match &tile.kind {
            TileKind::Property(deed) if deed.color == color => Some(tile.position),
            _ => None,
        })
    }
}

impl TryFrom<BoardLayout> for Board {
    type Error = BoardError;

    fn try_from(layout: BoardLayout) -> Result<Self, Self::Error> {
        Board::new(layout.name, layout.tiles)
    }
}

impl From<Board> for BoardLayout {
    fn from(board: Board) -> Self {
        BoardLayout {
            name: board.name,
            tiles: board.tiles.into_iter().map(|tile| tile.kind).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PropertyDeed;

    fn ring(len: usize) -> Board {
        Board::new("ring", vec![TileKind::Normal; len]).unwrap()
    }

    #[test]
    fn test_empty_board_rejected() {
        assert_eq!(Board::new("empty", vec![]), Err(BoardError::Empty));
    }

    #[test]
    fn test_tile_at() {
        let board = ring(4);
        assert_eq!(board.tile_at(3).unwrap().position, 3);
        assert_eq!(
            board.tile_at(4),
            Err(BoardError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_tile_after_steps_wraps() {
        let board = ring(10);
        let from = board.tile_at(8).unwrap();

        assert_eq!(board.tile_after_steps(from, 3).unwrap().position, 1);
        assert_eq!(board.tile_after_steps(from, -9).unwrap().position, 9);
        assert_eq!(board.tile_after_steps(from, -30).unwrap().position, 8);
        assert_eq!(board.tile_after_steps(from, 0).unwrap().position, 8);
    }

    #[test]
    fn test_tile_after_steps_foreign_tile() {
        let board = ring(4);
        let stranger = Tile::new(9, TileKind::Normal);
        assert_eq!(
            board.tile_after_steps(&stranger, 1),
            Err(BoardError::IllegalTilePosition { position: 9 })
        );

        // Right position, wrong kind
        let impostor = Tile::new(1, TileKind::Jail);
        assert!(board.tile_after_steps(&impostor, 1).is_err());
    }

    #[test]
    fn test_slide_underflow_rejected() {
        let err = Board::new(
            "bad",
            vec![
                TileKind::Normal,
                TileKind::Normal,
                TileKind::SlideBack {
                    tiles_to_slide_back: 3,
                },
            ],
        )
        .unwrap_err();

        assert_eq!(err, BoardError::SlideUnderflow { position: 2, distance: 3 });
        assert!(err.is_layout());
    }

    #[test]
    fn test_zero_magnitude_rejected() {
        let err = Board::new(
            "bad",
            vec![TileKind::SkipForward { tiles_to_skip: 0 }, TileKind::Normal],
        )
        .unwrap_err();
        assert_eq!(err, BoardError::ZeroMagnitude { position: 0 });
    }

    #[test]
    fn test_skip_from_last_tile_rejected() {
        let err = Board::new(
            "bad",
            vec![TileKind::Normal, TileKind::SkipForward { tiles_to_skip: 2 }],
        )
        .unwrap_err();
        assert_eq!(err, BoardError::SkipFromLastTile { position: 1 });
    }

    #[test]
    fn test_check_chains() {
        // Ladder 1 -> 3 onto snake 3 -> 0
        let board = Board::new(
            "chain",
            vec![
                TileKind::Start,
                TileKind::SkipForward { tiles_to_skip: 2 },
                TileKind::Normal,
                TileKind::SlideBack {
                    tiles_to_slide_back: 3,
                },
                TileKind::Normal,
            ],
        )
        .unwrap();

        assert_eq!(board.relocation_target(1), Some(3));
        assert_eq!(board.relocation_target(3), Some(0));
        assert_eq!(board.relocation_target(2), None);
        assert_eq!(
            board.check_chains(1),
            Err(BoardError::ChainTooLong { position: 1, limit: 1 })
        );
        assert_eq!(board.check_chains(2), Ok(()));
    }

    #[test]
    fn test_check_chains_cycle() {
        // Ladder 1 -> 3 and snake 3 -> 1 bounce forever
        let board = Board::new(
            "loop",
            vec![
                TileKind::Normal,
                TileKind::SkipForward { tiles_to_skip: 2 },
                TileKind::Normal,
                TileKind::SlideBack {
                    tiles_to_slide_back: 2,
                },
                TileKind::Normal,
            ],
        )
        .unwrap();
        assert!(board.check_chains(5).is_err());
    }

    #[test]
    fn test_reset_at_start_does_not_chain() {
        let board = Board::new("reset", vec![TileKind::Reset, TileKind::Normal]).unwrap();
        assert_eq!(board.relocation_target(0), None);
        assert_eq!(board.check_chains(0), Ok(()));
    }

    #[test]
    fn test_start_only_at_zero() {
        assert!(Board::new("ok", vec![TileKind::Start, TileKind::Normal]).is_ok());
        assert_eq!(
            Board::new("bad", vec![TileKind::Normal, TileKind::Start]),
            Err(BoardError::MisplacedStart { position: 1 })
        );
    }

    #[test]
    fn test_go_to_jail_needs_jail() {
        assert_eq!(
            Board::new("bad", vec![TileKind::Start, TileKind::GoToJail]),
            Err(BoardError::MissingJail { position: 1 })
        );

        let board = Board::new(
            "ok",
            vec![TileKind::Start, TileKind::Jail, TileKind::GoToJail],
        )
        .unwrap();
        assert_eq!(board.jail_position(), Some(1));
    }

    #[test]
    fn test_from_tiles_any_order() {
        let board = Board::from_tiles(
            "shuffled",
            vec![
                Tile::new(2, TileKind::Jail),
                Tile::new(0, TileKind::Start),
                Tile::new(1, TileKind::Normal),
            ],
        )
        .unwrap();

        assert_eq!(board.tile_at(2).unwrap().kind, TileKind::Jail);
    }

    #[test]
    fn test_from_tiles_gaps_and_duplicates() {
        assert_eq!(
            Board::from_tiles(
                "gap",
                vec![Tile::new(0, TileKind::Normal), Tile::new(5, TileKind::Normal)],
            ),
            Err(BoardError::MissingTile { position: 1 })
        );
        assert_eq!(
            Board::from_tiles(
                "dup",
                vec![Tile::new(0, TileKind::Normal), Tile::new(0, TileKind::Normal)],
            ),
            Err(BoardError::DuplicateTile { position: 0 })
        );
    }

    #[test]
    fn test_skip_destination_clamps() {
        let board = ring(4);
        assert_eq!(board.skip_destination(2, 1), 3);
        assert_eq!(board.skip_destination(2, 50), 3);
        assert_eq!(board.clamped_position(1, 2), 3);
    }

    #[test]
    fn test_passes_start() {
        let board = ring(10);
        assert!(board.passes_start(8, 2));
        assert!(board.passes_start(8, 5));
        assert!(!board.passes_start(8, 1));
        assert!(!board.passes_start(3, -5));
    }

    #[test]
    fn test_color_group_positions() {
        let board = Board::new(
            "groups",
            vec![
                TileKind::Start,
                TileKind::Property(PropertyDeed::new("A", 60, 2, ColorGroup::Brown)),
                TileKind::Normal,
                TileKind::Property(PropertyDeed::new("B", 60, 4, ColorGroup::Brown)),
                TileKind::Property(PropertyDeed::new("C", 100, 6, ColorGroup::LightBlue)),
            ],
        )
        .unwrap();

        let browns: Vec<_> = board.color_group_positions(ColorGroup::Brown).collect();
        assert_eq!(browns, vec![1, 3]);
    }

    #[test]
    fn test_json_round_trip_validates() {
        let board = Board::new(
            "classic",
            vec![
                TileKind::Start,
                TileKind::SkipForward { tiles_to_skip: 2 },
                TileKind::Normal,
                TileKind::SlideBack {
                    tiles_to_slide_back: 3,
                },
            ],
        )
        .unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);

        let invalid = r#"{"name":"bad","tiles":[{"tileType":"snake","data":{"tilesToSlideBack":1}}]}"#;
        assert!(serde_json::from_str::<Board>(invalid).is_err());
    }
}

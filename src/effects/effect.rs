//! Tile effects.
//!
//! A `TileEffect` is what a tile does to the player standing on it,
//! worked out against the current board and ownership. Classification is
//! pure; applying the effect is the resolver's job.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError, Tile, TileKind};
use crate::core::{PlayerId, Roster};

/// Why an effect moved a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relocation {
    /// Snake: slid back.
    Slide,
    /// Ladder: skipped forward.
    Skip,
    /// Sent back to the start.
    Reset,
    /// Marched to the jail tile.
    ToJail,
}

impl std::fmt::Display for Relocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relocation::Slide => f.write_str("slid down a snake"),
            Relocation::Skip => f.write_str("climbed a ladder"),
            Relocation::Reset => f.write_str("went back to start"),
            Relocation::ToJail => f.write_str("was sent to jail"),
        }
    }
}

/// The single primary effect of a landing.
///
/// ## Movement
///
/// - `Relocate`: the player moves and resolution re-enters on `to`
///
/// ## Standing Effects
///
/// - `None`: nothing happens (normal, start, free parking, own property)
/// - `Imprison`: the player is jailed
/// - `OfferPurchase`: unowned property; someone else decides whether to buy
/// - `PayRent`: the lander owes `owner` rent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileEffect {
    None,
    Relocate { to: usize, cause: Relocation },
    Imprison { rounds: u32 },
    OfferPurchase { position: usize, price: u64 },
    PayRent { owner: PlayerId, amount: u64 },
}

impl TileEffect {
    /// Work out what `tile` does to `lander`.
    ///
    /// A relocation that would leave the player where they are (a reset
    /// tile at position 0) classifies as `None`. Rent doubles when the
    /// owner holds every deed of the color group.
    pub fn classify(
        board: &Board,
        tile: &Tile,
        roster: &Roster,
        lander: PlayerId,
        jail_rounds: u32,
    ) -> Result<Self, BoardError> {
        let position = tile.position;
        let relocate = |to: usize, cause: Relocation| {
            if to == position {
                TileEffect::None
            } else {
                TileEffect::Relocate { to, cause }
            }
        };

        let effect = match &tile.kind {
            TileKind::Normal | TileKind::Start | TileKind::FreeParking => TileEffect::None,

            TileKind::SlideBack {
                tiles_to_slide_back,
            } => {
                let steps = -(*tiles_to_slide_back as i64);
                relocate(board.tile_after_steps(tile, steps)?.position, Relocation::Slide)
            }

            TileKind::SkipForward { tiles_to_skip } => {
                board.tile_at(position)?;
                relocate(board.skip_destination(position, *tiles_to_skip), Relocation::Skip)
            }

            TileKind::Reset => relocate(0, Relocation::Reset),

            TileKind::Jail => TileEffect::Imprison {
                rounds: jail_rounds,
            },

            TileKind::GoToJail => {
                let jail = board
                    .jail_position()
                    .ok_or(BoardError::MissingJail { position })?;
                relocate(jail, Relocation::ToJail)
            }

            TileKind::Property(deed) => match roster.owner_of(position) {
                None => TileEffect::OfferPurchase {
                    position,
                    price: deed.price,
                },
                Some(owner) if owner == lander => TileEffect::None,
                Some(owner) => {
                    let monopoly = roster.holds_all(owner, board.color_group_positions(deed.color));
                    let amount = if monopoly {
                        deed.rent.saturating_mul(2)
                    } else {
                        deed.rent
                    };
                    TileEffect::PayRent { owner, amount }
                }
            },
        };

        Ok(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ColorGroup, PropertyDeed};
    use crate::core::{Figure, Player};

    fn board() -> Board {
        Board::new(
            "test",
            vec![
                TileKind::Reset,
                TileKind::Property(PropertyDeed::new("Old Kent Road", 60, 2, ColorGroup::Brown)),
                TileKind::Jail,
                TileKind::Property(PropertyDeed::new("Whitechapel", 60, 4, ColorGroup::Brown)),
                TileKind::SlideBack {
                    tiles_to_slide_back: 2,
                },
                TileKind::SkipForward { tiles_to_skip: 9 },
                TileKind::GoToJail,
                TileKind::Normal,
            ],
        )
        .unwrap()
    }

    fn roster() -> Roster {
        [
            Player::new(PlayerId::new(1), "Ann", Figure::Dog),
            Player::new(PlayerId::new(2), "Ben", Figure::Iron),
        ]
        .into_iter()
        .collect()
    }

    fn classify(board: &Board, roster: &Roster, position: usize) -> TileEffect {
        let tile = board.tile_at(position).unwrap();
        TileEffect::classify(board, tile, roster, PlayerId::new(1), 3).unwrap()
    }

    #[test]
    fn test_movement_effects() {
        let board = board();
        let roster = roster();

        assert_eq!(
            classify(&board, &roster, 4),
            TileEffect::Relocate { to: 2, cause: Relocation::Slide }
        );
        assert_eq!(
            classify(&board, &roster, 5),
            TileEffect::Relocate { to: 7, cause: Relocation::Skip }
        );
        assert_eq!(
            classify(&board, &roster, 6),
            TileEffect::Relocate { to: 2, cause: Relocation::ToJail }
        );
    }

    #[test]
    fn test_reset_at_start_is_noop() {
        let board = board();
        assert_eq!(classify(&board, &roster(), 0), TileEffect::None);
    }

    #[test]
    fn test_jail() {
        assert_eq!(classify(&board(), &roster(), 2), TileEffect::Imprison { rounds: 3 });
    }

    #[test]
    fn test_property_ownership() {
        let board = board();
        let mut roster = roster();

        assert_eq!(
            classify(&board, &roster, 1),
            TileEffect::OfferPurchase { position: 1, price: 60 }
        );

        roster.player_mut(PlayerId::new(1)).unwrap().add_property(1);
        assert_eq!(classify(&board, &roster, 1), TileEffect::None);

        roster.player_mut(PlayerId::new(1)).unwrap().release_properties();
        roster.player_mut(PlayerId::new(2)).unwrap().add_property(1);
        assert_eq!(
            classify(&board, &roster, 1),
            TileEffect::PayRent { owner: PlayerId::new(2), amount: 2 }
        );
    }

    #[test]
    fn test_full_color_group_doubles_rent() {
        let board = board();
        let mut roster = roster();
        let ben = roster.player_mut(PlayerId::new(2)).unwrap();
        ben.add_property(1);
        ben.add_property(3);

        assert_eq!(
            classify(&board, &roster, 3),
            TileEffect::PayRent { owner: PlayerId::new(2), amount: 8 }
        );
    }
}

//! Board arithmetic and layout validation tests.
//!
//! Property tests pin the movement laws for arbitrary board sizes;
//! the rest check layout validation and tile serialization.

use proptest::prelude::*;

use rust_boardgame::board::{Board, BoardError, ColorGroup, PropertyDeed, TileKind};

fn ring(len: usize) -> Board {
    Board::new("ring", vec![TileKind::Normal; len]).unwrap()
}

proptest! {
    /// Landing positions always fall inside the board.
    #[test]
    fn prop_tile_after_steps_in_range(
        len in 1usize..200,
        start in 0usize..200,
        steps in -10_000i64..10_000,
    ) {
        let board = ring(len);
        let from = board.tile_at(start % len).unwrap();

        let to = board.tile_after_steps(from, steps).unwrap();
        prop_assert!(to.position < len);
    }

    /// Moving s1 then s2 lands where moving s1 + s2 does.
    #[test]
    fn prop_tile_after_steps_composes(
        len in 1usize..200,
        start in 0usize..200,
        s1 in -1_000i64..1_000,
        s2 in -1_000i64..1_000,
    ) {
        let board = ring(len);
        let from = board.tile_at(start % len).unwrap();

        let stepwise = board.tile_after_steps(board.tile_after_steps(from, s1).unwrap(), s2).unwrap();
        let direct = board.tile_after_steps(from, s1 + s2).unwrap();
        prop_assert_eq!(stepwise.position, direct.position);
    }

    /// A snake that fits behind its tile is accepted; one that does not is rejected.
    #[test]
    fn prop_slide_back_validation(index in 0usize..120, distance in 1usize..=100) {
        let mut kinds = vec![TileKind::Normal; 121];
        kinds[index] = TileKind::SlideBack { tiles_to_slide_back: distance };

        let result = Board::new("snakes", kinds);
        if distance <= index {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(BoardError::SlideUnderflow { position: index, distance }));
        }
    }
}

/// Every distance from 1 to 100 is accepted at the last index of a 101-tile board.
#[test]
fn test_slide_back_full_range() {
    for distance in 1..=100 {
        let mut kinds = vec![TileKind::Normal; 101];
        kinds[100] = TileKind::SlideBack {
            tiles_to_slide_back: distance,
        };
        assert!(Board::new("snakes", kinds).is_ok(), "distance {distance}");
    }
}

/// Negative indexes cannot be expressed, and indexes past the end fail.
#[test]
fn test_tile_at_out_of_range() {
    let board = ring(3);
    assert_eq!(
        board.tile_at(3).unwrap_err(),
        BoardError::IndexOutOfRange { index: 3, len: 3 }
    );
}

/// Layout errors name the offending index.
#[test]
fn test_layout_errors_name_index() {
    let err = Board::new(
        "bad",
        vec![
            TileKind::Start,
            TileKind::Normal,
            TileKind::Normal,
            TileKind::SlideBack {
                tiles_to_slide_back: 4,
            },
        ],
    )
    .unwrap_err();

    assert!(err.is_layout());
    assert!(err.to_string().contains('3'));
}

/// Normal, Snake(5) and Ladder(5) survive a JSON round trip unchanged.
#[test]
fn test_tile_round_trip() {
    for kind in [
        TileKind::Normal,
        TileKind::SlideBack {
            tiles_to_slide_back: 5,
        },
        TileKind::SkipForward { tiles_to_skip: 5 },
    ] {
        let json = serde_json::to_string(&kind).unwrap();
        let back: TileKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, kind);
    }
}

/// Every tile kind round-trips, including the property payload.
#[test]
fn test_all_tile_kinds_round_trip() {
    let kinds = vec![
        TileKind::Start,
        TileKind::Reset,
        TileKind::Jail,
        TileKind::GoToJail,
        TileKind::FreeParking,
        TileKind::Property(PropertyDeed::new("Vine Street", 200, 16, ColorGroup::Orange)),
    ];
    let board = Board::new("all", kinds).unwrap();

    let json = serde_json::to_string_pretty(&board).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();

    assert_eq!(back, board);
    assert_eq!(back.jail_position(), Some(2));
}

/// The persisted format uses the documented tag and payload names.
#[test]
fn test_snake_wire_format() {
    let parsed: TileKind =
        serde_json::from_str(r#"{ "tileType": "snake", "data": { "tilesToSlideBack": 10 } }"#).unwrap();
    assert_eq!(
        parsed,
        TileKind::SlideBack {
            tiles_to_slide_back: 10
        }
    );
}

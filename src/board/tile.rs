//! Tiles and the closed set of tile kinds.
//!
//! ## Serialization
//!
//! `TileKind` is adjacently tagged so that persisted boards carry a
//! discriminator plus a variant payload:
//!
//! ```json
//! { "tileType": "snake", "data": { "tilesToSlideBack": 10 } }
//! { "tileType": "ladder", "data": { "tilesToSkip": 4 } }
//! { "tileType": "normal" }
//! ```

use serde::{Deserialize, Serialize};

/// Property color groups. Owning a whole group doubles its rent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
    Railroad,
    Utility,
}

/// A purchasable deed printed on a property tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDeed {
    pub name: String,
    pub price: u64,
    pub rent: u64,
    pub color: ColorGroup,
}

impl PropertyDeed {
    pub fn new(name: impl Into<String>, price: u64, rent: u64, color: ColorGroup) -> Self {
        Self {
            name: name.into(),
            price,
            rent,
            color,
        }
    }
}

/// What happens to a player who lands on a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tileType", content = "data", rename_all = "camelCase")]
pub enum TileKind {
    /// Nothing happens.
    Normal,

    /// The first tile. Only valid at position 0.
    Start,

    /// Move back a fixed number of tiles.
    #[serde(rename = "snake", rename_all = "camelCase")]
    SlideBack { tiles_to_slide_back: usize },

    /// Move forward a fixed number of tiles, stopping at the last tile.
    #[serde(rename = "ladder", rename_all = "camelCase")]
    SkipForward { tiles_to_skip: usize },

    /// Back to position 0.
    Reset,

    /// Landing here locks the player up.
    Jail,

    /// Sends the player to the jail tile.
    GoToJail,

    FreeParking,

    Property(PropertyDeed),
}

impl TileKind {
    /// Short lowercase label for logs and display text.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TileKind::Normal => "normal",
            TileKind::Start => "start",
            TileKind::SlideBack { .. } => "snake",
            TileKind::SkipForward { .. } => "ladder",
            TileKind::Reset => "reset",
            TileKind::Jail => "jail",
            TileKind::GoToJail => "go to jail",
            TileKind::FreeParking => "free parking",
            TileKind::Property(_) => "property",
        }
    }

    /// Check if landing here can move the player again.
    #[must_use]
    pub fn relocates(&self) -> bool {
        matches!(
            self,
            TileKind::SlideBack { .. }
                | TileKind::SkipForward { .. }
                | TileKind::Reset
                | TileKind::GoToJail
        )
    }

    /// The deed, for property tiles.
    #[must_use]
    pub fn deed(&self) -> Option<&PropertyDeed> {
        match self {
            TileKind::Property(deed) => Some(deed),
            _ => None,
        }
    }
}

/// One position on a board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub position: usize,
    pub kind: TileKind,
}

impl Tile {
    #[must_use]
    pub fn new(position: usize, kind: TileKind) -> Self {
        Self { position, kind }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TileKind::Property(deed) => write!(f, "{} ({})", deed.name, self.position),
            kind => write!(f, "{} ({})", kind.label(), self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_json_shape() {
        let json = serde_json::to_value(TileKind::SlideBack {
            tiles_to_slide_back: 10,
        })
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "tileType": "snake", "data": { "tilesToSlideBack": 10 } })
        );
    }

    #[test]
    fn test_ladder_json_shape() {
        let json = serde_json::to_value(TileKind::SkipForward { tiles_to_skip: 4 }).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "tileType": "ladder", "data": { "tilesToSkip": 4 } })
        );
    }

    #[test]
    fn test_unit_variant_json_shape() {
        let json = serde_json::to_value(TileKind::GoToJail).unwrap();
        assert_eq!(json, serde_json::json!({ "tileType": "goToJail" }));

        let parsed: TileKind = serde_json::from_str(r#"{"tileType":"freeParking"}"#).unwrap();
        assert_eq!(parsed, TileKind::FreeParking);
    }

    #[test]
    fn test_property_round_trip() {
        let kind = TileKind::Property(PropertyDeed::new("Boardwalk", 400, 50, ColorGroup::DarkBlue));

        let json = serde_json::to_string(&kind).unwrap();
        let back: TileKind = serde_json::from_str(&json).unwrap();

        assert_eq!(back, kind);
        assert_eq!(back.deed().unwrap().color, ColorGroup::DarkBlue);
    }

    #[test]
    fn test_relocates() {
        assert!(TileKind::Reset.relocates());
        assert!(TileKind::SkipForward { tiles_to_skip: 1 }.relocates());
        assert!(!TileKind::Jail.relocates());
        assert!(!TileKind::Normal.relocates());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Tile::new(3, TileKind::Jail)), "jail (3)");
        let deed = PropertyDeed::new("Park Place", 350, 35, ColorGroup::DarkBlue);
        assert_eq!(format!("{}", Tile::new(7, TileKind::Property(deed))), "Park Place (7)");
    }
}

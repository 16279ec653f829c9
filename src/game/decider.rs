//! Purchase decisions.
//!
//! The resolver only reports that a property can be bought. Whether the
//! player buys is decided by a `PurchaseDecider` injected into the game:
//! a UI prompt, a bot, or one of the fixed policies below.

use crate::board::PropertyDeed;
use crate::core::Player;

/// Decides whether a player buys the property they landed on.
///
/// Implemented for any `FnMut(&Player, &PropertyDeed) -> bool`.
pub trait PurchaseDecider {
    /// Only asked when the player can afford the deed.
    fn wants_to_buy(&mut self, player: &Player, deed: &PropertyDeed) -> bool;
}

impl<F> PurchaseDecider for F
where
    F: FnMut(&Player, &PropertyDeed) -> bool,
{
    fn wants_to_buy(&mut self, player: &Player, deed: &PropertyDeed) -> bool {
        self(player, deed)
    }
}

/// Buys everything affordable.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysBuy;

impl PurchaseDecider for AlwaysBuy {
    fn wants_to_buy(&mut self, _player: &Player, _deed: &PropertyDeed) -> bool {
        true
    }
}

/// Never buys; the host calls `Game::purchase_property` itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverBuy;

impl PurchaseDecider for NeverBuy {
    fn wants_to_buy(&mut self, _player: &Player, _deed: &PropertyDeed) -> bool {
        false
    }
}

//! Game sessions.
//!
//! - `GameBuilder`: wires board, dice, bus, rules and purchase decider
//! - `Game`: owns a session and plays turns
//! - `GameSnapshot`: serializable state for save/resume
//! - `PurchaseDecider`: injected buy/skip policy

mod builder;
mod decider;
mod error;
mod session;
mod snapshot;

pub use builder::GameBuilder;
pub use decider::{AlwaysBuy, NeverBuy, PurchaseDecider};
pub use error::GameError;
pub use session::{Game, TurnOutcome, TurnReport};
pub use snapshot::GameSnapshot;

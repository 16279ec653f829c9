//! Turn rotation.

mod manager;

pub use manager::{TurnError, TurnManager};

//! Persistence: repositories, snapshots and roster files.
//!
//! The engine treats boards and games as plain values. This module moves
//! them in and out of storage:
//!
//! - `Repository<T>`: the two-operation contract (`load_all` / `save_all`)
//! - `InMemoryRepository` / `JsonFileRepository`: implementations
//! - `GameSnapshot::to_bytes` / `save_snapshot`: bincode save games
//! - `parse_roster` / `load_roster`: CSV player lists

mod error;
mod json;
mod repository;
mod roster;
mod snapshot;

pub use error::{RepositoryError, Result};
pub use json::JsonFileRepository;
pub use repository::{InMemoryRepository, Repository};
pub use roster::{load_roster, parse_roster};
pub use snapshot::{load_snapshot, save_snapshot};

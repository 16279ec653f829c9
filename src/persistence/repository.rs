//! Repository contract and the in-memory implementation.

use std::sync::RwLock;

use super::error::{RepositoryError, Result};

/// Loads and saves a whole collection of `T`.
///
/// The engine only ever needs these two operations; storage format and
/// location belong to the implementation.
pub trait Repository<T>: Send + Sync {
    /// Load every stored item. An empty store yields an empty vector.
    fn load_all(&self) -> Result<Vec<T>>;

    /// Replace the stored collection with `items`.
    fn save_all(&self, items: &[T]) -> Result<()>;
}

/// Repository kept in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryRepository<T> {
    items: RwLock<Vec<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

impl<T: Clone + Send + Sync> Repository<T> for InMemoryRepository<T> {
    fn load_all(&self) -> Result<Vec<T>> {
        let items = self.items.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(items.clone())
    }

    fn save_all(&self, items: &[T]) -> Result<()> {
        let mut current = self.items.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *current = items.to_vec();
        Ok(())
    }
}

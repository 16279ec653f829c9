//! JSON file repository.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::Result;
use super::repository::Repository;

/// Stores a collection as one pretty-printed JSON array.
///
/// Saving rewrites the whole file through a temporary file and a rename,
/// so a crash mid-save leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonFileRepository<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileRepository<T> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> Repository<T> for JsonFileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load_all(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let bytes = fs::read(&self.path)?;
        let items: Vec<T> = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %self.path.display(), count = items.len(), "loaded");
        Ok(items)
    }

    fn save_all(&self, items: &[T]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(items)?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = items.len(), "saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, TileKind};

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo: JsonFileRepository<Board> = JsonFileRepository::new(dir.path().join("none.json"));
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_board_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("nested/boards.json"));
        let board = Board::new(
            "tiny",
            vec![
                TileKind::Start,
                TileKind::SkipForward { tiles_to_skip: 1 },
                TileKind::Normal,
            ],
        )
        .unwrap();

        repo.save_all(std::slice::from_ref(&board)).unwrap();
        let loaded: Vec<Board> = repo.load_all().unwrap();

        assert_eq!(loaded, vec![board]);
        assert!(!dir.path().join("nested/boards.json.tmp").exists());
    }

    #[test]
    fn test_invalid_board_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boards.json");
        fs::write(
            &path,
            r#"[{"name":"bad","tiles":[{"tileType":"snake","data":{"tilesToSlideBack":4}}]}]"#,
        )
        .unwrap();

        let repo: JsonFileRepository<Board> = JsonFileRepository::new(&path);
        assert!(repo.load_all().is_err());
    }
}

//! Plain-text best score file for native builds

use std::path::PathBuf;

use super::{ScoreStore, parse_best_score};

/// Stores the best score as a bare integer in a file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileStore {
    fn load_best_score(&self) -> u64 {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => parse_best_score(&raw),
            Err(_) => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                0
            }
        }
    }

    fn save_best_score(&mut self, score: u64) {
        match std::fs::write(&self.path, score.to_string()) {
            Ok(()) => log::info!("Best score {score} saved to {}", self.path.display()),
            Err(err) => log::warn!("Failed to save best score to {}: {err}", self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let path = std::env::temp_dir().join(format!("jumper-best-{}.txt", std::process::id()));
        let mut store = FileStore::new(&path);
        store.save_best_score(31);
        assert_eq!(FileStore::new(&path).load_best_score(), 31);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let store = FileStore::new("/nonexistent/jumper/best.txt");
        assert_eq!(store.load_best_score(), 0);
    }
}

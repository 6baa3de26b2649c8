//! Best score persistence
//!
//! The engine reads the stored best once at construction and writes it back
//! synchronously when a run ends with a new best. Stores never fail loudly:
//! unreadable data loads as 0 and write errors are logged.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

use std::cell::Cell;
use std::rc::Rc;

/// Best score collaborator
pub trait ScoreStore {
    fn load_best_score(&self) -> u64;
    fn save_best_score(&mut self, score: u64);
}

/// Store that remembers nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl ScoreStore for NoStore {
    fn load_best_score(&self) -> u64 {
        0
    }

    fn save_best_score(&mut self, _score: u64) {}
}

/// In-process store. Clones share the same slot, so a caller can keep a
/// handle after giving one to the engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Rc<Cell<u64>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryStore {
    pub fn with_best(best: u64) -> Self {
        let store = Self::default();
        store.best.set(best);
        store
    }

    pub fn best(&self) -> u64 {
        self.best.get()
    }

    /// Number of writes performed
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&self) -> u64 {
        self.best.get()
    }

    fn save_best_score(&mut self, score: u64) {
        self.best.set(score);
        self.saves.set(self.saves.get() + 1);
    }
}

/// Parse a stored best score, treating garbage as no score
pub fn parse_best_score(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_shares_slot() {
        let store = MemoryStore::with_best(7);
        let mut engine_side = store.clone();
        assert_eq!(engine_side.load_best_score(), 7);
        engine_side.save_best_score(12);
        assert_eq!(store.best(), 12);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_parse_best_score() {
        assert_eq!(parse_best_score("42"), 42);
        assert_eq!(parse_best_score(" 42\n"), 42);
        assert_eq!(parse_best_score(""), 0);
        assert_eq!(parse_best_score("-3"), 0);
        assert_eq!(parse_best_score("abc"), 0);
    }
}

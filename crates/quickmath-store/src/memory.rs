//! In-memory store for tests and throwaway sessions.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use quickmath_core::model::BestScores;
use quickmath_core::traits::ScoreStore;

/// A `ScoreStore` that keeps scores in memory and counts saves.
#[derive(Default)]
pub struct MemoryStore {
    scores: Mutex<Option<BestScores>>,
    save_count: AtomicU32,
}

impl MemoryStore {
    /// An empty store, as on first run.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `scores`.
    pub fn with_scores(scores: BestScores) -> Self {
        Self {
            scores: Mutex::new(Some(scores)),
            save_count: AtomicU32::new(0),
        }
    }

    /// The most recently saved scores.
    pub fn snapshot(&self) -> Option<BestScores> {
        self.scores.lock().unwrap().clone()
    }

    /// Number of saves made to this store.
    pub fn save_count(&self) -> u32 {
        self.save_count.load(Ordering::Relaxed)
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<BestScores>> {
        Ok(self.snapshot())
    }

    fn save(&self, scores: &BestScores) -> anyhow::Result<()> {
        self.save_count.fetch_add(1, Ordering::Relaxed);
        *self.scores.lock().unwrap() = Some(scores.clone());
        Ok(())
    }
}

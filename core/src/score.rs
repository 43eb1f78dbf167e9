use alloc::collections::BTreeMap;

use crate::Difficulty;

/// Best (fewest) move count per difficulty, kept across sessions.
pub trait ScoreStore {
    fn best(&self, difficulty: Difficulty) -> Option<u32>;
    fn set_best(&mut self, difficulty: Difficulty, moves: u32);
}

impl<T: ScoreStore + ?Sized> ScoreStore for &mut T {
    fn best(&self, difficulty: Difficulty) -> Option<u32> {
        (**self).best(difficulty)
    }

    fn set_best(&mut self, difficulty: Difficulty, moves: u32) {
        (**self).set_best(difficulty, moves)
    }
}

/// Writes `moves` as the new best when it beats the stored value or nothing is stored yet. Returns whether the store
/// was written.
pub fn record_best<S: ScoreStore + ?Sized>(store: &mut S, difficulty: Difficulty, moves: u32) -> bool {
    match store.best(difficulty) {
        Some(best) if moves >= best => {
            log::debug!("{} finished in {} moves, best stays {}", difficulty, moves, best);
            false
        }
        previous => {
            log::debug!("new {} best: {} moves (was {:?})", difficulty, moves, previous);
            store.set_best(difficulty, moves);
            true
        }
    }
}

/// Volatile store, for tests and headless use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    best: BTreeMap<Difficulty, u32>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(mut self, difficulty: Difficulty, moves: u32) -> Self {
        self.best.insert(difficulty, moves);
        self
    }
}

impl ScoreStore for MemoryScoreStore {
    fn best(&self, difficulty: Difficulty) -> Option<u32> {
        self.best.get(&difficulty).copied()
    }

    fn set_best(&mut self, difficulty: Difficulty, moves: u32) {
        self.best.insert(difficulty, moves);
    }
}

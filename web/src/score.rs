use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use pairflip_core::{Difficulty, ScoreStore};

/// Best scores kept in the browser's local storage, one entry per difficulty.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalScoreStore;

impl LocalScoreStore {
    const KEY_PREFIX: &'static str = "pairflip:best";

    pub(crate) fn key(difficulty: Difficulty) -> String {
        format!("{}:{}", Self::KEY_PREFIX, difficulty.name())
    }
}

impl ScoreStore for LocalScoreStore {
    fn best(&self, difficulty: Difficulty) -> Option<u32> {
        match LocalStorage::get(Self::key(difficulty)) {
            Ok(moves) => Some(moves),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                log::warn!("Ignoring unreadable {} best score: {:?}", difficulty, err);
                None
            }
        }
    }

    fn set_best(&mut self, difficulty: Difficulty, moves: u32) {
        if let Err(err) = LocalStorage::set(Self::key(difficulty), moves) {
            log::error!("Could not save {} best score: {:?}", difficulty, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_per_difficulty() {
        assert_eq!(LocalScoreStore::key(Difficulty::Easy), "pairflip:best:easy");
        assert_eq!(LocalScoreStore::key(Difficulty::Hard), "pairflip:best:hard");
    }

    #[cfg(target_arch = "wasm32")]
    mod browser {
        use super::*;
        use pairflip_core::record_best;
        use wasm_bindgen_test::*;

        wasm_bindgen_test_configure!(run_in_browser);

        #[wasm_bindgen_test]
        fn missing_score_reads_as_none() {
            LocalStorage::delete(LocalScoreStore::key(Difficulty::Hard));
            assert_eq!(LocalScoreStore.best(Difficulty::Hard), None);
        }

        #[wasm_bindgen_test]
        fn best_score_round_trips_through_local_storage() {
            LocalStorage::delete(LocalScoreStore::key(Difficulty::Easy));
            let mut store = LocalScoreStore;

            assert!(record_best(&mut store, Difficulty::Easy, 10));
            assert!(record_best(&mut store, Difficulty::Easy, 8));
            assert!(!record_best(&mut store, Difficulty::Easy, 12));
            assert_eq!(store.best(Difficulty::Easy), Some(8));
        }

        #[wasm_bindgen_test]
        fn garbage_entry_is_ignored() {
            LocalStorage::raw()
                .set_item(&LocalScoreStore::key(Difficulty::Easy), "not a number")
                .unwrap();
            assert_eq!(LocalScoreStore.best(Difficulty::Easy), None);
        }
    }
}

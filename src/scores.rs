//! Best/last score bookkeeping
//!
//! Read at session start and written whenever a new run begins.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, keys};

/// Scores carried between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub best: u32,
    pub last: u32,
    pub last_run_was_win: bool,
}

impl ScoreRecord {
    /// Whether finishing a winning run with `score` beats an existing record.
    /// The very first scored run sets the record without announcing it.
    pub fn is_new_best(&self, score: u32) -> bool {
        self.best > 0 && score > self.best
    }

    /// Record a finished run. Runs scoring nothing are not recorded; only won
    /// runs can set the best score. Returns whether the best score changed.
    pub fn record_run(&mut self, score: u32, won: bool) -> bool {
        if score == 0 {
            return false;
        }
        self.last = score;
        self.last_run_was_win = won;
        if won && score > self.best {
            self.best = score;
            return true;
        }
        false
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        let read = |key: &str| {
            store
                .get_int(key)
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(0)
        };
        Self {
            best: read(keys::SCORE_BEST),
            last: read(keys::SCORE_LAST),
            last_run_was_win: store.get_bool(keys::LAST_RUN_WAS_WIN).unwrap_or(false),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.set_int(keys::SCORE_BEST, i64::from(self.best));
        store.set_int(keys::SCORE_LAST, i64::from(self.last));
        store.set_bool(keys::LAST_RUN_WAS_WIN, self.last_run_was_win);
        log::info!("Scores saved (best {}, last {})", self.best, self.last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_zero_score_not_recorded() {
        let mut record = ScoreRecord::default();
        assert!(!record.record_run(0, true));
        assert_eq!(record, ScoreRecord::default());
    }

    #[test]
    fn test_loss_never_sets_best() {
        let mut record = ScoreRecord::default();
        assert!(!record.record_run(50, false));
        assert_eq!(record.best, 0);
        assert_eq!(record.last, 50);
        assert!(!record.last_run_was_win);
    }

    #[test]
    fn test_win_sets_best() {
        let mut record = ScoreRecord::default();
        assert!(record.record_run(20, true));
        assert!(!record.record_run(10, true));
        assert_eq!(record.best, 20);
        assert_eq!(record.last, 10);
    }

    #[test]
    fn test_is_new_best() {
        let mut record = ScoreRecord::default();
        assert!(!record.is_new_best(10));
        record.record_run(10, true);
        assert!(record.is_new_best(11));
        assert!(!record.is_new_best(10));
    }

    #[test]
    fn test_store_round_trip() {
        let mut store = MemoryStore::new();
        let record = ScoreRecord {
            best: 30,
            last: 12,
            last_run_was_win: false,
        };
        record.save(&mut store);
        assert_eq!(ScoreRecord::load(&store), record);
    }

    #[test]
    fn test_negative_stored_value_reads_as_zero() {
        let mut store = MemoryStore::new();
        store.set_int(keys::SCORE_BEST, -4);
        assert_eq!(ScoreRecord::load(&store).best, 0);
    }
}

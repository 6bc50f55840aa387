//! Key-value persistence seam
//!
//! The storage mechanism belongs to the host application. The core only needs
//! booleans and integers under fixed keys; `MemoryStore` is the in-process
//! implementation, serializable to JSON for hosts that persist a blob.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Persisted preference keys
pub mod keys {
    pub const BALL_ROTATION: &str = "BallRotation";
    pub const BALL_GRAVITY: &str = "BallGravity";
    pub const DIFFICULTY_HARD: &str = "DifficultyHard";
    pub const SCORE_BEST: &str = "ScoreBest";
    pub const SCORE_LAST: &str = "ScoreLast";
    pub const LAST_RUN_WAS_WIN: &str = "IsPlayerWithLastScoreWin";
}

/// Storage for persisted preferences
pub trait KeyValueStore {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_int(&self, key: &str) -> Option<i64>;
    fn set_bool(&mut self, key: &str, value: bool);
    fn set_int(&mut self, key: &str, value: i64);
}

/// In-memory store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.values).unwrap_or_else(|e| {
            log::warn!("Failed to serialize preferences: {}", e);
            "{}".to_string()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let values = serde_json::from_str(json)?;
        Ok(Self { values })
    }

    /// Parse a JSON blob, starting fresh when it is missing or corrupt
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(store)) => {
                log::info!("Loaded {} preferences", store.len());
                store
            }
            Some(Err(e)) => {
                log::warn!("Discarding unreadable preferences: {}", e);
                Self::new()
            }
            None => {
                log::info!("No preferences found, starting fresh");
                Self::new()
            }
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_string(), Value::Bool(value));
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), Value::from(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_access() {
        let mut store = MemoryStore::new();
        store.set_bool(keys::BALL_GRAVITY, true);
        store.set_int(keys::SCORE_BEST, 42);

        assert_eq!(store.get_bool(keys::BALL_GRAVITY), Some(true));
        assert_eq!(store.get_int(keys::SCORE_BEST), Some(42));
        // Wrong type reads as missing
        assert_eq!(store.get_int(keys::BALL_GRAVITY), None);
        assert_eq!(store.get_bool(keys::SCORE_LAST), None);
    }

    #[test]
    fn test_json_round_trip() {
        let mut store = MemoryStore::new();
        store.set_bool(keys::DIFFICULTY_HARD, true);
        store.set_int(keys::SCORE_LAST, 17);

        let restored = MemoryStore::from_json(&store.to_json()).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn test_corrupt_json_falls_back() {
        let store = MemoryStore::load_or_default(Some("{not json"));
        assert!(store.is_empty());
        assert!(MemoryStore::load_or_default(None).is_empty());
    }
}

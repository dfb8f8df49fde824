use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};

use crate::*;

/// Key-value persistence the best times are written to.
pub trait KeyValueStore {
    /// Returns `None` when the key is absent or storage cannot be read.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError>;
}

/// In-memory store, used when no persistent storage is available.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Lowest completion time per difficulty, in seconds.
#[derive(Clone, Debug, Default)]
pub struct BestTimes<S> {
    store: S,
}

impl<S: KeyValueStore> BestTimes<S> {
    pub const KEY_PREFIX: &'static str = "mm_best_time_";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn key(difficulty: Difficulty) -> String {
        format!("{}{}", Self::KEY_PREFIX, difficulty.name())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self, difficulty: Difficulty) -> Option<u32> {
        let key = Self::key(difficulty);
        let raw = self.store.get(&key)?;
        match raw.trim().parse() {
            Ok(secs) => Some(secs),
            Err(_) => {
                log::warn!("ignoring unreadable best time {:?} under {}", raw, key);
                None
            }
        }
    }

    /// Stores `secs` when there is no record yet or it beats the record.
    ///
    /// Returns whether a new record was written.
    pub fn record_if_better(&mut self, difficulty: Difficulty, secs: u32) -> bool {
        if self.load(difficulty).is_some_and(|best| best <= secs) {
            return false;
        }

        let key = Self::key(difficulty);
        match self.store.set(&key, &secs.to_string()) {
            Ok(()) => {
                log::info!("new best time for {}: {}s", difficulty, secs);
                true
            }
            Err(err) => {
                log::warn!("could not save best time under {}: {}", key, err);
                false
            }
        }
    }
}

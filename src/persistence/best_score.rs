//! The one persisted scalar
//!
//! Stored as a plain decimal string, readable by the original web build.

use super::{KeyValueStore, StoreError};
use crate::consts::BEST_SCORE_KEY;

/// Read the best score. Anything that goes wrong counts as "no best yet".
pub fn load_best(store: &impl KeyValueStore) -> u32 {
    match read_best(store) {
        Ok(Some(best)) => {
            log::info!("Loaded best score {}", best);
            best
        }
        Ok(None) => {
            log::info!("No best score found, starting fresh");
            0
        }
        Err(e) => {
            log::warn!("Could not read best score ({}), using 0", e);
            0
        }
    }
}

fn read_best(store: &impl KeyValueStore) -> Result<Option<u32>, StoreError> {
    let Some(raw) = store.get(BEST_SCORE_KEY)? else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|_| StoreError::Malformed {
            key: BEST_SCORE_KEY.to_string(),
            value: raw,
        })
}

pub fn save_best(store: &mut impl KeyValueStore, best: u32) -> Result<(), StoreError> {
    store.set(BEST_SCORE_KEY, &best.to_string())?;
    log::info!("Best score saved ({})", best);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Read {
                key: key.to_string(),
                reason: "SecurityError".to_string(),
            })
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_missing_is_zero() {
        assert_eq!(load_best(&MemoryStore::new()), 0);
    }

    #[test]
    fn test_reads_legacy_string() {
        let store = MemoryStore::new().with_value(BEST_SCORE_KEY, "12");
        assert_eq!(load_best(&store), 12);
    }

    #[test]
    fn test_garbage_and_failures_are_zero() {
        let store = MemoryStore::new().with_value(BEST_SCORE_KEY, "lots");
        assert_eq!(load_best(&store), 0);
        let store = MemoryStore::new().with_value(BEST_SCORE_KEY, "-3");
        assert_eq!(load_best(&store), 0);
        assert_eq!(load_best(&BrokenStore), 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        save_best(&mut store, 31).unwrap();
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("31"));
        assert_eq!(load_best(&store), 31);
        assert!(save_best(&mut BrokenStore, 1).is_err());
    }
}

//! Side-table of the raw JSON of decoded objects.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::tweet::StatusId;
use crate::types::JsonValue;
use crate::user::UserId;

/// Identifies a top-level object registered in a `JsonStore`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StoreKey {
    User(UserId),
    Tweet(StatusId),
}

/// Records the raw JSON of objects as they are decoded by a `Decoder`.
///
/// Registering an object under a key that is already present replaces the previous JSON.
pub trait JsonStore: Send + Sync {
    fn register(&self, key: StoreKey, json: &JsonValue);

    fn get(&self, key: StoreKey) -> Option<JsonValue>;

    fn clear(&self);
}

/// A `JsonStore` keeping everything in memory until it is cleared.
#[derive(Debug, Default)]
pub struct MemoryJsonStore {
    map: Mutex<HashMap<StoreKey, JsonValue>>,
}

impl MemoryJsonStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<StoreKey, JsonValue>> {
        // The map is never left in an inconsistent state, so a poisoned lock is still usable.
        self.map.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl JsonStore for MemoryJsonStore {
    fn register(&self, key: StoreKey, json: &JsonValue) {
        debug!(?key, "registering raw JSON");
        self.lock().insert(key, json.clone());
    }

    fn get(&self, key: StoreKey) -> Option<JsonValue> {
        self.lock().get(&key).cloned()
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use serde_json::json;

    use super::*;

    #[test]
    fn register_and_get() {
        let store = MemoryJsonStore::new();
        assert!(store.is_empty());

        store.register(StoreKey::User(1), &json!({"id": 1}));
        store.register(StoreKey::Tweet(1), &json!({"id": 1, "text": "hi"}));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(StoreKey::User(1)), Some(json!({"id": 1})));
        assert_eq!(store.get(StoreKey::User(2)), None);

        store.register(StoreKey::User(1), &json!({"id": 1, "name": "A"}));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(StoreKey::User(1)).unwrap()["name"], "A");

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn shared() {
        let store = Arc::new(MemoryJsonStore::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = store.clone();
                thread::spawn(move || store.register(StoreKey::Tweet(i), &json!({ "id": i })))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.len(), 4);
    }
}

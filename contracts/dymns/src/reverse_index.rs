//! Generic reverse-lookup engine: ordered sets of ids keyed by a subject string.
//!
//! Backs every reverse index in the contract (owner → names,
//! configured-address → names, 0x-address → names, buyer → buy-order ids,
//! goods → buy-order ids). Each index is its own instance with its own
//! storage-key namespace; all set algebra lives here.
//!
//! Contract:
//! - `add` is idempotent: adding a present id is a no-op and does not rewrite
//!   storage.
//! - `remove` on a missing key or missing id is a no-op, never an error.
//! - `get` on a missing key returns an empty list, never an error.
//! - Insertion order is preserved; removal is by value and keeps the relative
//!   order of the survivors (which is why this is a `Vec` and not an
//!   `IterableSet` — the SDK set swap-removes).

use near_sdk::near;
use near_sdk::store::LookupMap;

use crate::StorageKey;

#[near(serializers = [borsh])]
pub struct ReverseIndex {
    records: LookupMap<String, Vec<String>>,
}

impl ReverseIndex {
    pub fn new(prefix: StorageKey) -> Self {
        Self {
            records: LookupMap::new(prefix),
        }
    }

    /// Append `id` under `key`. Returns false (without writing) if already present.
    pub fn add(&mut self, key: &str, id: &str) -> bool {
        match self.records.get_mut(key) {
            Some(ids) => {
                if ids.iter().any(|existing| existing == id) {
                    return false;
                }
                ids.push(id.to_string());
                true
            }
            None => {
                self.records.insert(key.to_string(), vec![id.to_string()]);
                true
            }
        }
    }

    /// Ids under `key`, in insertion order. Missing key yields an empty list.
    pub fn get(&self, key: &str) -> Vec<String> {
        self.records.get(key).cloned().unwrap_or_default()
    }

    /// Remove `id` from `key`. Returns false (without writing) if either is absent.
    /// The record itself is deleted once its last id is removed.
    pub fn remove(&mut self, key: &str, id: &str) -> bool {
        let Some(ids) = self.records.get_mut(key) else {
            return false;
        };
        let Some(pos) = ids.iter().position(|existing| existing == id) else {
            return false;
        };
        ids.remove(pos);
        if ids.is_empty() {
            self.records.remove(key);
        }
        true
    }
}

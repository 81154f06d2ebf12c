//! Dym-Name record storage and reverse-index maintenance.
//!
//! Every mutation goes through `internal_set_dym_name`, which captures the
//! old record, computes the index diff, and applies it — so the owner index
//! and both address indices can never drift from the stored record within a
//! single flow.

use near_sdk::{env, near};

use crate::dym_name::types::{is_0x_address, DymName};
use crate::errors::DymNsError;
use crate::internal::now_seconds;
use crate::types::AssetType;
use crate::{events, Contract, ContractExt};

#[near]
impl Contract {
    // ── Views ────────────────────────────────────────────────────────

    /// The raw record, expired or not.
    pub fn get_dym_name(&self, name: String) -> Option<DymName> {
        self.dym_names.get(&name).cloned()
    }

    /// Names owned by `owner`, live at the current block time, in index
    /// order. Stale index entries (expired, or owner no longer matching)
    /// are filtered out.
    pub fn get_dym_names_owned_by(&self, owner: near_sdk::AccountId) -> Vec<DymName> {
        let now = now_seconds();
        self.owned_names
            .get(owner.as_str())
            .iter()
            .filter_map(|name| self.dym_names.get(name))
            .filter(|record| !record.is_expired_at(now) && record.owner == owner)
            .cloned()
            .collect()
    }

    /// Full-scan filter; batch/migration tooling only, not the hot path.
    pub fn get_all_non_expired_dym_names(
        &self,
        from_index: Option<u64>,
        limit: Option<u64>,
    ) -> Vec<DymName> {
        let now = now_seconds();
        let start = from_index.unwrap_or(0) as usize;
        let limit = limit.unwrap_or(50).min(100) as usize;
        self.dym_names
            .iter()
            .filter(|(_, record)| !record.is_expired_at(now))
            .skip(start)
            .take(limit)
            .map(|(_, record)| record.clone())
            .collect()
    }
}

// ── Internal implementations ─────────────────────────────────────────────────

impl Contract {
    pub(crate) fn internal_get_dym_name(&self, name: &str) -> Option<DymName> {
        self.dym_names.get(name).cloned()
    }

    /// Treats expired as absent.
    pub(crate) fn internal_get_dym_name_live(&self, name: &str, now: u64) -> Option<DymName> {
        self.internal_get_dym_name(name)
            .filter(|record| !record.is_expired_at(now))
    }

    /// Validate and persist, applying the reverse-index diff against the
    /// previously stored record.
    pub(crate) fn internal_set_dym_name(&mut self, record: DymName) -> Result<(), DymNsError> {
        record
            .validate()
            .map_err(DymNsError::InvalidInput)?;

        let old = self.dym_names.get(&record.name).cloned();
        self.apply_index_diff(old.as_ref(), Some(&record));
        self.dym_names.insert(record.name.clone(), record);
        Ok(())
    }

    /// Remove the record and its index entries. No cascade; no-op when absent.
    pub(crate) fn internal_delete_dym_name(&mut self, name: &str) {
        if let Some(old) = self.dym_names.remove(name) {
            self.apply_index_diff(Some(&old), None);
        }
    }

    /// Cascading removal: force-deletes any active sell order (refunding a
    /// held bid), drops historical orders and their min-expiry marker, then
    /// deletes the record with its index entries. Safe on a missing name.
    pub(crate) fn internal_prune_dym_name(&mut self, name: &str) {
        self.force_remove_active_sell_order(AssetType::DymName, name);
        self.remove_historical_sell_orders(AssetType::DymName, name);
        self.internal_delete_dym_name(name);
        events::emit_dym_name_pruned(&env::predecessor_account_id(), name);
    }

    /// Hand the name to a new owner: configs cleared, controller reset.
    /// Expiry is untouched. Used by trade completion and explicit transfer.
    pub(crate) fn internal_transfer_dym_name_ownership(
        &mut self,
        name: &str,
        new_owner: &near_sdk::AccountId,
    ) -> Result<(), DymNsError> {
        let record = self
            .internal_get_dym_name(name)
            .ok_or_else(|| DymNsError::dym_name_not_found(name))?;
        self.internal_set_dym_name(DymName {
            owner: new_owner.clone(),
            controller: new_owner.clone(),
            configs: Vec::new(),
            ..record
        })
    }

    // ── Index diffing ────────────────────────────────────────────────

    /// Diff-apply the owner index and both address indices between two
    /// record snapshots. `None` means absent (creation / deletion).
    fn apply_index_diff(&mut self, old: Option<&DymName>, new: Option<&DymName>) {
        let name = match (old, new) {
            (Some(o), _) => o.name.clone(),
            (None, Some(n)) => n.name.clone(),
            (None, None) => return,
        };

        // Owner index.
        let old_owner = old.map(|o| o.owner.as_str().to_string());
        let new_owner = new.map(|n| n.owner.as_str().to_string());
        if old_owner != new_owner {
            if let Some(owner) = &old_owner {
                self.owned_names.remove(owner, &name);
            }
        }
        if let Some(owner) = &new_owner {
            self.owned_names.add(owner, &name);
        }

        // Address indices.
        let (old_configured, old_fallback) = old.map(derive_address_keys).unwrap_or_default();
        let (new_configured, new_fallback) = new.map(derive_address_keys).unwrap_or_default();

        for key in old_configured.iter().filter(|k| !new_configured.contains(k)) {
            self.configured_addresses.remove(key, &name);
        }
        for key in &new_configured {
            self.configured_addresses.add(key, &name);
        }
        for key in old_fallback.iter().filter(|k| !new_fallback.contains(k)) {
            self.fallback_addresses.remove(key, &name);
        }
        for key in &new_fallback {
            self.fallback_addresses.add(key, &name);
        }
    }
}

/// Address keys a record contributes: owner, controller, and every config
/// value into the configured index; lowercased 0x values into the fallback
/// index. Deduplicated, insertion-ordered.
fn derive_address_keys(record: &DymName) -> (Vec<String>, Vec<String>) {
    let mut configured: Vec<String> = Vec::new();
    let mut fallback: Vec<String> = Vec::new();

    let mut push_unique = |list: &mut Vec<String>, value: String| {
        if !list.contains(&value) {
            list.push(value);
        }
    };

    push_unique(&mut configured, record.owner.as_str().to_string());
    push_unique(&mut configured, record.controller.as_str().to_string());
    for config in &record.configs {
        push_unique(&mut configured, config.value.clone());
        if is_0x_address(&config.value) {
            push_unique(&mut fallback, config.value.to_lowercase());
        }
    }
    (configured, fallback)
}

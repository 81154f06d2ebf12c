//! Epoch sweep hooks, driven by an external scheduler account.
//!
//! Both hooks are identifier-gated: a mismatched identifier is a silent
//! no-op, so the scheduler can broadcast every epoch tick to the contract.
//! Data-quality problems (stale index entries, lists out of sync with their
//! min-expiry markers) are logged and self-healed; real failures — a
//! completion that cannot transfer or archive — abort the whole hook.

use near_sdk::{env, near};

use crate::constants::SECONDS_PER_DAY;
use crate::errors::DymNsError;
use crate::internal::now_seconds;
use crate::types::AssetType;
use crate::{Contract, ContractExt};

#[near]
impl Contract {
    /// Begin-epoch: prune historical Sell-Orders past the retention window.
    #[handle_result]
    pub fn on_epoch_begin(
        &mut self,
        epoch_identifier: String,
        epoch_number: u64,
    ) -> Result<(), DymNsError> {
        self.check_epoch_scheduler(&env::predecessor_account_id())?;
        if epoch_identifier != self.params.misc.begin_epoch_hook_identifier {
            return Ok(());
        }

        let now = now_seconds();
        let retention =
            u64::from(self.params.misc.preserved_closed_sell_order_days) * SECONDS_PER_DAY;
        let cutoff = now.saturating_sub(retention);

        // The min-expiry map is the cheap filter: only assets whose recorded
        // minimum is older than the cutoff get their full list loaded.
        let candidates: Vec<(String, u64)> = self
            .historical_min_expiry
            .iter()
            .filter(|(_, min_expiry)| **min_expiry < cutoff)
            .map(|(key, min_expiry)| (key.clone(), *min_expiry))
            .collect();

        let mut pruned = 0u32;
        for (asset_key, recorded_min) in candidates {
            let Some(list) = self.historical_sell_orders.get(&asset_key).cloned() else {
                // Marker without a backing list: clear it.
                env::log_str(&format!(
                    "clearing orphaned min-expiry marker for {}",
                    asset_key
                ));
                self.historical_min_expiry.remove(&asset_key);
                continue;
            };

            let survivors: Vec<_> = list
                .iter()
                .filter(|order| order.expire_at >= cutoff)
                .cloned()
                .collect();
            pruned += (list.len() - survivors.len()) as u32;

            if survivors.is_empty() {
                self.historical_sell_orders.remove(&asset_key);
                self.historical_min_expiry.remove(&asset_key);
                continue;
            }
            let true_min = survivors.iter().map(|o| o.expire_at).min().unwrap_or(0);
            if recorded_min != true_min {
                env::log_str(&format!(
                    "correcting min-expiry for {}: {} -> {}",
                    asset_key, recorded_min, true_min
                ));
            }
            self.historical_sell_orders.insert(asset_key.clone(), survivors);
            self.historical_min_expiry.insert(asset_key, true_min);
        }

        env::log_str(&format!(
            "begin-epoch {} ({}): pruned {} historical Sell-Orders",
            epoch_identifier, epoch_number, pruned
        ));
        Ok(())
    }

    /// End-epoch: finalize active Sell-Orders that are due — complete those
    /// with a bid, archive the rest.
    #[handle_result]
    pub fn on_epoch_end(
        &mut self,
        epoch_identifier: String,
        epoch_number: u64,
    ) -> Result<(), DymNsError> {
        self.check_epoch_scheduler(&env::predecessor_account_id())?;
        if epoch_identifier != self.params.misc.end_epoch_hook_identifier {
            return Ok(());
        }

        let now = now_seconds();
        let mut finalized = 0u32;
        for asset_type in [AssetType::DymName, AssetType::Alias] {
            finalized += self.sweep_due_sell_orders(asset_type, now)?;
        }

        env::log_str(&format!(
            "end-epoch {} ({}): finalized {} Sell-Orders",
            epoch_identifier, epoch_number, finalized
        ));
        Ok(())
    }
}

// ── Internal implementations ─────────────────────────────────────────────────

impl Contract {
    /// Sweep one asset type's expiration index. The index record is written
    /// back once at the end, not per order.
    fn sweep_due_sell_orders(
        &mut self,
        asset_type: AssetType,
        now: u64,
    ) -> Result<u32, DymNsError> {
        let mut index = self.active_orders_expiration_of(asset_type);
        if index.records.is_empty() {
            return Ok(0);
        }

        // Deterministic processing order regardless of index history.
        let mut due: Vec<(u64, String)> = index
            .records
            .iter()
            .filter(|record| record.expire_at < now)
            .map(|record| (record.expire_at, record.asset_id.clone()))
            .collect();
        due.sort();

        let mut finalized = 0u32;
        let mut dirty = false;
        for (_, asset_id) in due {
            let Some(order) = self.internal_get_sell_order(asset_type, &asset_id) else {
                // Stale entry with no backing order: drop it.
                env::log_str(&format!(
                    "dropping stale expiration entry for {}:{}",
                    asset_type.label(),
                    asset_id
                ));
                index.remove(&asset_id);
                dirty = true;
                continue;
            };
            if !order.is_finished_at(now) {
                // The index said due, the order disagrees: trust the order.
                env::log_str(&format!(
                    "correcting expiration entry for {}:{} to {}",
                    asset_type.label(),
                    asset_id,
                    order.expire_at
                ));
                index.upsert(&asset_id, order.expire_at);
                dirty = true;
                continue;
            }

            if order.highest_bid.is_some() {
                self.internal_complete_sell_order(order, false)?;
            } else {
                self.internal_move_sell_order_to_historical(asset_type, &asset_id, false)?;
            }
            index.remove(&asset_id);
            dirty = true;
            finalized += 1;
        }

        if dirty {
            self.active_orders_expiration.insert(asset_type, index);
        }
        Ok(finalized)
    }
}

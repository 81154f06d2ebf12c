//! Sell-Order storage: active map + expiration index, historical lists +
//! min-expiry markers.

use near_sdk::{env, near};

use crate::errors::DymNsError;
use crate::internal::pay_out;
use crate::sell_order::types::{ActiveOrdersExpiration, ArchiveOutcome, SellOrder};
use crate::types::{make_asset_key, AssetType};
use crate::{Contract, ContractExt};

#[near]
impl Contract {
    // ── Views ────────────────────────────────────────────────────────

    pub fn get_sell_order(&self, asset_type: AssetType, asset_id: String) -> Option<SellOrder> {
        self.sell_orders
            .get(&make_asset_key(asset_type, &asset_id))
            .cloned()
    }

    pub fn get_historical_sell_orders(
        &self,
        asset_type: AssetType,
        asset_id: String,
    ) -> Vec<SellOrder> {
        self.historical_sell_orders
            .get(&make_asset_key(asset_type, &asset_id))
            .cloned()
            .unwrap_or_default()
    }

    /// Smallest `expire_at` among the asset's historical entries; None iff
    /// the list is empty.
    pub fn get_min_expiry_historical_sell_order(
        &self,
        asset_type: AssetType,
        asset_id: String,
    ) -> Option<u64> {
        self.historical_min_expiry
            .get(&make_asset_key(asset_type, &asset_id))
            .copied()
    }
}

// ── Internal implementations ─────────────────────────────────────────────────

impl Contract {
    pub(crate) fn internal_get_sell_order(
        &self,
        asset_type: AssetType,
        asset_id: &str,
    ) -> Option<SellOrder> {
        self.sell_orders
            .get(&make_asset_key(asset_type, asset_id))
            .cloned()
    }

    /// Persist a fresh active order and its expiration-index entry.
    /// At most one active order per asset.
    pub(crate) fn insert_active_sell_order(&mut self, order: SellOrder) -> Result<(), DymNsError> {
        let key = make_asset_key(order.asset_type, &order.asset_id);
        if self.sell_orders.contains_key(&key) {
            return Err(DymNsError::AlreadyExists(format!(
                "an active Sell-Order exists for: {}",
                key
            )));
        }
        let mut index = self.active_orders_expiration_of(order.asset_type);
        index.upsert(&order.asset_id, order.expire_at);
        self.active_orders_expiration.insert(order.asset_type, index);
        self.sell_orders.insert(key, order);
        Ok(())
    }

    /// Overwrite an existing active order (bid updates; expiry unchanged,
    /// so the index entry is left alone).
    pub(crate) fn update_active_sell_order(&mut self, order: SellOrder) {
        let key = make_asset_key(order.asset_type, &order.asset_id);
        self.sell_orders.insert(key, order);
    }

    /// Remove the active order and, unless the caller batches index updates
    /// (the end-epoch sweep), its expiration-index entry.
    pub(crate) fn remove_active_sell_order(
        &mut self,
        asset_type: AssetType,
        asset_id: &str,
        update_expiry_index: bool,
    ) -> Option<SellOrder> {
        let removed = self
            .sell_orders
            .remove(&make_asset_key(asset_type, asset_id));
        if removed.is_some() && update_expiry_index {
            let mut index = self.active_orders_expiration_of(asset_type);
            if index.remove(asset_id) {
                self.active_orders_expiration.insert(asset_type, index);
            }
        }
        removed
    }

    /// Prune-path removal: drops the active order regardless of bid state,
    /// refunding any escrowed bid. No-op when absent.
    pub(crate) fn force_remove_active_sell_order(&mut self, asset_type: AssetType, asset_id: &str) {
        if let Some(order) = self.remove_active_sell_order(asset_type, asset_id, true) {
            if let Some(bid) = order.highest_bid {
                pay_out(&bid.bidder, bid.price);
            }
        }
    }

    /// Drop the asset's entire historical list and min-expiry marker.
    pub(crate) fn remove_historical_sell_orders(&mut self, asset_type: AssetType, asset_id: &str) {
        let key = make_asset_key(asset_type, asset_id);
        self.historical_sell_orders.remove(&key);
        self.historical_min_expiry.remove(&key);
    }

    /// Append a terminal order to the asset's historical list.
    ///
    /// An entry failing validation is dropped — logged, never propagated —
    /// so one corrupt record cannot halt block processing. On persistence
    /// the min-expiry marker is recomputed from the full list.
    pub(crate) fn append_historical_sell_order(&mut self, order: SellOrder) -> ArchiveOutcome {
        if let Err(reason) = order.validate() {
            env::log_str(&format!(
                "dropping invalid historical Sell-Order for {}: {}",
                make_asset_key(order.asset_type, &order.asset_id),
                reason
            ));
            return ArchiveOutcome::Skipped(reason);
        }

        let key = make_asset_key(order.asset_type, &order.asset_id);
        let mut list = self
            .historical_sell_orders
            .get(&key)
            .cloned()
            .unwrap_or_default();
        list.push(order);
        let min_expiry = list.iter().map(|o| o.expire_at).min().unwrap_or(0);
        self.historical_sell_orders.insert(key.clone(), list);
        self.historical_min_expiry.insert(key, min_expiry);
        ArchiveOutcome::Persisted
    }

    /// The (possibly empty) expiration record for an asset type.
    pub(crate) fn active_orders_expiration_of(
        &self,
        asset_type: AssetType,
    ) -> ActiveOrdersExpiration {
        self.active_orders_expiration
            .get(&asset_type)
            .cloned()
            .unwrap_or_default()
    }
}

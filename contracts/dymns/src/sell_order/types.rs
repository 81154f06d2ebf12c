//! Sell-Order domain types.

use near_sdk::near;
use near_sdk::AccountId;

use crate::dym_name::types::{is_valid_alias, is_valid_dym_name};
use crate::types::AssetType;

/// An advertise-for-sale record with bidding. At most one active order per
/// asset; terminal orders move to the historical list.
#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct SellOrder {
    pub asset_id: String,
    pub asset_type: AssetType,
    /// Unix seconds.
    pub expire_at: u64,
    /// yoctoNEAR. Bids below this are rejected.
    pub min_price: u128,
    /// yoctoNEAR. A bid matching this completes the order immediately.
    /// None = auction runs to expiry.
    pub sell_price: Option<u128>,
    pub highest_bid: Option<SellOrderBid>,
}

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct SellOrderBid {
    pub bidder: AccountId,
    /// yoctoNEAR, held in escrow until completion or refund.
    pub price: u128,
    /// `[dst_rollapp_id]` for alias orders; empty for names.
    pub params: Vec<String>,
}

impl SellOrder {
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expire_at < now
    }

    /// Expired, or the highest bid met the sell price.
    pub fn is_finished_at(&self, now: u64) -> bool {
        if self.is_expired_at(now) {
            return true;
        }
        match (&self.highest_bid, self.sell_price) {
            (Some(bid), Some(sell_price)) => bid.price == sell_price,
            _ => false,
        }
    }

    /// Structural validation. Historical appends run this and drop (never
    /// propagate) failures, so the message doubles as the logged reason.
    pub fn validate(&self) -> Result<(), String> {
        match self.asset_type {
            AssetType::DymName => {
                if !is_valid_dym_name(&self.asset_id) {
                    return Err(format!("invalid Dym-Name: {}", self.asset_id));
                }
            }
            AssetType::Alias => {
                if !is_valid_alias(&self.asset_id) {
                    return Err(format!("invalid alias: {}", self.asset_id));
                }
            }
        }
        if self.expire_at == 0 {
            return Err("expire_at must be set".to_string());
        }
        if self.min_price == 0 {
            return Err("min_price must be positive".to_string());
        }
        if let Some(sell_price) = self.sell_price {
            if sell_price < self.min_price {
                return Err("sell_price must not be less than min_price".to_string());
            }
        }
        if let Some(bid) = &self.highest_bid {
            if bid.price < self.min_price {
                return Err("bid price below min_price".to_string());
            }
            if let Some(sell_price) = self.sell_price {
                if bid.price > sell_price {
                    return Err("bid price above sell_price".to_string());
                }
            }
            match self.asset_type {
                AssetType::DymName => {
                    if !bid.params.is_empty() {
                        return Err("name bids take no params".to_string());
                    }
                }
                AssetType::Alias => {
                    if bid.params.len() != 1 {
                        return Err("alias bids take exactly one param".to_string());
                    }
                }
            }
        }
        Ok(())
    }
}

/// Per-asset-type expiration index over active orders, kept sorted by
/// asset id. One storage slot per asset type; the end-epoch sweep reads
/// this instead of scanning all orders.
#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveOrdersExpiration {
    pub records: Vec<ActiveOrderExpiryRecord>,
}

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveOrderExpiryRecord {
    pub asset_id: String,
    /// Unix seconds.
    pub expire_at: u64,
}

impl ActiveOrdersExpiration {
    /// Insert or update, keeping records sorted by asset id.
    pub fn upsert(&mut self, asset_id: &str, expire_at: u64) {
        match self
            .records
            .binary_search_by(|r| r.asset_id.as_str().cmp(asset_id))
        {
            Ok(pos) => self.records[pos].expire_at = expire_at,
            Err(pos) => self.records.insert(
                pos,
                ActiveOrderExpiryRecord {
                    asset_id: asset_id.to_string(),
                    expire_at,
                },
            ),
        }
    }

    /// Returns true if a record was removed.
    pub fn remove(&mut self, asset_id: &str) -> bool {
        match self
            .records
            .binary_search_by(|r| r.asset_id.as_str().cmp(asset_id))
        {
            Ok(pos) => {
                self.records.remove(pos);
                true
            }
            Err(_) => false,
        }
    }
}

/// Outcome of appending an order to the historical list. `Skipped` is the
/// never-halt-the-chain path: the entry failed validation, was dropped, and
/// the reason was logged at the call site.
#[derive(Debug, PartialEq, Eq)]
pub enum ArchiveOutcome {
    Persisted,
    Skipped(String),
}

//! Buy-Order (offer-to-buy) domain types.

use near_sdk::near;
use near_sdk::AccountId;

use crate::constants::{BUY_ORDER_ID_PREFIX_ALIAS, BUY_ORDER_ID_PREFIX_DYM_NAME};
use crate::types::AssetType;

/// A negotiated purchase proposal. The escrow holds `offer_price`; extending
/// an order charges only the delta.
#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct BuyOrder {
    /// Type prefix + monotonic counter, e.g. `"101"`. Never reused.
    pub id: String,
    pub asset_id: String,
    pub asset_type: AssetType,
    pub buyer: AccountId,
    /// yoctoNEAR, held in escrow.
    pub offer_price: u128,
    /// Set by the owner when `min_accept > offer_price`; a recorded
    /// counter-offer, no funds attached to it.
    pub counterparty_offer_price: Option<u128>,
    /// `[dst_rollapp_id]` for alias orders; empty for names.
    pub params: Vec<String>,
}

/// Compose an order id from the type prefix and the persisted counter value.
pub fn make_buy_order_id(asset_type: AssetType, count: u64) -> String {
    let prefix = match asset_type {
        AssetType::DymName => BUY_ORDER_ID_PREFIX_DYM_NAME,
        AssetType::Alias => BUY_ORDER_ID_PREFIX_ALIAS,
    };
    format!("{}{}", prefix, count)
}

use near_sdk::AccountId;

use super::builder::EventBuilder;
use super::{BUY_ORDER, SELL_ORDER};

// --- Sell-Orders ---

pub(crate) fn emit_sell_order_placed(
    seller: &AccountId,
    asset_type: &str,
    asset_id: &str,
    min_price: u128,
    sell_price: Option<u128>,
    expire_at: u64,
) {
    EventBuilder::new(SELL_ORDER, "place", seller)
        .field("asset_type", asset_type)
        .field("asset_id", asset_id)
        .field("min_price", min_price)
        .field_opt("sell_price", sell_price)
        .field("expire_at", expire_at)
        .emit();
}

pub(crate) fn emit_sell_order_cancelled(seller: &AccountId, asset_type: &str, asset_id: &str) {
    EventBuilder::new(SELL_ORDER, "cancel", seller)
        .field("asset_type", asset_type)
        .field("asset_id", asset_id)
        .emit();
}

pub(crate) fn emit_sell_order_bid(
    bidder: &AccountId,
    asset_type: &str,
    asset_id: &str,
    price: u128,
) {
    EventBuilder::new(SELL_ORDER, "bid", bidder)
        .field("asset_type", asset_type)
        .field("asset_id", asset_id)
        .field("price", price)
        .emit();
}

pub(crate) fn emit_sell_order_completed(
    winner: &AccountId,
    seller: &AccountId,
    asset_type: &str,
    asset_id: &str,
    price: u128,
) {
    EventBuilder::new(SELL_ORDER, "complete", winner)
        .field("asset_type", asset_type)
        .field("asset_id", asset_id)
        .field("seller", seller)
        .field("price", price)
        .emit();
}

/// Expired with no bid; moved straight to historical.
pub(crate) fn emit_sell_order_archived(author: &AccountId, asset_type: &str, asset_id: &str) {
    EventBuilder::new(SELL_ORDER, "archive", author)
        .field("asset_type", asset_type)
        .field("asset_id", asset_id)
        .emit();
}

// --- Buy-Orders ---

pub(crate) fn emit_buy_order_placed(
    buyer: &AccountId,
    order_id: &str,
    asset_type: &str,
    asset_id: &str,
    offer_price: u128,
) {
    EventBuilder::new(BUY_ORDER, "place", buyer)
        .field("order_id", order_id)
        .field("asset_type", asset_type)
        .field("asset_id", asset_id)
        .field("offer_price", offer_price)
        .emit();
}

pub(crate) fn emit_buy_order_extended(
    buyer: &AccountId,
    order_id: &str,
    old_price: u128,
    new_price: u128,
) {
    EventBuilder::new(BUY_ORDER, "extend", buyer)
        .field("order_id", order_id)
        .field("old_price", old_price)
        .field("new_price", new_price)
        .emit();
}

pub(crate) fn emit_buy_order_accepted(
    seller: &AccountId,
    buyer: &AccountId,
    order_id: &str,
    price: u128,
) {
    EventBuilder::new(BUY_ORDER, "accept", seller)
        .field("order_id", order_id)
        .field("buyer", buyer)
        .field("price", price)
        .emit();
}

/// Owner asked for more than the offer: recorded as a counter-offer, no funds moved.
pub(crate) fn emit_buy_order_countered(
    seller: &AccountId,
    order_id: &str,
    counterparty_offer_price: u128,
) {
    EventBuilder::new(BUY_ORDER, "counter", seller)
        .field("order_id", order_id)
        .field("counterparty_offer_price", counterparty_offer_price)
        .emit();
}

pub(crate) fn emit_buy_order_cancelled(buyer: &AccountId, order_id: &str, refund: u128) {
    EventBuilder::new(BUY_ORDER, "cancel", buyer)
        .field("order_id", order_id)
        .field("refund", refund)
        .emit();
}

//! Buy-Order message handlers: place/extend, accept/counter, cancel.

use near_sdk::json_types::U128;
use near_sdk::{env, near, AccountId};

use crate::buy_order::types::{make_buy_order_id, BuyOrder};
use crate::errors::DymNsError;
use crate::internal::{now_seconds, pay_out};
use crate::types::{make_asset_key, AssetType};
use crate::{events, Contract, ContractExt};

#[near]
impl Contract {
    /// Offer to buy an asset, or — with `continue_order_id` — raise an
    /// existing offer. The attached deposit funds the escrow: the full price
    /// for a new offer, only the delta when continuing.
    ///
    /// Alias offers take `dst_rollapp_id`: the buyer's RollApp the alias
    /// would move to on acceptance.
    #[payable]
    #[handle_result]
    pub fn place_buy_order(
        &mut self,
        asset_type: AssetType,
        asset_id: String,
        offer_price: U128,
        continue_order_id: Option<String>,
        dst_rollapp_id: Option<String>,
    ) -> Result<String, DymNsError> {
        let buyer = env::predecessor_account_id();

        if offer_price.0 < self.params.price.min_offer_price.0 {
            return Err(DymNsError::InvalidInput(format!(
                "offer price must be at least {} yoctoNEAR",
                self.params.price.min_offer_price.0
            )));
        }

        let params = self.check_can_offer(asset_type, &asset_id, &buyer, dst_rollapp_id)?;

        match continue_order_id {
            Some(order_id) => {
                self.extend_buy_order(&order_id, asset_type, &asset_id, &buyer, offer_price.0, params)
            }
            None => self.create_buy_order(asset_type, &asset_id, &buyer, offer_price.0, params),
        }
    }

    /// Accept an offer at exactly `min_accept == offer_price`, or record
    /// `min_accept` as a counter-offer when asking for more. Seller only.
    #[payable]
    #[handle_result]
    pub fn accept_buy_order(
        &mut self,
        order_id: String,
        min_accept: U128,
    ) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();

        let order = self
            .buy_orders
            .get(&order_id)
            .cloned()
            .ok_or_else(|| DymNsError::buy_order_not_found(&order_id))?;
        let seller = self.seller_of(order.asset_type, &order.asset_id)?;
        if seller != caller {
            return Err(DymNsError::only_owner("the seller"));
        }
        if order.buyer == caller {
            return Err(DymNsError::Unauthorized(
                "cannot accept your own Buy-Order".into(),
            ));
        }
        // A live Sell-Order may hold a bid whose completion would transfer
        // the same asset; the owner must cancel or finish it first.
        if self
            .internal_get_sell_order(order.asset_type, &order.asset_id)
            .is_some()
        {
            return Err(DymNsError::FailedPrecondition(
                "an active Sell-Order exists for this asset".into(),
            ));
        }
        if order.asset_type == AssetType::DymName {
            // The traded name must still be live.
            self.internal_get_dym_name_live(&order.asset_id, now_seconds())
                .ok_or_else(|| DymNsError::dym_name_not_found(&order.asset_id))?;
        }
        if min_accept.0 < order.offer_price {
            return Err(DymNsError::InvalidInput(format!(
                "min_accept must not be less than the offer price of {} yoctoNEAR",
                order.offer_price
            )));
        }

        if min_accept.0 > order.offer_price {
            // Not a deal yet: record the counter-offer, move no funds.
            let mut countered = order;
            countered.counterparty_offer_price = Some(min_accept.0);
            self.buy_orders.insert(order_id.clone(), countered);
            events::emit_buy_order_countered(&caller, &order_id, min_accept.0);
            return Ok(());
        }

        // Exact match: complete. State first, escrow payout last.
        self.remove_buy_order_with_indices(&order);
        match order.asset_type {
            AssetType::DymName => {
                self.internal_transfer_dym_name_ownership(&order.asset_id, &order.buyer)?;
            }
            AssetType::Alias => {
                let src_rollapp_id = self
                    .rollapp_of_alias
                    .get(order.asset_id.as_str())
                    .cloned()
                    .ok_or_else(|| {
                        DymNsError::NotFound(format!("alias: {}", order.asset_id))
                    })?;
                let dst_rollapp_id = order.params.first().ok_or_else(|| {
                    DymNsError::InternalError("alias Buy-Order is missing dst_rollapp_id".into())
                })?;
                self.move_alias_to_rollapp(&src_rollapp_id, &order.asset_id, dst_rollapp_id)?;
            }
        }
        pay_out(&seller, order.offer_price);
        events::emit_buy_order_accepted(&caller, &order.buyer, &order_id, order.offer_price);
        Ok(())
    }

    /// Withdraw an offer and reclaim the escrowed funds. Buyer only.
    #[payable]
    #[handle_result]
    pub fn cancel_buy_order(&mut self, order_id: String) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();

        let order = self
            .buy_orders
            .get(&order_id)
            .cloned()
            .ok_or_else(|| DymNsError::buy_order_not_found(&order_id))?;
        if order.buyer != caller {
            return Err(DymNsError::only_owner("the buyer"));
        }

        self.remove_buy_order_with_indices(&order);
        pay_out(&order.buyer, order.offer_price);
        events::emit_buy_order_cancelled(&caller, &order_id, order.offer_price);
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn get_buy_order(&self, order_id: String) -> Option<BuyOrder> {
        self.buy_orders.get(&order_id).cloned()
    }

    /// Offers placed by `buyer`, in placement order.
    pub fn get_buy_orders_by_buyer(&self, buyer: AccountId) -> Vec<BuyOrder> {
        self.buy_orders_by_buyer
            .get(buyer.as_str())
            .iter()
            .filter_map(|id| self.buy_orders.get(id))
            .cloned()
            .collect()
    }

    /// Offers on an asset, in placement order.
    pub fn get_buy_orders_of_asset(
        &self,
        asset_type: AssetType,
        asset_id: String,
    ) -> Vec<BuyOrder> {
        self.buy_orders_by_asset
            .get(&make_asset_key(asset_type, &asset_id))
            .iter()
            .filter_map(|id| self.buy_orders.get(id))
            .cloned()
            .collect()
    }
}

// ── Internal implementations ─────────────────────────────────────────────────

impl Contract {
    /// Asset-class checks for placing an offer; returns the order params
    /// (`[dst_rollapp_id]` for aliases).
    fn check_can_offer(
        &self,
        asset_type: AssetType,
        asset_id: &str,
        buyer: &AccountId,
        dst_rollapp_id: Option<String>,
    ) -> Result<Vec<String>, DymNsError> {
        match asset_type {
            AssetType::DymName => {
                if dst_rollapp_id.is_some() {
                    return Err(DymNsError::InvalidInput(
                        "dst_rollapp_id applies to alias offers only".into(),
                    ));
                }
                let record = self
                    .internal_get_dym_name_live(asset_id, now_seconds())
                    .ok_or_else(|| DymNsError::dym_name_not_found(asset_id))?;
                if &record.owner == buyer {
                    return Err(DymNsError::Unauthorized(
                        "cannot offer to buy your own Dym-Name".into(),
                    ));
                }
                Ok(Vec::new())
            }
            AssetType::Alias => {
                if self.is_alias_reserved_in_params(asset_id) {
                    return Err(DymNsError::FailedPrecondition(format!(
                        "alias is reserved and cannot be traded: {}",
                        asset_id
                    )));
                }
                let holder = self
                    .rollapp_of_alias
                    .get(asset_id)
                    .ok_or_else(|| DymNsError::NotFound(format!("alias: {}", asset_id)))?;
                if self.is_rollapp_creator(holder, buyer) {
                    return Err(DymNsError::Unauthorized(
                        "cannot offer to buy your own alias".into(),
                    ));
                }
                let dst = dst_rollapp_id.ok_or_else(|| {
                    DymNsError::InvalidInput("alias offers require dst_rollapp_id".into())
                })?;
                if !self.is_roll_app(&dst) {
                    return Err(DymNsError::not_a_rollapp(&dst));
                }
                if !self.is_rollapp_creator(&dst, buyer) {
                    return Err(DymNsError::only_owner("the destination RollApp creator"));
                }
                Ok(vec![dst])
            }
        }
    }

    fn create_buy_order(
        &mut self,
        asset_type: AssetType,
        asset_id: &str,
        buyer: &AccountId,
        offer_price: u128,
        params: Vec<String>,
    ) -> Result<String, DymNsError> {
        self.check_exact_deposit(offer_price)?;

        self.buy_order_count += 1;
        let order_id = make_buy_order_id(asset_type, self.buy_order_count);
        let order = BuyOrder {
            id: order_id.clone(),
            asset_id: asset_id.to_string(),
            asset_type,
            buyer: buyer.clone(),
            offer_price,
            counterparty_offer_price: None,
            params,
        };
        self.buy_orders.insert(order_id.clone(), order);
        self.buy_orders_by_buyer.add(buyer.as_str(), &order_id);
        self.buy_orders_by_asset
            .add(&make_asset_key(asset_type, asset_id), &order_id);

        events::emit_buy_order_placed(buyer, &order_id, asset_type.label(), asset_id, offer_price);
        Ok(order_id)
    }

    /// Continuation: same buyer, same asset, strictly greater price; the
    /// escrow is topped up by the delta only.
    fn extend_buy_order(
        &mut self,
        order_id: &str,
        asset_type: AssetType,
        asset_id: &str,
        buyer: &AccountId,
        offer_price: u128,
        params: Vec<String>,
    ) -> Result<String, DymNsError> {
        let existing = self
            .buy_orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| DymNsError::buy_order_not_found(order_id))?;
        if &existing.buyer != buyer {
            return Err(DymNsError::only_owner("the buyer"));
        }
        if existing.asset_type != asset_type || existing.asset_id != asset_id {
            return Err(DymNsError::InvalidInput(
                "continued Buy-Order refers to a different asset".into(),
            ));
        }
        if offer_price <= existing.offer_price {
            return Err(DymNsError::InvalidInput(format!(
                "offer price must exceed the current offer of {} yoctoNEAR",
                existing.offer_price
            )));
        }
        self.check_exact_deposit(offer_price - existing.offer_price)?;

        let old_price = existing.offer_price;
        self.buy_orders.insert(
            order_id.to_string(),
            BuyOrder {
                offer_price,
                params,
                ..existing
            },
        );
        events::emit_buy_order_extended(buyer, order_id, old_price, offer_price);
        Ok(order_id.to_string())
    }

    /// Drop the order and both its reverse-index entries.
    pub(crate) fn remove_buy_order_with_indices(&mut self, order: &BuyOrder) {
        self.buy_orders.remove(&order.id);
        self.buy_orders_by_buyer
            .remove(order.buyer.as_str(), &order.id);
        self.buy_orders_by_asset
            .remove(&make_asset_key(order.asset_type, &order.asset_id), &order.id);
    }
}

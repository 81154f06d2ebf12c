//! Sell-Order message handlers: place, cancel, bid, and completion.

use near_sdk::json_types::U128;
use near_sdk::{env, near, AccountId};

use crate::errors::DymNsError;
use crate::internal::{now_seconds, pay_out};
use crate::sell_order::types::{SellOrder, SellOrderBid};
use crate::types::AssetType;
use crate::{events, Contract, ContractExt};

#[near]
impl Contract {
    /// Advertise an asset for sale. Names: owner only, and not within the
    /// prohibit-sell window before expiry. Aliases: RollApp creator only,
    /// and never for aliases reserved in params. The order's lifetime comes
    /// from params.
    #[payable]
    #[handle_result]
    pub fn place_sell_order(
        &mut self,
        asset_type: AssetType,
        asset_id: String,
        min_price: U128,
        sell_price: Option<U128>,
    ) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();
        let now = now_seconds();

        self.check_can_sell(asset_type, &asset_id, &caller, now)?;

        if min_price.0 == 0 {
            return Err(DymNsError::InvalidInput("min_price must be positive".into()));
        }
        // Explicit zero means "unset".
        let sell_price = sell_price.map(|p| p.0).filter(|&p| p != 0);
        if let Some(sell_price) = sell_price {
            if sell_price < min_price.0 {
                return Err(DymNsError::InvalidInput(
                    "sell_price must not be less than min_price".into(),
                ));
            }
        }

        let expire_at = now + self.params.misc.sell_order_duration_seconds;
        let order = SellOrder {
            asset_id: asset_id.clone(),
            asset_type,
            expire_at,
            min_price: min_price.0,
            sell_price,
            highest_bid: None,
        };
        self.insert_active_sell_order(order)?;
        events::emit_sell_order_placed(
            &caller,
            asset_type.label(),
            &asset_id,
            min_price.0,
            sell_price,
            expire_at,
        );
        Ok(())
    }

    /// Withdraw an order that has received no bid. Seller only.
    #[payable]
    #[handle_result]
    pub fn cancel_sell_order(
        &mut self,
        asset_type: AssetType,
        asset_id: String,
    ) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();

        let order = self
            .internal_get_sell_order(asset_type, &asset_id)
            .ok_or_else(|| DymNsError::sell_order_not_found(&asset_id))?;
        let seller = self.seller_of(asset_type, &asset_id)?;
        if seller != caller {
            return Err(DymNsError::only_owner("the seller"));
        }
        if order.highest_bid.is_some() {
            return Err(DymNsError::FailedPrecondition(
                "cannot cancel a Sell-Order that has a bid".into(),
            ));
        }

        self.remove_active_sell_order(asset_type, &asset_id, true);
        events::emit_sell_order_cancelled(&caller, asset_type.label(), &asset_id);
        Ok(())
    }

    /// Bid on an active order. The attached deposit is the bid and is held
    /// in escrow; the previous highest bidder is refunded. A bid matching
    /// the sell price completes the order immediately.
    ///
    /// Alias orders additionally take `dst_rollapp_id`: the bidder's RollApp
    /// the alias would move to.
    #[payable]
    #[handle_result]
    pub fn purchase_order(
        &mut self,
        asset_type: AssetType,
        asset_id: String,
        dst_rollapp_id: Option<String>,
    ) -> Result<(), DymNsError> {
        let caller = env::predecessor_account_id();
        let bid_price = env::attached_deposit().as_yoctonear();
        let now = now_seconds();

        let mut order = self
            .internal_get_sell_order(asset_type, &asset_id)
            .ok_or_else(|| DymNsError::sell_order_not_found(&asset_id))?;
        if order.is_expired_at(now) {
            return Err(DymNsError::FailedPrecondition(
                "Sell-Order has expired".into(),
            ));
        }
        let seller = self.seller_of(asset_type, &asset_id)?;
        if seller == caller {
            return Err(DymNsError::Unauthorized(
                "cannot purchase your own Sell-Order".into(),
            ));
        }

        let bid_params = match asset_type {
            AssetType::DymName => {
                if dst_rollapp_id.is_some() {
                    return Err(DymNsError::InvalidInput(
                        "dst_rollapp_id applies to alias orders only".into(),
                    ));
                }
                Vec::new()
            }
            AssetType::Alias => {
                let dst = dst_rollapp_id.ok_or_else(|| {
                    DymNsError::InvalidInput("alias bids require dst_rollapp_id".into())
                })?;
                if !self.is_roll_app(&dst) {
                    return Err(DymNsError::not_a_rollapp(&dst));
                }
                if !self.is_rollapp_creator(&dst, &caller) {
                    return Err(DymNsError::only_owner("the destination RollApp creator"));
                }
                vec![dst]
            }
        };

        if bid_price < order.min_price {
            return Err(DymNsError::InsufficientDeposit(format!(
                "bid must be at least the minimum price of {} yoctoNEAR",
                order.min_price
            )));
        }
        if let Some(previous) = &order.highest_bid {
            if bid_price <= previous.price {
                return Err(DymNsError::InsufficientDeposit(format!(
                    "bid must be higher than the current highest bid of {} yoctoNEAR",
                    previous.price
                )));
            }
        }
        if let Some(sell_price) = order.sell_price {
            if bid_price > sell_price {
                return Err(DymNsError::InvalidInput(format!(
                    "bid must not exceed the sell price of {} yoctoNEAR",
                    sell_price
                )));
            }
        }

        // Outbid: the previous bidder gets their escrow back.
        if let Some(previous) = order.highest_bid.take() {
            pay_out(&previous.bidder, previous.price);
        }
        order.highest_bid = Some(SellOrderBid {
            bidder: caller.clone(),
            price: bid_price,
            params: bid_params,
        });
        let sell_price_met = order.sell_price == Some(bid_price);
        self.update_active_sell_order(order.clone());
        events::emit_sell_order_bid(&caller, asset_type.label(), &asset_id, bid_price);

        if sell_price_met {
            self.internal_complete_sell_order(order, true)?;
        }
        Ok(())
    }
}

// ── Internal implementations ─────────────────────────────────────────────────

impl Contract {
    /// The account entitled to the sale proceeds: the name's owner, or the
    /// creator of the RollApp currently holding the alias.
    pub(crate) fn seller_of(
        &self,
        asset_type: AssetType,
        asset_id: &str,
    ) -> Result<AccountId, DymNsError> {
        match asset_type {
            AssetType::DymName => self
                .internal_get_dym_name(asset_id)
                .map(|record| record.owner)
                .ok_or_else(|| DymNsError::dym_name_not_found(asset_id)),
            AssetType::Alias => {
                let rollapp_id = self
                    .rollapp_of_alias
                    .get(asset_id)
                    .ok_or_else(|| DymNsError::NotFound(format!("alias: {}", asset_id)))?;
                self.roll_apps
                    .get(rollapp_id)
                    .map(|r| r.creator.clone())
                    .ok_or_else(|| {
                        DymNsError::InternalError(format!(
                            "alias bound to unknown RollApp: {}",
                            rollapp_id
                        ))
                    })
            }
        }
    }

    fn check_can_sell(
        &self,
        asset_type: AssetType,
        asset_id: &str,
        caller: &AccountId,
        now: u64,
    ) -> Result<(), DymNsError> {
        match asset_type {
            AssetType::DymName => {
                let record = self
                    .internal_get_dym_name_live(asset_id, now)
                    .ok_or_else(|| DymNsError::dym_name_not_found(asset_id))?;
                if &record.owner != caller {
                    return Err(DymNsError::only_owner("the Dym-Name owner"));
                }
                if record.expire_at <= now + self.params.misc.prohibit_sell_duration_seconds {
                    return Err(DymNsError::FailedPrecondition(
                        "Dym-Name expires too soon to be sold".into(),
                    ));
                }
            }
            AssetType::Alias => {
                if self.is_alias_reserved_in_params(asset_id) {
                    return Err(DymNsError::FailedPrecondition(format!(
                        "alias is reserved and cannot be traded: {}",
                        asset_id
                    )));
                }
                let rollapp_id = self
                    .rollapp_of_alias
                    .get(asset_id)
                    .ok_or_else(|| DymNsError::NotFound(format!("alias: {}", asset_id)))?;
                if !self.is_rollapp_creator(rollapp_id, caller) {
                    return Err(DymNsError::only_owner("the RollApp creator"));
                }
            }
        }
        Ok(())
    }

    /// Finish an order that has a bid: archive it, remove the active record,
    /// transfer the asset, then pay the seller out of escrow.
    ///
    /// The payout is deliberately last — there is no host transaction to
    /// roll a transfer back, so funds must only move once ownership has.
    pub(crate) fn internal_complete_sell_order(
        &mut self,
        order: SellOrder,
        update_expiry_index: bool,
    ) -> Result<(), DymNsError> {
        let bid = order
            .highest_bid
            .clone()
            .ok_or_else(|| DymNsError::InvalidState("Sell-Order has no bid".into()))?;
        if !order.is_finished_at(now_seconds()) {
            return Err(DymNsError::InvalidState(
                "Sell-Order has not finished yet".into(),
            ));
        }
        let seller = self.seller_of(order.asset_type, &order.asset_id)?;

        // Logged and dropped on validation failure; completion proceeds.
        let _ = self.append_historical_sell_order(order.clone());
        self.remove_active_sell_order(order.asset_type, &order.asset_id, update_expiry_index);

        match order.asset_type {
            AssetType::DymName => {
                self.internal_transfer_dym_name_ownership(&order.asset_id, &bid.bidder)?;
            }
            AssetType::Alias => {
                let src_rollapp_id = self
                    .rollapp_of_alias
                    .get(order.asset_id.as_str())
                    .cloned()
                    .ok_or_else(|| {
                        DymNsError::NotFound(format!("alias: {}", order.asset_id))
                    })?;
                let dst_rollapp_id = bid.params.first().ok_or_else(|| {
                    DymNsError::InternalError("alias bid is missing dst_rollapp_id".into())
                })?;
                self.move_alias_to_rollapp(&src_rollapp_id, &order.asset_id, dst_rollapp_id)?;
            }
        }

        pay_out(&seller, bid.price);
        events::emit_sell_order_completed(
            &bid.bidder,
            &seller,
            order.asset_type.label(),
            &order.asset_id,
            bid.price,
        );
        Ok(())
    }

    /// Archive an order to historical without completion (the no-bid expiry
    /// path, and the only legal archival for unfinished orders).
    pub(crate) fn internal_move_sell_order_to_historical(
        &mut self,
        asset_type: AssetType,
        asset_id: &str,
        update_expiry_index: bool,
    ) -> Result<(), DymNsError> {
        let order = self
            .internal_get_sell_order(asset_type, asset_id)
            .ok_or_else(|| DymNsError::sell_order_not_found(asset_id))?;
        if order.highest_bid.is_none() && !order.is_expired_at(now_seconds()) {
            return Err(DymNsError::InvalidState(
                "Sell-Order has not expired yet".into(),
            ));
        }

        let _ = self.append_historical_sell_order(order);
        self.remove_active_sell_order(asset_type, asset_id, update_expiry_index);
        events::emit_sell_order_archived(
            &env::predecessor_account_id(),
            asset_type.label(),
            asset_id,
        );
        Ok(())
    }
}

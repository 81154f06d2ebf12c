use near_sdk::json_types::U128;

use crate::constants::SECONDS_PER_DAY;
use crate::tests::test_utils::*;
use crate::types::AssetType;
use crate::{ArchiveOutcome, Contract, DymNsError, SellOrder};

const ORDER_DURATION: u64 = 3 * 86_400;

fn place_name_order(contract: &mut Contract, min_price: u128, sell_price: Option<u128>) {
    set_caller_with_deposit(&owner(), 1);
    contract
        .place_sell_order(
            AssetType::DymName,
            "myname".to_string(),
            U128(min_price),
            sell_price.map(U128),
        )
        .unwrap();
}

// --- Place ---

#[test]
fn place_order_persists_and_indexes_expiry() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, Some(300));

    let order = contract
        .get_sell_order(AssetType::DymName, "myname".to_string())
        .unwrap();
    assert_eq!(order.min_price, 100);
    assert_eq!(order.sell_price, Some(300));
    assert_eq!(order.expire_at, NOW + ORDER_DURATION);
    assert!(order.highest_bid.is_none());

    let index = contract.active_orders_expiration_of(AssetType::DymName);
    assert_eq!(index.records.len(), 1);
    assert_eq!(index.records[0].asset_id, "myname");
    assert_eq!(index.records[0].expire_at, NOW + ORDER_DURATION);
}

#[test]
fn second_active_order_for_same_asset_fails() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, None);

    set_caller_with_deposit(&owner(), 1);
    let err = contract
        .place_sell_order(AssetType::DymName, "myname".to_string(), U128(100), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::AlreadyExists(_)));
}

#[test]
fn place_order_requires_name_owner() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    set_caller_with_deposit(&buyer(), 1);
    let err = contract
        .place_sell_order(AssetType::DymName, "myname".to_string(), U128(100), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));
}

#[test]
fn place_order_rejected_near_name_expiry() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    // 10 days before expiry: inside the 30-day prohibit-sell window.
    let late = NOW + 355 * SECONDS_PER_DAY;
    set_caller_at(&owner(), late, 1);
    let err = contract
        .place_sell_order(AssetType::DymName, "myname".to_string(), U128(100), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::FailedPrecondition(_)));
}

#[test]
fn zero_min_price_fails() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    set_caller_with_deposit(&owner(), 1);
    let err = contract
        .place_sell_order(AssetType::DymName, "myname".to_string(), U128(0), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::InvalidInput(_)));
}

#[test]
fn sell_price_below_min_fails_and_zero_means_unset() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    set_caller_with_deposit(&owner(), 1);
    let err = contract
        .place_sell_order(
            AssetType::DymName,
            "myname".to_string(),
            U128(100),
            Some(U128(50)),
        )
        .unwrap_err();
    assert!(matches!(err, DymNsError::InvalidInput(_)));

    place_name_order(&mut contract, 100, Some(0));
    let order = contract
        .get_sell_order(AssetType::DymName, "myname".to_string())
        .unwrap();
    assert_eq!(order.sell_price, None);
}

#[test]
fn alias_order_requires_rollapp_creator_and_unreserved_alias() {
    let mut contract = new_contract();
    register_rollapp_with_alias(&mut contract, ROLLAPP_1, &creator(), "ra");

    set_caller_with_deposit(&buyer(), 1);
    let err = contract
        .place_sell_order(AssetType::Alias, "ra".to_string(), U128(100), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));

    // "dym" is declared in params and can never be traded.
    set_caller_with_deposit(&creator(), 1);
    let err = contract
        .place_sell_order(AssetType::Alias, "dym".to_string(), U128(100), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::FailedPrecondition(_)));

    set_caller_with_deposit(&creator(), 1);
    contract
        .place_sell_order(AssetType::Alias, "ra".to_string(), U128(100), None)
        .unwrap();
}

// --- Cancel ---

#[test]
fn cancel_removes_order_and_index_entry() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, None);

    set_caller_with_deposit(&owner(), 1);
    contract
        .cancel_sell_order(AssetType::DymName, "myname".to_string())
        .unwrap();

    assert!(contract
        .get_sell_order(AssetType::DymName, "myname".to_string())
        .is_none());
    assert!(contract
        .active_orders_expiration_of(AssetType::DymName)
        .records
        .is_empty());
}

#[test]
fn cancel_with_bid_fails() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, None);
    set_caller_with_deposit(&bidder(), 150);
    contract
        .purchase_order(AssetType::DymName, "myname".to_string(), None)
        .unwrap();

    set_caller_with_deposit(&owner(), 1);
    let err = contract
        .cancel_sell_order(AssetType::DymName, "myname".to_string())
        .unwrap_err();
    assert!(matches!(err, DymNsError::FailedPrecondition(_)));
}

#[test]
fn cancel_requires_seller() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, None);

    set_caller_with_deposit(&buyer(), 1);
    let err = contract
        .cancel_sell_order(AssetType::DymName, "myname".to_string())
        .unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));
}

// --- Bidding ---

#[test]
fn bids_must_start_at_min_price_and_rise_monotonically() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, Some(300));

    set_caller_with_deposit(&bidder(), 99);
    let err = contract
        .purchase_order(AssetType::DymName, "myname".to_string(), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::InsufficientDeposit(_)));

    set_caller_with_deposit(&bidder(), 150);
    contract
        .purchase_order(AssetType::DymName, "myname".to_string(), None)
        .unwrap();

    // Equal to the highest bid is not enough.
    set_caller_with_deposit(&buyer(), 150);
    let err = contract
        .purchase_order(AssetType::DymName, "myname".to_string(), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::InsufficientDeposit(_)));

    set_caller_with_deposit(&buyer(), 200);
    contract
        .purchase_order(AssetType::DymName, "myname".to_string(), None)
        .unwrap();

    let order = contract
        .get_sell_order(AssetType::DymName, "myname".to_string())
        .unwrap();
    let bid = order.highest_bid.unwrap();
    assert_eq!(bid.bidder, buyer());
    assert_eq!(bid.price, 200);
}

#[test]
fn bid_above_sell_price_fails() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, Some(300));

    set_caller_with_deposit(&bidder(), 301);
    let err = contract
        .purchase_order(AssetType::DymName, "myname".to_string(), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::InvalidInput(_)));
}

#[test]
fn seller_cannot_bid_on_own_order() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, None);

    set_caller_with_deposit(&owner(), 150);
    let err = contract
        .purchase_order(AssetType::DymName, "myname".to_string(), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));
}

#[test]
fn bid_on_expired_order_fails() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, None);

    set_caller_at(&bidder(), NOW + ORDER_DURATION + 1, 150);
    let err = contract
        .purchase_order(AssetType::DymName, "myname".to_string(), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::FailedPrecondition(_)));
}

#[test]
fn bid_matching_sell_price_completes_immediately() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, Some(300));

    set_caller_with_deposit(&bidder(), 300);
    contract
        .purchase_order(AssetType::DymName, "myname".to_string(), None)
        .unwrap();

    // Ownership moved, configs and controller reset.
    let record = contract.get_dym_name("myname".to_string()).unwrap();
    assert_eq!(record.owner, bidder());
    assert_eq!(record.controller, bidder());

    // Reverse indices follow.
    assert!(contract.get_dym_names_owned_by(owner()).is_empty());
    assert_eq!(contract.get_dym_names_owned_by(bidder()).len(), 1);

    // The order is archived, not active.
    assert!(contract
        .get_sell_order(AssetType::DymName, "myname".to_string())
        .is_none());
    assert!(contract
        .active_orders_expiration_of(AssetType::DymName)
        .records
        .is_empty());
    let historical =
        contract.get_historical_sell_orders(AssetType::DymName, "myname".to_string());
    assert_eq!(historical.len(), 1);
    assert_eq!(historical[0].highest_bid.as_ref().unwrap().price, 300);
}

#[test]
fn alias_purchase_moves_alias_to_bidder_rollapp() {
    let mut contract = new_contract();
    register_rollapp_with_alias(&mut contract, ROLLAPP_1, &creator(), "ra");
    register_rollapp(&mut contract, ROLLAPP_2, &bidder());

    set_caller_with_deposit(&creator(), 1);
    contract
        .place_sell_order(AssetType::Alias, "ra".to_string(), U128(100), Some(U128(300)))
        .unwrap();

    // Alias bids must name the destination RollApp.
    set_caller_with_deposit(&bidder(), 300);
    let err = contract
        .purchase_order(AssetType::Alias, "ra".to_string(), None)
        .unwrap_err();
    assert!(matches!(err, DymNsError::InvalidInput(_)));

    set_caller_with_deposit(&bidder(), 300);
    contract
        .purchase_order(
            AssetType::Alias,
            "ra".to_string(),
            Some(ROLLAPP_2.to_string()),
        )
        .unwrap();

    assert_eq!(
        contract.get_rollapp_id_by_alias("ra".to_string()),
        Some(ROLLAPP_2.to_string())
    );
    assert!(contract.get_aliases_of_rollapp(ROLLAPP_1.to_string()).is_empty());
}

// --- Historical retention ---

fn historical_order(expire_at: u64, min_price: u128) -> SellOrder {
    SellOrder {
        asset_id: "myname".to_string(),
        asset_type: AssetType::DymName,
        expire_at,
        min_price,
        sell_price: None,
        highest_bid: None,
    }
}

#[test]
fn min_expiry_tracks_true_minimum() {
    let mut contract = new_contract();
    set_caller(&admin());

    assert_eq!(
        contract.append_historical_sell_order(historical_order(NOW + 100, 10)),
        ArchiveOutcome::Persisted
    );
    assert_eq!(
        contract.append_historical_sell_order(historical_order(NOW + 50, 10)),
        ArchiveOutcome::Persisted
    );
    assert_eq!(
        contract.append_historical_sell_order(historical_order(NOW + 200, 10)),
        ArchiveOutcome::Persisted
    );

    assert_eq!(
        contract.get_min_expiry_historical_sell_order(AssetType::DymName, "myname".to_string()),
        Some(NOW + 50)
    );
}

#[test]
fn invalid_historical_entry_is_dropped_not_fatal() {
    let mut contract = new_contract();
    set_caller(&admin());

    // min_price 0 fails validation: dropped with a reason, list untouched.
    let outcome = contract.append_historical_sell_order(historical_order(NOW + 100, 0));
    assert!(matches!(outcome, ArchiveOutcome::Skipped(_)));
    assert!(contract
        .get_historical_sell_orders(AssetType::DymName, "myname".to_string())
        .is_empty());
    assert!(contract
        .get_min_expiry_historical_sell_order(AssetType::DymName, "myname".to_string())
        .is_none());
}

#[test]
fn unexpired_order_without_bid_cannot_be_archived() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    place_name_order(&mut contract, 100, None);

    set_caller(&admin());
    let err = contract
        .internal_move_sell_order_to_historical(AssetType::DymName, "myname", true)
        .unwrap_err();
    assert!(matches!(err, DymNsError::InvalidState(_)));
}

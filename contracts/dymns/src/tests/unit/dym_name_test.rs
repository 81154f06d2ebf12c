use near_sdk::json_types::U128;

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_YEAR};
use crate::tests::test_utils::*;
use crate::types::AssetType;
use crate::DymNsError;

// --- Register ---

#[test]
fn register_new_name_sets_record_and_owner_index() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    let record = contract.get_dym_name("myname".to_string()).unwrap();
    assert_eq!(record.owner, owner());
    assert_eq!(record.controller, owner());
    assert_eq!(record.expire_at, NOW + SECONDS_PER_YEAR);
    assert!(record.configs.is_empty());

    let owned = contract.get_dym_names_owned_by(owner());
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].name, "myname");
}

#[test]
fn register_prices_by_name_length() {
    let contract = new_contract();
    let one = contract.estimate_register_name("a".to_string(), None, 1);
    let five = contract.estimate_register_name("abcde".to_string(), None, 1);
    assert_eq!(one.total_price.0, 100_000);
    assert_eq!(five.total_price.0, 5_000);

    // Additional years are priced at the extension rate.
    let two_years = contract.estimate_register_name("abcde".to_string(), None, 2);
    assert_eq!(two_years.total_price.0, 5_000 + 3_000);
}

#[test]
fn register_with_stale_confirm_price_fails() {
    let mut contract = new_contract();
    set_caller_with_deposit(&owner(), 5_000);
    let err = contract
        .register_name("myname".to_string(), 1, U128(4_999))
        .unwrap_err();
    assert!(matches!(err, DymNsError::UnacknowledgedPayment(_)));
    assert!(contract.get_dym_name("myname".to_string()).is_none());
}

#[test]
fn register_with_insufficient_deposit_fails() {
    let mut contract = new_contract();
    set_caller_with_deposit(&owner(), 4_999);
    let err = contract
        .register_name("myname".to_string(), 1, U128(5_000))
        .unwrap_err();
    assert!(matches!(err, DymNsError::InsufficientDeposit(_)));
}

#[test]
fn register_live_name_of_other_owner_fails() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    set_caller_with_deposit(&buyer(), 5_000);
    let err = contract
        .register_name("myname".to_string(), 1, U128(5_000))
        .unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));
}

#[test]
fn renewal_extends_from_current_expiry() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    register(&mut contract, &owner(), "myname", 1);

    let record = contract.get_dym_name("myname".to_string()).unwrap();
    assert_eq!(record.expire_at, NOW + 2 * SECONDS_PER_YEAR);
}

#[test]
fn renewal_is_priced_at_extension_rate() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    let estimate =
        contract.estimate_register_name("myname".to_string(), Some(owner()), 2);
    assert_eq!(estimate.first_year_price.0, 0);
    assert_eq!(estimate.total_price.0, 2 * 3_000);
}

#[test]
fn grace_period_rejects_non_owner() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    // One day past expiry: inside the 30-day grace period.
    let in_grace = NOW + SECONDS_PER_YEAR + SECONDS_PER_DAY;
    set_caller_at(&buyer(), in_grace, 5_000);
    let err = contract
        .register_name("myname".to_string(), 1, U128(5_000))
        .unwrap_err();
    assert!(matches!(err, DymNsError::FailedPrecondition(_)));
}

#[test]
fn owner_can_renew_within_grace() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    let in_grace = NOW + SECONDS_PER_YEAR + SECONDS_PER_DAY;
    set_caller_at(&owner(), in_grace, 3_000);
    contract
        .register_name("myname".to_string(), 1, U128(3_000))
        .unwrap();

    let record = contract.get_dym_name("myname".to_string()).unwrap();
    // Expired: the renewal year counts from now, not from the old expiry.
    assert_eq!(record.expire_at, in_grace + SECONDS_PER_YEAR);
}

#[test]
fn take_over_past_grace_starts_fresh() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    let past_grace = NOW + SECONDS_PER_YEAR + 31 * SECONDS_PER_DAY;
    set_caller_at(&buyer(), past_grace, 5_000);
    contract
        .register_name("myname".to_string(), 1, U128(5_000))
        .unwrap();

    let record = contract.get_dym_name("myname".to_string()).unwrap();
    assert_eq!(record.owner, buyer());
    assert_eq!(record.expire_at, past_grace + SECONDS_PER_YEAR);

    // The old owner's index entry is gone.
    assert!(contract.get_dym_names_owned_by(owner()).is_empty());
}

// --- Transfer ownership ---

#[test]
fn transfer_clears_configs_and_moves_index() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    set_caller_with_deposit(&owner(), 1);
    contract
        .update_resolve_address(
            "myname".to_string(),
            String::new(),
            "sub".to_string(),
            bidder().to_string(),
        )
        .unwrap();

    set_caller_with_deposit(&owner(), 1);
    contract
        .transfer_dym_name_ownership("myname".to_string(), buyer())
        .unwrap();

    let record = contract.get_dym_name("myname".to_string()).unwrap();
    assert_eq!(record.owner, buyer());
    assert_eq!(record.controller, buyer());
    assert!(record.configs.is_empty());

    assert!(contract.get_dym_names_owned_by(owner()).is_empty());
    assert_eq!(contract.get_dym_names_owned_by(buyer()).len(), 1);
}

#[test]
fn transfer_requires_owner() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    set_caller_with_deposit(&buyer(), 1);
    let err = contract
        .transfer_dym_name_ownership("myname".to_string(), buyer())
        .unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));
}

#[test]
fn transfer_blocked_by_active_sell_order() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    set_caller_with_deposit(&owner(), 1);
    contract
        .place_sell_order(AssetType::DymName, "myname".to_string(), U128(100), None)
        .unwrap();

    set_caller_with_deposit(&owner(), 1);
    let err = contract
        .transfer_dym_name_ownership("myname".to_string(), buyer())
        .unwrap_err();
    assert!(matches!(err, DymNsError::FailedPrecondition(_)));
}

// --- Controller & configs ---

#[test]
fn controller_manages_configs_owner_does_not() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    set_caller_with_deposit(&owner(), 1);
    contract
        .set_controller("myname".to_string(), bidder())
        .unwrap();

    // The owner is no longer the controller.
    set_caller_with_deposit(&owner(), 1);
    let err = contract
        .update_resolve_address(
            "myname".to_string(),
            String::new(),
            String::new(),
            buyer().to_string(),
        )
        .unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));

    set_caller_with_deposit(&bidder(), 1);
    contract
        .update_resolve_address(
            "myname".to_string(),
            String::new(),
            String::new(),
            buyer().to_string(),
        )
        .unwrap();
    let record = contract.get_dym_name("myname".to_string()).unwrap();
    assert_eq!(record.config_value("", ""), Some(buyer().as_str()));
}

#[test]
fn config_is_unique_per_chain_and_sub_name() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    for value in [buyer(), bidder()] {
        set_caller_with_deposit(&owner(), 1);
        contract
            .update_resolve_address(
                "myname".to_string(),
                String::new(),
                "sub".to_string(),
                value.to_string(),
            )
            .unwrap();
    }

    let record = contract.get_dym_name("myname".to_string()).unwrap();
    assert_eq!(record.configs.len(), 1);
    assert_eq!(record.config_value("", "sub"), Some(bidder().as_str()));
}

#[test]
fn empty_resolve_to_deletes_the_config() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    set_caller_with_deposit(&owner(), 1);
    contract
        .update_resolve_address(
            "myname".to_string(),
            String::new(),
            "sub".to_string(),
            buyer().to_string(),
        )
        .unwrap();

    set_caller_with_deposit(&owner(), 1);
    contract
        .update_resolve_address(
            "myname".to_string(),
            String::new(),
            "sub".to_string(),
            String::new(),
        )
        .unwrap();

    let record = contract.get_dym_name("myname".to_string()).unwrap();
    assert!(record.configs.is_empty());
}

#[test]
fn host_chain_config_value_must_be_account_id() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    set_caller_with_deposit(&owner(), 1);
    let err = contract
        .update_resolve_address(
            "myname".to_string(),
            String::new(),
            String::new(),
            "NOT a valid account".to_string(),
        )
        .unwrap_err();
    assert!(matches!(err, DymNsError::InvalidInput(_)));
}

// --- Queries ---

#[test]
fn owned_by_excludes_expired_names() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);

    set_caller_at(&owner(), NOW + SECONDS_PER_YEAR + 1, 0);
    assert!(contract.get_dym_names_owned_by(owner()).is_empty());
}

// --- Prune ---

#[test]
fn prune_cascades_to_orders_and_indices() {
    let mut contract = new_contract();
    register(&mut contract, &owner(), "myname", 1);
    set_caller_with_deposit(&owner(), 1);
    contract
        .place_sell_order(AssetType::DymName, "myname".to_string(), U128(100), None)
        .unwrap();

    set_caller(&admin());
    contract.internal_prune_dym_name("myname");

    assert!(contract.get_dym_name("myname".to_string()).is_none());
    assert!(contract.get_dym_names_owned_by(owner()).is_empty());
    assert!(contract
        .get_sell_order(AssetType::DymName, "myname".to_string())
        .is_none());
    assert!(contract
        .get_historical_sell_orders(AssetType::DymName, "myname".to_string())
        .is_empty());
    assert!(contract
        .get_min_expiry_historical_sell_order(AssetType::DymName, "myname".to_string())
        .is_none());

    // Pruning a missing name is a no-op, not an error.
    contract.internal_prune_dym_name("myname");
}

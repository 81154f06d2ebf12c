use near_sdk::json_types::U128;

use crate::tests::test_utils::*;
use crate::{AliasesOfChainId, DymNsError};

// --- Validation ---

#[test]
fn default_test_params_validate() {
    assert!(default_params().validate().is_ok());
}

#[test]
fn price_tiers_must_strictly_decrease() {
    let mut params = default_params();
    params.price.price_2_letters = params.price.price_1_letter;
    assert!(params.validate().is_err());
}

#[test]
fn zero_price_tier_is_rejected() {
    let mut params = default_params();
    params.price.price_5_plus_letters = U128(0);
    assert!(params.validate().is_err());
}

#[test]
fn extension_price_capped_by_last_tier() {
    let mut params = default_params();
    params.price.price_extends = U128(params.price.price_5_plus_letters.0 + 1);
    assert!(params.validate().is_err());
}

#[test]
fn zero_min_offer_price_is_rejected() {
    let mut params = default_params();
    params.price.min_offer_price = U128(0);
    assert!(params.validate().is_err());
}

#[test]
fn duplicate_alias_across_chains_is_rejected() {
    let mut params = default_params();
    params.chains.aliases_of_chain_ids.push(AliasesOfChainId {
        chain_id: "otherchain-1".to_string(),
        aliases: vec!["dym".to_string()],
    });
    assert!(params.validate().is_err());
}

#[test]
fn duplicate_chain_id_is_rejected() {
    let mut params = default_params();
    let entry = params.chains.aliases_of_chain_ids[0].clone();
    params.chains.aliases_of_chain_ids.push(entry);
    assert!(params.validate().is_err());
}

#[test]
fn alias_colliding_with_chain_id_is_rejected() {
    let mut params = default_params();
    params.chains.aliases_of_chain_ids.push(AliasesOfChainId {
        chain_id: "otherchain".to_string(),
        aliases: Vec::new(),
    });
    params.chains.aliases_of_chain_ids[0]
        .aliases
        .push("otherchain".to_string());
    assert!(params.validate().is_err());
}

#[test]
fn empty_epoch_identifier_is_rejected() {
    let mut params = default_params();
    params.misc.end_epoch_hook_identifier = String::new();
    assert!(params.validate().is_err());
}

#[test]
fn zero_sell_order_duration_is_rejected() {
    let mut params = default_params();
    params.misc.sell_order_duration_seconds = 0;
    assert!(params.validate().is_err());
}

// --- update_params ---

#[test]
fn update_params_is_owner_gated() {
    let mut contract = new_contract();

    set_caller_with_deposit(&owner(), 1);
    let err = contract.update_params(default_params()).unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));
}

#[test]
fn update_params_rejects_invalid_struct() {
    let mut contract = new_contract();
    let mut params = default_params();
    params.price.min_offer_price = U128(0);

    set_caller_with_deposit(&admin(), 1);
    let err = contract.update_params(params).unwrap_err();
    assert!(matches!(err, DymNsError::InvalidInput(_)));
}

#[test]
fn update_params_applies_atomically() {
    let mut contract = new_contract();
    let mut params = default_params();
    params.price.min_offer_price = U128(42_000);

    set_caller_with_deposit(&admin(), 1);
    contract.update_params(params).unwrap();

    assert_eq!(contract.get_params().price.min_offer_price.0, 42_000);
}

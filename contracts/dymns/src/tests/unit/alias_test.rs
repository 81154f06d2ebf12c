use crate::tests::test_utils::*;
use crate::DymNsError;

// --- Set ---

#[test]
fn set_alias_binds_and_first_stays_primary() {
    let mut contract = new_contract();
    register_rollapp(&mut contract, ROLLAPP_1, &creator());

    for alias in ["ra", "rollie"] {
        set_caller_with_deposit(&creator(), 1);
        contract
            .set_alias_for_rollapp(ROLLAPP_1.to_string(), alias.to_string())
            .unwrap();
    }

    assert_eq!(
        contract.get_alias_by_rollapp(ROLLAPP_1.to_string()),
        Some("ra".to_string())
    );
    assert_eq!(
        contract.get_aliases_of_rollapp(ROLLAPP_1.to_string()),
        vec!["ra", "rollie"]
    );
    assert_eq!(
        contract.get_rollapp_id_by_alias("ra".to_string()),
        Some(ROLLAPP_1.to_string())
    );
}

#[test]
fn rebinding_same_alias_is_idempotent() {
    let mut contract = new_contract();
    register_rollapp_with_alias(&mut contract, ROLLAPP_1, &creator(), "ra");

    set_caller_with_deposit(&creator(), 1);
    contract
        .set_alias_for_rollapp(ROLLAPP_1.to_string(), "ra".to_string())
        .unwrap();

    assert_eq!(
        contract.get_aliases_of_rollapp(ROLLAPP_1.to_string()),
        vec!["ra"]
    );
}

#[test]
fn alias_is_exclusive_to_one_rollapp() {
    let mut contract = new_contract();
    register_rollapp_with_alias(&mut contract, ROLLAPP_1, &creator(), "ra");
    register_rollapp(&mut contract, ROLLAPP_2, &buyer());

    set_caller_with_deposit(&buyer(), 1);
    let err = contract
        .set_alias_for_rollapp(ROLLAPP_2.to_string(), "ra".to_string())
        .unwrap_err();
    match err {
        DymNsError::Unauthorized(msg) => assert!(msg.contains(ROLLAPP_1), "got: {}", msg),
        other => panic!("expected Unauthorized, got {:?}", other),
    }
    // The original binding is untouched.
    assert_eq!(
        contract.get_rollapp_id_by_alias("ra".to_string()),
        Some(ROLLAPP_1.to_string())
    );
}

#[test]
fn set_alias_requires_registered_rollapp_and_creator() {
    let mut contract = new_contract();

    set_caller_with_deposit(&creator(), 1);
    let err = contract
        .set_alias_for_rollapp(ROLLAPP_1.to_string(), "ra".to_string())
        .unwrap_err();
    assert!(matches!(err, DymNsError::NotFound(_)));

    register_rollapp(&mut contract, ROLLAPP_1, &creator());
    set_caller_with_deposit(&buyer(), 1);
    let err = contract
        .set_alias_for_rollapp(ROLLAPP_1.to_string(), "ra".to_string())
        .unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));
}

#[test]
fn params_reserved_alias_cannot_be_bound() {
    let mut contract = new_contract();
    register_rollapp(&mut contract, ROLLAPP_1, &creator());

    set_caller_with_deposit(&creator(), 1);
    let err = contract
        .set_alias_for_rollapp(ROLLAPP_1.to_string(), "dym".to_string())
        .unwrap_err();
    assert!(matches!(err, DymNsError::FailedPrecondition(_)));
}

#[test]
fn malformed_alias_is_rejected() {
    let mut contract = new_contract();
    register_rollapp(&mut contract, ROLLAPP_1, &creator());

    for alias in ["", "UPPER", "with-dash", "waytoolongalias"] {
        set_caller_with_deposit(&creator(), 1);
        let err = contract
            .set_alias_for_rollapp(ROLLAPP_1.to_string(), alias.to_string())
            .unwrap_err();
        assert!(matches!(err, DymNsError::InvalidInput(_)), "alias {:?}", alias);
    }
}

// --- Remove ---

#[test]
fn removing_sole_alias_clears_the_record() {
    let mut contract = new_contract();
    register_rollapp_with_alias(&mut contract, ROLLAPP_1, &creator(), "ra");

    set_caller_with_deposit(&creator(), 1);
    contract
        .remove_alias_from_rollapp(ROLLAPP_1.to_string(), "ra".to_string())
        .unwrap();

    assert!(contract.get_aliases_of_rollapp(ROLLAPP_1.to_string()).is_empty());
    assert_eq!(contract.get_alias_by_rollapp(ROLLAPP_1.to_string()), None);
    assert_eq!(contract.get_rollapp_id_by_alias("ra".to_string()), None);
}

#[test]
fn remove_unbound_alias_fails() {
    let mut contract = new_contract();
    register_rollapp(&mut contract, ROLLAPP_1, &creator());

    set_caller_with_deposit(&creator(), 1);
    let err = contract
        .remove_alias_from_rollapp(ROLLAPP_1.to_string(), "ra".to_string())
        .unwrap_err();
    assert!(matches!(err, DymNsError::NotFound(_)));
}

#[test]
fn remove_alias_bound_to_another_rollapp_fails() {
    let mut contract = new_contract();
    register_rollapp_with_alias(&mut contract, ROLLAPP_1, &creator(), "ra");
    register_rollapp(&mut contract, ROLLAPP_2, &buyer());

    set_caller_with_deposit(&buyer(), 1);
    let err = contract
        .remove_alias_from_rollapp(ROLLAPP_2.to_string(), "ra".to_string())
        .unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));
}

// --- Move ---

#[test]
fn move_appends_to_destination_and_clears_source() {
    let mut contract = new_contract();
    register_rollapp_with_alias(&mut contract, ROLLAPP_1, &creator(), "ra");
    register_rollapp_with_alias(&mut contract, ROLLAPP_2, &buyer(), "other");

    set_caller(&admin());
    contract
        .move_alias_to_rollapp(ROLLAPP_1, "ra", ROLLAPP_2)
        .unwrap();

    assert!(contract.get_aliases_of_rollapp(ROLLAPP_1.to_string()).is_empty());
    // The destination's existing primary alias stays primary.
    assert_eq!(
        contract.get_aliases_of_rollapp(ROLLAPP_2.to_string()),
        vec!["other", "ra"]
    );
    assert_eq!(
        contract.get_rollapp_id_by_alias("ra".to_string()),
        Some(ROLLAPP_2.to_string())
    );
}

#[test]
fn move_distinguishes_missing_source_and_destination() {
    let mut contract = new_contract();
    register_rollapp_with_alias(&mut contract, ROLLAPP_1, &creator(), "ra");
    set_caller(&admin());

    let err = contract
        .move_alias_to_rollapp("ghost-rollapp-1", "ra", ROLLAPP_1)
        .unwrap_err();
    match err {
        DymNsError::NotFound(msg) => assert!(msg.contains("source RollApp"), "got: {}", msg),
        other => panic!("expected NotFound, got {:?}", other),
    }

    let err = contract
        .move_alias_to_rollapp(ROLLAPP_1, "ra", "ghost-rollapp-1")
        .unwrap_err();
    match err {
        DymNsError::NotFound(msg) => assert!(msg.contains("destination RollApp"), "got: {}", msg),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn move_of_unbound_or_foreign_alias_fails() {
    let mut contract = new_contract();
    register_rollapp(&mut contract, ROLLAPP_1, &creator());
    register_rollapp(&mut contract, ROLLAPP_2, &buyer());
    set_caller(&admin());

    let err = contract
        .move_alias_to_rollapp(ROLLAPP_1, "ra", ROLLAPP_2)
        .unwrap_err();
    match err {
        DymNsError::NotFound(msg) => assert!(msg.contains("alias not found"), "got: {}", msg),
        other => panic!("expected NotFound, got {:?}", other),
    }

    // Bound, but not to the claimed source.
    set_caller_with_deposit(&buyer(), 1);
    contract
        .set_alias_for_rollapp(ROLLAPP_2.to_string(), "ra".to_string())
        .unwrap();
    set_caller(&admin());
    let err = contract
        .move_alias_to_rollapp(ROLLAPP_1, "ra", ROLLAPP_2)
        .unwrap_err();
    assert!(matches!(err, DymNsError::Unauthorized(_)));
}

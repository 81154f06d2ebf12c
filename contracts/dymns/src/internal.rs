// Internal helper functions shared across modules.

use near_sdk::{env, AccountId, NearToken, Promise};

use crate::constants::ONE_YOCTO;
use crate::errors::DymNsError;
use crate::Contract;

/// Block time as unix seconds (`block_timestamp` is nanoseconds).
pub(crate) fn now_seconds() -> u64 {
    env::block_timestamp() / 1_000_000_000
}

/// Check exactly one yoctoNEAR is attached (full-access-key confirmation;
/// also the anti-spam floor on mutating methods).
pub(crate) fn check_one_yocto() -> Result<(), DymNsError> {
    if env::attached_deposit().as_yoctonear() != ONE_YOCTO.as_yoctonear() {
        return Err(DymNsError::InsufficientDeposit(
            "Requires attached deposit of exactly 1 yoctoNEAR".into(),
        ));
    }
    Ok(())
}

/// Pay `amount` yoctoNEAR out of the contract escrow. Transfers of zero are
/// skipped.
pub(crate) fn pay_out(recipient: &AccountId, amount: u128) {
    if amount > 0 {
        let _ = Promise::new(recipient.clone()).transfer(NearToken::from_yoctonear(amount));
    }
}

impl Contract {
    pub(crate) fn check_contract_owner(&self, caller: &AccountId) -> Result<(), DymNsError> {
        if caller != &self.owner_id {
            return Err(DymNsError::only_owner("the contract owner"));
        }
        Ok(())
    }

    pub(crate) fn check_epoch_scheduler(&self, caller: &AccountId) -> Result<(), DymNsError> {
        if caller != &self.epoch_scheduler {
            return Err(DymNsError::only_owner("the epoch scheduler"));
        }
        Ok(())
    }

    /// The attached deposit must equal `required` exactly (escrowed amounts
    /// are exact; surplus would be stranded).
    pub(crate) fn check_exact_deposit(&self, required: u128) -> Result<(), DymNsError> {
        let attached = env::attached_deposit().as_yoctonear();
        if attached != required {
            return Err(DymNsError::InsufficientDeposit(format!(
                "requires attached deposit of exactly {} yoctoNEAR, got {}",
                required, attached
            )));
        }
        Ok(())
    }
}

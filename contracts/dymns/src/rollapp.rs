//! In-contract RollApp registry.
//!
//! Stands in for the host's RollApp module: records which chain-ids are
//! RollApps and who created them. Creator checks authorize alias
//! registration and alias trading.

use near_sdk::{env, near, AccountId};

use crate::dym_name::types::is_valid_chain_id;
use crate::errors::DymNsError;
use crate::types::RollApp;
use crate::{events, Contract, ContractExt};

#[near]
impl Contract {
    /// Contract owner only.
    #[payable]
    #[handle_result]
    pub fn register_roll_app(
        &mut self,
        rollapp_id: String,
        creator: AccountId,
    ) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();
        self.check_contract_owner(&caller)?;

        if !is_valid_chain_id(&rollapp_id) {
            return Err(DymNsError::InvalidInput(format!(
                "invalid RollApp chain-id: {}",
                rollapp_id
            )));
        }
        if self.roll_apps.contains_key(&rollapp_id) {
            return Err(DymNsError::AlreadyExists(format!(
                "RollApp: {}",
                rollapp_id
            )));
        }

        self.roll_apps.insert(
            rollapp_id.clone(),
            RollApp {
                rollapp_id: rollapp_id.clone(),
                creator: creator.clone(),
            },
        );
        events::emit_roll_app_registered(&caller, &rollapp_id, &creator);
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn get_roll_app(&self, rollapp_id: String) -> Option<RollApp> {
        self.roll_apps.get(&rollapp_id).cloned()
    }
}

impl Contract {
    pub(crate) fn is_roll_app(&self, rollapp_id: &str) -> bool {
        self.roll_apps.contains_key(rollapp_id)
    }

    pub(crate) fn is_rollapp_creator(&self, rollapp_id: &str, account: &AccountId) -> bool {
        self.roll_apps
            .get(rollapp_id)
            .is_some_and(|r| &r.creator == account)
    }
}

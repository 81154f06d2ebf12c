//! Alias registry: RollApp chain-id ↔ alias bindings.
//!
//! An alias belongs to at most one RollApp; a RollApp holds an
//! insertion-ordered list of aliases whose first entry is the primary one
//! returned by single-alias lookups.

use near_sdk::{env, near};

use crate::dym_name::types::is_valid_alias;
use crate::errors::DymNsError;
use crate::{events, Contract, ContractExt};

#[near]
impl Contract {
    /// Bind an alias to a RollApp. RollApp-creator only. Binding the same
    /// alias to the same RollApp twice is a no-op.
    #[payable]
    #[handle_result]
    pub fn set_alias_for_rollapp(
        &mut self,
        rollapp_id: String,
        alias: String,
    ) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();

        if !self.is_roll_app(&rollapp_id) {
            return Err(DymNsError::not_a_rollapp(&rollapp_id));
        }
        if !self.is_rollapp_creator(&rollapp_id, &caller) {
            return Err(DymNsError::only_owner("the RollApp creator"));
        }
        if !is_valid_alias(&alias) {
            return Err(DymNsError::InvalidInput(format!("invalid alias: {}", alias)));
        }
        if self.params.chains.is_declared_alias_or_chain_id(&alias) {
            return Err(DymNsError::FailedPrecondition(format!(
                "alias is reserved in params: {}",
                alias
            )));
        }

        match self.rollapp_of_alias.get(alias.as_str()) {
            Some(holder) if holder == &rollapp_id => return Ok(()),
            Some(holder) => return Err(DymNsError::alias_in_use(holder)),
            None => {}
        }

        self.bind_alias(&rollapp_id, &alias);
        events::emit_alias_set(&caller, &rollapp_id, &alias);
        Ok(())
    }

    /// Unbind an alias from a RollApp. RollApp-creator only. Removing the
    /// sole alias clears the record entirely.
    #[payable]
    #[handle_result]
    pub fn remove_alias_from_rollapp(
        &mut self,
        rollapp_id: String,
        alias: String,
    ) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();

        if !self.is_roll_app(&rollapp_id) {
            return Err(DymNsError::not_a_rollapp(&rollapp_id));
        }
        if !self.is_rollapp_creator(&rollapp_id, &caller) {
            return Err(DymNsError::only_owner("the RollApp creator"));
        }
        if !is_valid_alias(&alias) {
            return Err(DymNsError::InvalidInput(format!("invalid alias: {}", alias)));
        }
        match self.rollapp_of_alias.get(alias.as_str()) {
            None => return Err(DymNsError::NotFound(format!("alias: {}", alias))),
            Some(holder) if holder != &rollapp_id => {
                return Err(DymNsError::alias_in_use(holder));
            }
            Some(_) => {}
        }

        self.unbind_alias(&rollapp_id, &alias);
        events::emit_alias_removed(&caller, &rollapp_id, &alias);
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────

    /// The primary (first-bound) alias, if any.
    pub fn get_alias_by_rollapp(&self, rollapp_id: String) -> Option<String> {
        self.aliases_of_rollapp
            .get(rollapp_id.as_str())
            .and_then(|aliases| aliases.first().cloned())
    }

    pub fn get_aliases_of_rollapp(&self, rollapp_id: String) -> Vec<String> {
        self.aliases_of_rollapp
            .get(rollapp_id.as_str())
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_rollapp_id_by_alias(&self, alias: String) -> Option<String> {
        self.rollapp_of_alias.get(alias.as_str()).cloned()
    }
}

// ── Internal implementations ─────────────────────────────────────────────────

impl Contract {
    fn bind_alias(&mut self, rollapp_id: &str, alias: &str) {
        match self.aliases_of_rollapp.get_mut(rollapp_id) {
            Some(aliases) => {
                if !aliases.iter().any(|a| a == alias) {
                    aliases.push(alias.to_string());
                }
            }
            None => {
                self.aliases_of_rollapp
                    .insert(rollapp_id.to_string(), vec![alias.to_string()]);
            }
        }
        self.rollapp_of_alias
            .insert(alias.to_string(), rollapp_id.to_string());
    }

    fn unbind_alias(&mut self, rollapp_id: &str, alias: &str) {
        if let Some(aliases) = self.aliases_of_rollapp.get_mut(rollapp_id) {
            aliases.retain(|a| a != alias);
            if aliases.is_empty() {
                self.aliases_of_rollapp.remove(rollapp_id);
            }
        }
        self.rollapp_of_alias.remove(alias);
    }

    /// Reassign an alias between RollApps; the trade-completion path.
    /// The alias lands at the end of the destination's list (the destination's
    /// existing primary alias stays primary).
    pub(crate) fn move_alias_to_rollapp(
        &mut self,
        src_rollapp_id: &str,
        alias: &str,
        dst_rollapp_id: &str,
    ) -> Result<(), DymNsError> {
        if !self.is_roll_app(src_rollapp_id) {
            return Err(DymNsError::NotFound(format!(
                "source RollApp does not exists: {}",
                src_rollapp_id
            )));
        }
        if !self.is_roll_app(dst_rollapp_id) {
            return Err(DymNsError::NotFound(format!(
                "destination RollApp does not exists: {}",
                dst_rollapp_id
            )));
        }
        if !is_valid_alias(alias) {
            return Err(DymNsError::InvalidInput(format!("invalid alias: {}", alias)));
        }
        match self.rollapp_of_alias.get(alias) {
            None => return Err(DymNsError::NotFound(format!("alias not found: {}", alias))),
            Some(holder) if holder != src_rollapp_id => {
                return Err(DymNsError::alias_in_use(holder));
            }
            Some(_) => {}
        }

        self.unbind_alias(src_rollapp_id, alias);
        self.bind_alias(dst_rollapp_id, alias);
        events::emit_alias_moved(
            &env::predecessor_account_id(),
            alias,
            src_rollapp_id,
            dst_rollapp_id,
        );
        Ok(())
    }

    /// True when the alias is reserved by params (declared as an alias or a
    /// chain-id, host chain-id included); reserved aliases cannot be traded.
    pub(crate) fn is_alias_reserved_in_params(&self, alias: &str) -> bool {
        self.params.chains.is_declared_alias_or_chain_id(alias)
    }
}

//! Dym-Name lifecycle message handlers: register / renew / take-over,
//! ownership transfer, controller changes, and resolution-config updates.

use near_sdk::json_types::U128;
use near_sdk::{env, near, AccountId};

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_YEAR};
use crate::dym_name::types::{
    is_0x_address, is_host_address, is_valid_chain_id, is_valid_dym_name, is_valid_sub_name_path,
    DymName, DymNameConfig, DymNameConfigType,
};
use crate::errors::DymNsError;
use crate::internal::{now_seconds, pay_out};
use crate::types::{make_asset_key, AssetType};
use crate::{events, Contract, ContractExt};

/// Price breakdown returned by `estimate_register_name`.
#[near(serializers = [json])]
#[derive(Clone, Debug)]
pub struct RegisterNameEstimate {
    /// Zero for pure renewals.
    pub first_year_price: U128,
    pub total_price: U128,
}

enum RegistrationKind {
    /// Fresh name, or a take-over of one expired past its grace period.
    New { prune_first: bool },
    /// Current owner extending a live (or in-grace) name.
    Renewal(DymName),
}

#[near]
impl Contract {
    /// Register, renew, or take over a Dym-Name for `duration_years`.
    ///
    /// `confirm_price` must equal the server-computed cost — a mismatch means
    /// the client priced against stale params and is rejected before any
    /// state changes. Attached deposit must cover the cost; surplus is
    /// refunded.
    #[payable]
    #[handle_result]
    pub fn register_name(
        &mut self,
        name: String,
        duration_years: u32,
        confirm_price: U128,
    ) -> Result<(), DymNsError> {
        let caller = env::predecessor_account_id();
        if !is_valid_dym_name(&name) {
            return Err(DymNsError::InvalidInput(format!(
                "invalid Dym-Name: {}",
                name
            )));
        }
        if duration_years == 0 {
            return Err(DymNsError::InvalidInput(
                "duration must be at least one year".into(),
            ));
        }

        let now = now_seconds();
        let kind = self.classify_registration(&name, &caller, now)?;

        let cost = match &kind {
            RegistrationKind::New { .. } => self.new_registration_cost(&name, duration_years),
            RegistrationKind::Renewal(_) => self.renewal_cost(duration_years),
        };
        if confirm_price.0 != cost {
            return Err(DymNsError::UnacknowledgedPayment(format!(
                "confirmed price {} does not match computed cost {}",
                confirm_price.0, cost
            )));
        }
        let attached = env::attached_deposit().as_yoctonear();
        if attached < cost {
            return Err(DymNsError::InsufficientDeposit(format!(
                "requires at least {} yoctoNEAR attached",
                cost
            )));
        }

        match kind {
            RegistrationKind::New { prune_first } => {
                if prune_first {
                    self.internal_prune_dym_name(&name);
                }
                let expire_at = now + u64::from(duration_years) * SECONDS_PER_YEAR;
                self.internal_set_dym_name(DymName {
                    name: name.clone(),
                    owner: caller.clone(),
                    controller: caller.clone(),
                    expire_at,
                    configs: Vec::new(),
                })?;
                events::emit_dym_name_registered(&caller, &name, expire_at, cost);
            }
            RegistrationKind::Renewal(record) => {
                let base = record.expire_at.max(now);
                let expire_at = base + u64::from(duration_years) * SECONDS_PER_YEAR;
                self.internal_set_dym_name(DymName { expire_at, ..record })?;
                events::emit_dym_name_renewed(&caller, &name, expire_at, cost);
            }
        }

        // Registration revenue goes to the contract owner; everything above
        // the cost goes back to the caller.
        pay_out(&self.owner_id, cost);
        pay_out(&caller, attached - cost);
        Ok(())
    }

    /// Hand a live name to a new owner. Owner only; blocked while an active
    /// Sell-Order exists. Configs are cleared and the controller is reset.
    #[payable]
    #[handle_result]
    pub fn transfer_dym_name_ownership(
        &mut self,
        name: String,
        new_owner: AccountId,
    ) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();

        let record = self
            .internal_get_dym_name_live(&name, now_seconds())
            .ok_or_else(|| DymNsError::dym_name_not_found(&name))?;
        if record.owner != caller {
            return Err(DymNsError::only_owner("the Dym-Name owner"));
        }
        if new_owner == record.owner {
            return Err(DymNsError::InvalidInput(
                "new owner must differ from current owner".into(),
            ));
        }
        if self
            .sell_orders
            .contains_key(&make_asset_key(AssetType::DymName, &name))
        {
            return Err(DymNsError::FailedPrecondition(
                "an active Sell-Order exists for this Dym-Name".into(),
            ));
        }

        self.internal_transfer_dym_name_ownership(&name, &new_owner)?;
        events::emit_dym_name_transferred(&caller, &new_owner, &name);
        Ok(())
    }

    /// Owner only. The controller manages resolution configs.
    #[payable]
    #[handle_result]
    pub fn set_controller(&mut self, name: String, controller: AccountId) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();

        let record = self
            .internal_get_dym_name_live(&name, now_seconds())
            .ok_or_else(|| DymNsError::dym_name_not_found(&name))?;
        if record.owner != caller {
            return Err(DymNsError::only_owner("the Dym-Name owner"));
        }
        if record.controller == controller {
            return Ok(());
        }

        self.internal_set_dym_name(DymName {
            controller: controller.clone(),
            ..record
        })?;
        events::emit_controller_changed(&caller, &name, &controller);
        Ok(())
    }

    /// Set or delete the resolution config for `(chain_id, sub_name)`.
    /// Controller only. Empty `resolve_to` deletes; empty `chain_id` means
    /// the host chain.
    #[payable]
    #[handle_result]
    pub fn update_resolve_address(
        &mut self,
        name: String,
        chain_id: String,
        sub_name: String,
        resolve_to: String,
    ) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();

        let record = self
            .internal_get_dym_name_live(&name, now_seconds())
            .ok_or_else(|| DymNsError::dym_name_not_found(&name))?;
        if record.controller != caller {
            return Err(DymNsError::only_owner("the Dym-Name controller"));
        }
        if !chain_id.is_empty() && !is_valid_chain_id(&chain_id) {
            return Err(DymNsError::InvalidInput(format!(
                "invalid chain-id: {}",
                chain_id
            )));
        }
        if !sub_name.is_empty() && !is_valid_sub_name_path(&sub_name) {
            return Err(DymNsError::InvalidInput(format!(
                "invalid sub-name: {}",
                sub_name
            )));
        }

        let mut configs = record.configs.clone();
        configs.retain(|c| !(c.chain_id == chain_id && c.path == sub_name));
        if !resolve_to.is_empty() {
            let value = self.validate_resolve_to(&chain_id, &resolve_to)?;
            configs.push(DymNameConfig {
                config_type: DymNameConfigType::ResolveTo,
                chain_id: chain_id.clone(),
                path: sub_name.clone(),
                value,
            });
        }

        self.internal_set_dym_name(DymName { configs, ..record })?;
        events::emit_resolve_address_updated(&caller, &name, &chain_id, &sub_name, &resolve_to);
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────

    /// Price a registration the way `register_name` will: renewal pricing
    /// when `owner` already holds the live (or in-grace) name, otherwise
    /// fresh-registration pricing.
    pub fn estimate_register_name(
        &self,
        name: String,
        owner: Option<AccountId>,
        duration_years: u32,
    ) -> RegisterNameEstimate {
        let now = now_seconds();
        let is_renewal = owner.is_some_and(|owner| {
            self.internal_get_dym_name(&name)
                .is_some_and(|record| record.owner == owner && now <= self.grace_cutoff(&record))
        });
        if is_renewal {
            RegisterNameEstimate {
                first_year_price: U128(0),
                total_price: U128(self.renewal_cost(duration_years)),
            }
        } else {
            RegisterNameEstimate {
                first_year_price: U128(self.params.price.first_year_price(&name)),
                total_price: U128(self.new_registration_cost(&name, duration_years)),
            }
        }
    }
}

// ── Internal implementations ─────────────────────────────────────────────────

impl Contract {
    fn grace_cutoff(&self, record: &DymName) -> u64 {
        record.expire_at + u64::from(self.params.misc.grace_period_days) * SECONDS_PER_DAY
    }

    fn new_registration_cost(&self, name: &str, duration_years: u32) -> u128 {
        self.params.price.first_year_price(name)
            + u128::from(duration_years - 1) * self.params.price.price_extends.0
    }

    fn renewal_cost(&self, duration_years: u32) -> u128 {
        u128::from(duration_years) * self.params.price.price_extends.0
    }

    fn classify_registration(
        &self,
        name: &str,
        caller: &AccountId,
        now: u64,
    ) -> Result<RegistrationKind, DymNsError> {
        let Some(record) = self.internal_get_dym_name(name) else {
            return Ok(RegistrationKind::New { prune_first: false });
        };
        if now > self.grace_cutoff(&record) {
            // Past grace: anyone (owner included) takes over from scratch.
            return Ok(RegistrationKind::New { prune_first: true });
        }
        if &record.owner == caller {
            return Ok(RegistrationKind::Renewal(record));
        }
        if record.is_expired_at(now) {
            return Err(DymNsError::FailedPrecondition(format!(
                "Dym-Name is in its grace period; only the owner can renew: {}",
                name
            )));
        }
        Err(DymNsError::Unauthorized(format!(
            "Dym-Name is owned by: {}",
            record.owner
        )))
    }

    /// Validate a config value against the target chain class; returns the
    /// normalized value.
    fn validate_resolve_to(&self, chain_id: &str, resolve_to: &str) -> Result<String, DymNsError> {
        if chain_id.is_empty() {
            // Host chain: must be a host account id.
            if !is_host_address(resolve_to) {
                return Err(DymNsError::InvalidInput(format!(
                    "resolve-to is not a valid host account: {}",
                    resolve_to
                )));
            }
            return Ok(resolve_to.to_string());
        }
        if self.params.chains.is_coin_type_60(chain_id) {
            if !is_0x_address(resolve_to) {
                return Err(DymNsError::InvalidInput(format!(
                    "resolve-to is not a valid 0x address: {}",
                    resolve_to
                )));
            }
            return Ok(resolve_to.to_lowercase());
        }
        if resolve_to.chars().any(char::is_whitespace) {
            return Err(DymNsError::InvalidInput(
                "resolve-to must not contain whitespace".into(),
            ));
        }
        Ok(resolve_to.to_string())
    }
}

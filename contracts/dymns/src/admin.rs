use near_sdk::store::{IterableMap, LookupMap};
use near_sdk::{env, near, AccountId};

use crate::errors::DymNsError;
use crate::params::Params;
use crate::reverse_index::ReverseIndex;
use crate::{events, Contract, ContractExt, StorageKey};

#[near]
impl Contract {
    // --- Init ---

    #[init]
    #[handle_result]
    pub fn new(
        owner_id: AccountId,
        epoch_scheduler: AccountId,
        params: Params,
    ) -> Result<Self, DymNsError> {
        params
            .validate()
            .map_err(DymNsError::InvalidInput)?;
        Ok(Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            owner_id,
            epoch_scheduler,
            params,
            dym_names: IterableMap::new(StorageKey::DymNames),
            owned_names: ReverseIndex::new(StorageKey::OwnedNames),
            configured_addresses: ReverseIndex::new(StorageKey::ConfiguredAddresses),
            fallback_addresses: ReverseIndex::new(StorageKey::FallbackAddresses),
            roll_apps: IterableMap::new(StorageKey::RollApps),
            aliases_of_rollapp: LookupMap::new(StorageKey::AliasesOfRollApp),
            rollapp_of_alias: LookupMap::new(StorageKey::RollAppOfAlias),
            sell_orders: IterableMap::new(StorageKey::SellOrders),
            active_orders_expiration: LookupMap::new(StorageKey::ActiveOrdersExpiration),
            historical_sell_orders: LookupMap::new(StorageKey::HistoricalSellOrders),
            historical_min_expiry: IterableMap::new(StorageKey::HistoricalMinExpiry),
            buy_orders: IterableMap::new(StorageKey::BuyOrders),
            buy_orders_by_buyer: ReverseIndex::new(StorageKey::BuyOrdersByBuyer),
            buy_orders_by_asset: ReverseIndex::new(StorageKey::BuyOrdersByAsset),
            buy_order_count: 0,
        })
    }

    // --- Admin ---

    /// Owner only. The whole struct is validated before anything is applied.
    #[payable]
    #[handle_result]
    pub fn update_params(&mut self, params: Params) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();
        self.check_contract_owner(&caller)?;
        params
            .validate()
            .map_err(DymNsError::InvalidInput)?;
        self.params = params;
        events::emit_params_updated(&caller);
        Ok(())
    }

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn set_epoch_scheduler(&mut self, scheduler: AccountId) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();
        self.check_contract_owner(&caller)?;
        self.epoch_scheduler = scheduler;
        events::emit_scheduler_changed(&caller, &self.epoch_scheduler);
        Ok(())
    }

    /// Owner only.
    #[payable]
    #[handle_result]
    pub fn transfer_contract_ownership(&mut self, new_owner: AccountId) -> Result<(), DymNsError> {
        crate::internal::check_one_yocto()?;
        let caller = env::predecessor_account_id();
        self.check_contract_owner(&caller)?;
        if new_owner == self.owner_id {
            return Err(DymNsError::InvalidInput(
                "New owner must differ from current owner".to_string(),
            ));
        }
        let old_owner = self.owner_id.clone();
        self.owner_id = new_owner;
        events::emit_owner_transferred(&old_owner, &self.owner_id);
        Ok(())
    }

    // ── Views ────────────────────────────────────────────────────────

    pub fn get_params(&self) -> Params {
        self.params.clone()
    }

    pub fn get_owner(&self) -> &AccountId {
        &self.owner_id
    }

    pub fn get_epoch_scheduler(&self) -> &AccountId {
        &self.epoch_scheduler
    }

    pub fn get_version(&self) -> &str {
        &self.version
    }
}

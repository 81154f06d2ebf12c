//! Dym-Name Service — name registry, alias registry, and marketplace
//! (Sell-Orders with bidding, Buy-Orders with counter-offers, NEAR escrow),
//! with epoch-driven sweep hooks and JSON events.

use near_sdk::store::{IterableMap, LookupMap};
use near_sdk::{near, AccountId, BorshStorageKey, PanicOnDefault};

// --- Modules ---

mod admin;
mod alias;
mod buy_order;
pub mod constants;
mod dym_name;
mod epoch;
mod errors;
mod events;
mod internal;
mod params;
mod reverse_index;
mod rollapp;
mod sell_order;
pub mod types;

#[cfg(test)]
mod tests;

pub use buy_order::types::BuyOrder;
pub use constants::*;
pub use dym_name::types::{DymName, DymNameConfig, DymNameConfigType};
pub use dym_name::{RegisterNameEstimate, ResolveAddressResult, ReverseResolveResult};
pub use errors::DymNsError;
pub use params::{AliasesOfChainId, ChainsParams, MiscParams, Params, PriceParams};
pub use sell_order::types::{
    ActiveOrderExpiryRecord, ActiveOrdersExpiration, ArchiveOutcome, SellOrder, SellOrderBid,
};
pub use types::*;

use reverse_index::ReverseIndex;

// --- Storage Keys ---

#[near]
#[derive(BorshStorageKey)]
pub enum StorageKey {
    DymNames,
    OwnedNames,
    ConfiguredAddresses,
    FallbackAddresses,
    RollApps,
    AliasesOfRollApp,
    RollAppOfAlias,
    SellOrders,
    ActiveOrdersExpiration,
    HistoricalSellOrders,
    HistoricalMinExpiry,
    BuyOrders,
    BuyOrdersByBuyer,
    BuyOrdersByAsset,
}

// --- Contract State ---

#[near(contract_state)]
#[derive(PanicOnDefault)]
pub struct Contract {
    /// From Cargo.toml; updated on each migration.
    pub version: String,

    pub owner_id: AccountId,
    /// Account allowed to invoke the epoch hooks.
    pub epoch_scheduler: AccountId,
    pub params: Params,

    // Dym-Name registry + reverse indices.
    pub dym_names: IterableMap<String, DymName>,
    /// owner account → names.
    pub owned_names: ReverseIndex,
    /// configured address (owner, controller, config values) → names.
    pub configured_addresses: ReverseIndex,
    /// lowercased 0x address → names.
    pub fallback_addresses: ReverseIndex,

    // RollApps and aliases.
    pub roll_apps: IterableMap<String, RollApp>,
    /// rollapp id → aliases, insertion-ordered; first is primary.
    pub aliases_of_rollapp: LookupMap<String, Vec<String>>,
    pub rollapp_of_alias: LookupMap<String, String>,

    // Sell-Orders. Keyed by asset key ("name:abc" / "alias:dym").
    pub sell_orders: IterableMap<String, SellOrder>,
    /// One sorted expiration record per asset type; read by the end-epoch sweep.
    pub active_orders_expiration: LookupMap<AssetType, ActiveOrdersExpiration>,
    /// Append-only terminal orders per asset key.
    pub historical_sell_orders: LookupMap<String, Vec<SellOrder>>,
    /// Smallest expire_at among an asset's historical entries; scanned by the
    /// begin-epoch sweep to find prune candidates cheaply.
    pub historical_min_expiry: IterableMap<String, u64>,

    // Buy-Orders.
    pub buy_orders: IterableMap<String, BuyOrder>,
    pub buy_orders_by_buyer: ReverseIndex,
    pub buy_orders_by_asset: ReverseIndex,
    /// Persisted monotonic id counter; never reused.
    pub buy_order_count: u64,
}

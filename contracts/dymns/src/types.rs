//! Shared domain types.

use near_sdk::near;
use near_sdk::AccountId;

use crate::constants::ASSET_KEY_DELIMITER;

/// The two tradable asset classes.
#[near(serializers = [borsh, json])]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum AssetType {
    DymName,
    Alias,
}

impl AssetType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DymName => "name",
            Self::Alias => "alias",
        }
    }
}

/// Composite storage key for an asset: `"name:abc"` / `"alias:dym"`.
pub fn make_asset_key(asset_type: AssetType, asset_id: &str) -> String {
    format!("{}{}{}", asset_type.label(), ASSET_KEY_DELIMITER, asset_id)
}

/// A registered RollApp. Creator authorizes alias operations and trading.
#[near(serializers = [borsh, json])]
#[derive(Clone, Debug)]
pub struct RollApp {
    pub rollapp_id: String,
    pub creator: AccountId,
}

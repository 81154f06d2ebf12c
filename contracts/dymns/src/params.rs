//! Contract parameters: pricing tiers, chain/alias declarations, and
//! marketplace timing. Updated atomically by the contract owner and
//! validated as a whole on every write.

use near_sdk::json_types::U128;
use near_sdk::near;

use crate::dym_name::types::{is_valid_alias, is_valid_chain_id};

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug)]
pub struct Params {
    pub price: PriceParams,
    pub chains: ChainsParams,
    pub misc: MiscParams,
}

/// First-year registration price by name length, plus extension pricing.
/// All amounts in yoctoNEAR.
#[near(serializers = [borsh, json])]
#[derive(Clone, Debug)]
pub struct PriceParams {
    pub price_1_letter: U128,
    pub price_2_letters: U128,
    pub price_3_letters: U128,
    pub price_4_letters: U128,
    pub price_5_plus_letters: U128,
    /// Per additional year, and per renewal year.
    pub price_extends: U128,
    /// Floor for Buy-Order offers.
    pub min_offer_price: U128,
}

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug)]
pub struct ChainsParams {
    /// The chain this contract serves names for.
    pub host_chain_id: String,
    /// Alias declarations for well-known chains (host included).
    pub aliases_of_chain_ids: Vec<AliasesOfChainId>,
    /// Chains whose addresses are 0x hex (coin type 60); controls config
    /// value validation and fallback-address indexing.
    pub coin_type_60_chain_ids: Vec<String>,
}

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug)]
pub struct AliasesOfChainId {
    pub chain_id: String,
    pub aliases: Vec<String>,
}

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug)]
pub struct MiscParams {
    /// Identifier gating `on_epoch_begin`.
    pub begin_epoch_hook_identifier: String,
    /// Identifier gating `on_epoch_end`.
    pub end_epoch_hook_identifier: String,
    /// After expiry, only the owner may renew for this many days; past it,
    /// anyone can take the name over.
    pub grace_period_days: u32,
    /// Lifetime of a placed Sell-Order.
    pub sell_order_duration_seconds: u64,
    /// Names expiring within this window cannot be listed for sale.
    pub prohibit_sell_duration_seconds: u64,
    /// Historical (closed) Sell-Orders are pruned after this many days.
    pub preserved_closed_sell_order_days: u32,
}

impl Params {
    /// Cross-field validation; rejects the whole update on any violation.
    pub fn validate(&self) -> Result<(), String> {
        self.price.validate()?;
        self.chains.validate()?;
        self.misc.validate()
    }
}

impl PriceParams {
    fn validate(&self) -> Result<(), String> {
        let tiers = [
            self.price_1_letter.0,
            self.price_2_letters.0,
            self.price_3_letters.0,
            self.price_4_letters.0,
            self.price_5_plus_letters.0,
        ];
        if tiers.iter().any(|&p| p == 0) {
            return Err("every price tier must be positive".to_string());
        }
        if !tiers.windows(2).all(|w| w[0] > w[1]) {
            return Err("price tiers must strictly decrease with name length".to_string());
        }
        if self.price_extends.0 == 0 {
            return Err("price_extends must be positive".to_string());
        }
        if self.price_extends.0 > self.price_5_plus_letters.0 {
            return Err("price_extends must not exceed the 5+ letter tier".to_string());
        }
        if self.min_offer_price.0 == 0 {
            return Err("min_offer_price must be positive".to_string());
        }
        Ok(())
    }

    /// First-year price for a name, by letter count.
    pub fn first_year_price(&self, name: &str) -> u128 {
        match name.len() {
            1 => self.price_1_letter.0,
            2 => self.price_2_letters.0,
            3 => self.price_3_letters.0,
            4 => self.price_4_letters.0,
            _ => self.price_5_plus_letters.0,
        }
    }
}

impl ChainsParams {
    fn validate(&self) -> Result<(), String> {
        if !is_valid_chain_id(&self.host_chain_id) {
            return Err(format!("invalid host chain-id: {}", self.host_chain_id));
        }
        // No duplicate chain-id or alias across the whole map, and no alias
        // colliding with any declared chain-id.
        let mut chain_ids: Vec<&str> = Vec::new();
        let mut aliases: Vec<&str> = Vec::new();
        for entry in &self.aliases_of_chain_ids {
            if !is_valid_chain_id(&entry.chain_id) {
                return Err(format!("invalid chain-id: {}", entry.chain_id));
            }
            if chain_ids.contains(&entry.chain_id.as_str()) {
                return Err(format!("duplicate chain-id: {}", entry.chain_id));
            }
            chain_ids.push(&entry.chain_id);
            for alias in &entry.aliases {
                if !is_valid_alias(alias) {
                    return Err(format!("invalid alias: {}", alias));
                }
                if aliases.contains(&alias.as_str()) {
                    return Err(format!("duplicate alias: {}", alias));
                }
                aliases.push(alias);
            }
        }
        for alias in &aliases {
            if chain_ids.contains(alias) || *alias == self.host_chain_id {
                return Err(format!("alias collides with a chain-id: {}", alias));
            }
        }
        for chain_id in &self.coin_type_60_chain_ids {
            if !is_valid_chain_id(chain_id) {
                return Err(format!("invalid coin-type-60 chain-id: {}", chain_id));
            }
        }
        Ok(())
    }

    /// Chain-id a declared alias maps to, if any.
    pub fn chain_id_of_alias(&self, alias: &str) -> Option<&str> {
        self.aliases_of_chain_ids
            .iter()
            .find(|entry| entry.aliases.iter().any(|a| a == alias))
            .map(|entry| entry.chain_id.as_str())
    }

    /// First declared alias of a chain-id, if any.
    pub fn primary_alias_of(&self, chain_id: &str) -> Option<&str> {
        self.aliases_of_chain_ids
            .iter()
            .find(|entry| entry.chain_id == chain_id)
            .and_then(|entry| entry.aliases.first())
            .map(String::as_str)
    }

    /// True when `value` appears anywhere in the declarations, as alias or chain-id.
    pub fn is_declared_alias_or_chain_id(&self, value: &str) -> bool {
        if value == self.host_chain_id {
            return true;
        }
        self.aliases_of_chain_ids.iter().any(|entry| {
            entry.chain_id == value || entry.aliases.iter().any(|a| a == value)
        })
    }

    pub fn is_coin_type_60(&self, chain_id: &str) -> bool {
        self.coin_type_60_chain_ids.iter().any(|c| c == chain_id)
    }
}

impl MiscParams {
    fn validate(&self) -> Result<(), String> {
        if self.begin_epoch_hook_identifier.is_empty() {
            return Err("begin epoch hook identifier must not be empty".to_string());
        }
        if self.end_epoch_hook_identifier.is_empty() {
            return Err("end epoch hook identifier must not be empty".to_string());
        }
        if self.sell_order_duration_seconds == 0 {
            return Err("sell_order_duration_seconds must be positive".to_string());
        }
        if self.preserved_closed_sell_order_days == 0 {
            return Err("preserved_closed_sell_order_days must be positive".to_string());
        }
        Ok(())
    }
}

//! Dym-Name domain types and format validation.

use near_sdk::near;
use near_sdk::AccountId;

use crate::constants::{
    MAX_ALIAS_LEN, MAX_CHAIN_ID_LEN, MAX_CONFIGS_PER_NAME, MAX_DYM_NAME_LEN,
    MAX_SUB_NAME_PATH_LEN,
};

/// A registered human-readable name with its resolution configs.
#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct DymName {
    pub name: String,
    /// Manages trading and transfer.
    pub owner: AccountId,
    /// Manages resolution configs. May differ from owner.
    pub controller: AccountId,
    /// Unix seconds.
    pub expire_at: u64,
    pub configs: Vec<DymNameConfig>,
}

/// The only config type today; the enum is the extension seam for future kinds.
#[near(serializers = [borsh, json])]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DymNameConfigType {
    ResolveTo,
}

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct DymNameConfig {
    pub config_type: DymNameConfigType,
    /// Empty = the host chain.
    pub chain_id: String,
    /// Sub-name path ("" = the name itself, "sub" or "deep.sub").
    pub path: String,
    /// Address the (chain_id, path) pair resolves to.
    pub value: String,
}

impl DymName {
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expire_at < now
    }

    /// Structural validation; uniqueness per (chain_id, path) included.
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_dym_name(&self.name) {
            return Err(format!("invalid name format: {}", self.name));
        }
        if self.expire_at == 0 {
            return Err("expire_at must be set".to_string());
        }
        if self.configs.len() > MAX_CONFIGS_PER_NAME {
            return Err("too many configs".to_string());
        }
        let mut seen: Vec<(&str, &str)> = Vec::with_capacity(self.configs.len());
        for config in &self.configs {
            config.validate()?;
            let pair = (config.chain_id.as_str(), config.path.as_str());
            if seen.contains(&pair) {
                return Err(format!(
                    "duplicate config for chain '{}' path '{}'",
                    config.chain_id, config.path
                ));
            }
            seen.push(pair);
        }
        Ok(())
    }

    /// The config matching (chain_id, path) exactly, if any.
    pub fn config_value(&self, chain_id: &str, path: &str) -> Option<&str> {
        self.configs
            .iter()
            .find(|c| c.chain_id == chain_id && c.path == path)
            .map(|c| c.value.as_str())
    }
}

impl DymNameConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.chain_id.is_empty() && !is_valid_chain_id(&self.chain_id) {
            return Err(format!("invalid chain-id in config: {}", self.chain_id));
        }
        if !self.path.is_empty() && !is_valid_sub_name_path(&self.path) {
            return Err(format!("invalid sub-name path in config: {}", self.path));
        }
        if self.value.is_empty() {
            return Err("config value must not be empty".to_string());
        }
        if self.value.chars().any(char::is_whitespace) {
            return Err("config value must not contain whitespace".to_string());
        }
        Ok(())
    }
}

// --- Format rules ---

fn is_lower_alphanumeric(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}

/// Lowercase alphanumeric segments joined by single hyphens, 1–20 chars.
pub fn is_valid_dym_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_DYM_NAME_LEN {
        return false;
    }
    name.split('-').all(|segment| {
        !segment.is_empty() && segment.chars().all(is_lower_alphanumeric)
    })
}

/// Dot-separated name-format segments, e.g. "sub" or "deep.sub".
pub fn is_valid_sub_name_path(path: &str) -> bool {
    if path.is_empty() || path.len() > MAX_SUB_NAME_PATH_LEN {
        return false;
    }
    path.split('.').all(is_valid_dym_name)
}

/// Chain-id: lowercase alphanumeric plus '-' and '_', starts and ends
/// alphanumeric, 3–48 chars. Covers both host-style ids ("dymension_1100-1")
/// and RollApp ids.
pub fn is_valid_chain_id(chain_id: &str) -> bool {
    if chain_id.len() < 3 || chain_id.len() > MAX_CHAIN_ID_LEN {
        return false;
    }
    let first = chain_id.chars().next().unwrap();
    let last = chain_id.chars().next_back().unwrap();
    if !is_lower_alphanumeric(first) || !is_lower_alphanumeric(last) {
        return false;
    }
    chain_id
        .chars()
        .all(|c| is_lower_alphanumeric(c) || c == '-' || c == '_')
}

/// Alias: lowercase alphanumeric only, 1–10 chars.
pub fn is_valid_alias(alias: &str) -> bool {
    if alias.is_empty() || alias.len() > MAX_ALIAS_LEN {
        return false;
    }
    alias.chars().all(is_lower_alphanumeric)
}

/// `0x` hex of exactly 20 or 32 bytes (an "already resolved" address form).
pub fn is_0x_address(value: &str) -> bool {
    let Some(body) = value.strip_prefix("0x") else {
        return false;
    };
    match hex::decode(body) {
        Ok(bytes) => bytes.len() == 20 || bytes.len() == 32,
        Err(_) => false,
    }
}

/// Syntactically valid host (NEAR) account id.
pub fn is_host_address(value: &str) -> bool {
    value.parse::<AccountId>().is_ok()
}

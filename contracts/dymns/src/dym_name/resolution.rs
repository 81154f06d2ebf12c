//! Forward and reverse Dym-Name address resolution.

use near_sdk::near;

use crate::dym_name::address::{
    format_dym_name_address, parse_dym_name_address, DymNameAddressKind,
};
use crate::dym_name::types::is_0x_address;
use crate::errors::DymNsError;
use crate::internal::now_seconds;
use crate::{Contract, ContractExt};

/// Per-address outcome of a batch resolution; errors are embedded so one bad
/// input cannot fail the whole query.
#[near(serializers = [json])]
#[derive(Clone, Debug)]
pub struct ResolveAddressResult {
    pub address: String,
    pub resolved_to_address: Option<String>,
    pub error: Option<String>,
}

#[near(serializers = [json])]
#[derive(Clone, Debug)]
pub struct ReverseResolveResult {
    pub address: String,
    pub dym_name_addresses: Vec<String>,
    pub error: Option<String>,
}

#[near]
impl Contract {
    /// Resolve a batch of Dym-Name addresses (`sub.name@chain` /
    /// `sub.name.chain`) to account addresses.
    pub fn resolve_dym_name_addresses(&self, addresses: Vec<String>) -> Vec<ResolveAddressResult> {
        addresses
            .into_iter()
            .map(|address| match self.internal_resolve(&address) {
                Ok(resolved) => ResolveAddressResult {
                    address,
                    resolved_to_address: Some(resolved),
                    error: None,
                },
                Err(err) => ResolveAddressResult {
                    address,
                    resolved_to_address: None,
                    error: Some(err.to_string()),
                },
            })
            .collect()
    }

    /// Reverse-resolve a batch of account addresses into the Dym-Name
    /// addresses that resolve to them on `working_chain_id` (default: the
    /// host chain).
    pub fn reverse_resolve_dym_name_addresses(
        &self,
        addresses: Vec<String>,
        working_chain_id: Option<String>,
    ) -> Vec<ReverseResolveResult> {
        let working_chain_id = working_chain_id
            .unwrap_or_else(|| self.params.chains.host_chain_id.clone());
        addresses
            .into_iter()
            .map(|address| {
                let dym_name_addresses = self.internal_reverse_resolve(&address, &working_chain_id);
                ReverseResolveResult {
                    address,
                    dym_name_addresses,
                    error: None,
                }
            })
            .collect()
    }
}

// ── Internal implementations ─────────────────────────────────────────────────

impl Contract {
    /// Translate a chain-id-or-alias to a chain-id: params declarations win,
    /// then live RollApp bindings, then the literal value.
    pub(crate) fn resolve_chain_ref(&self, chain_id_or_alias: &str) -> String {
        if chain_id_or_alias == self.params.chains.host_chain_id {
            return chain_id_or_alias.to_string();
        }
        if let Some(chain_id) = self.params.chains.chain_id_of_alias(chain_id_or_alias) {
            return chain_id.to_string();
        }
        if let Some(rollapp_id) = self.rollapp_of_alias.get(chain_id_or_alias) {
            return rollapp_id.clone();
        }
        chain_id_or_alias.to_string()
    }

    /// Preferred rendering of a chain in outputs: its primary alias when one
    /// exists (params first, then RollApp bindings), else the chain-id.
    fn chain_repr(&self, chain_id: &str) -> String {
        if let Some(alias) = self.params.chains.primary_alias_of(chain_id) {
            return alias.to_string();
        }
        if let Some(aliases) = self.aliases_of_rollapp.get(chain_id) {
            if let Some(alias) = aliases.first() {
                return alias.clone();
            }
        }
        chain_id.to_string()
    }

    pub(crate) fn internal_resolve(&self, input: &str) -> Result<String, DymNsError> {
        let parsed = parse_dym_name_address(input)?;
        let chain_id = self.resolve_chain_ref(&parsed.chain_id_or_alias);

        let (path, name) = match parsed.kind {
            // Already an address; nothing to look up.
            DymNameAddressKind::Direct(address) => return Ok(address),
            DymNameAddressKind::Name { path, name } => (path, name),
        };

        let record = self
            .internal_get_dym_name_live(&name, now_seconds())
            .ok_or_else(|| DymNsError::dym_name_not_found(&name))?;

        // Host-chain configs are stored under the empty chain-id.
        let config_chain = if chain_id == self.params.chains.host_chain_id {
            ""
        } else {
            chain_id.as_str()
        };
        let sub_name = path.join(".");

        if let Some(value) = record.config_value(config_chain, &sub_name) {
            return Ok(value.to_string());
        }
        // Owner fallback: only without a sub-name and only when no default
        // config exists for the chain. Sub-name lookups never fall back.
        if sub_name.is_empty() {
            return Ok(record.owner.to_string());
        }
        Err(DymNsError::NotFound(format!(
            "no resolution found for: {}",
            input
        )))
    }

    fn internal_reverse_resolve(&self, address: &str, working_chain_id: &str) -> Vec<String> {
        let now = now_seconds();
        let is_hex = is_0x_address(address);

        // Candidates from the configured index, plus the 0x fallback index.
        let mut candidates = self.configured_addresses.get(address);
        if is_hex {
            for name in self.fallback_addresses.get(&address.to_lowercase()) {
                if !candidates.contains(&name) {
                    candidates.push(name);
                }
            }
        }

        let config_chain = if working_chain_id == self.params.chains.host_chain_id {
            ""
        } else {
            working_chain_id
        };
        let repr = self.chain_repr(working_chain_id);

        let value_matches = |value: &str| {
            if is_hex && is_0x_address(value) {
                value.eq_ignore_ascii_case(address)
            } else {
                value == address
            }
        };

        let mut outputs: Vec<String> = Vec::new();
        for name in candidates {
            // Defensive: the index may hold stale entries; only the stored
            // record decides.
            let Some(record) = self.internal_get_dym_name_live(&name, now) else {
                continue;
            };

            for config in &record.configs {
                if config.chain_id == config_chain
                    && !config.path.is_empty()
                    && value_matches(&config.value)
                {
                    outputs.push(format_dym_name_address(&config.path, &record.name, &repr));
                }
            }

            // Default address: the chain's default config when present,
            // otherwise the owner (mirroring forward fallback).
            let default_target = record
                .config_value(config_chain, "")
                .unwrap_or(record.owner.as_str());
            if value_matches(default_target) {
                outputs.push(format_dym_name_address("", &record.name, &repr));
            }
        }

        outputs.sort();
        outputs.dedup();
        outputs
    }
}

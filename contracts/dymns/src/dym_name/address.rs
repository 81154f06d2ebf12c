//! Dym-Name-Address parsing.
//!
//! Grammar: `[sub.[sub.]]name{'.'|'@'}chain_id_or_alias`. At most one `@`,
//! used as the final separator before the chain part, and nothing after it
//! may contain `.`. No empty segments, no whitespace. A bare name with no
//! chain part is invalid.
//!
//! Two extra forms are accepted in the name position and treated as
//! already-resolved addresses: a `0x` hex string of exactly 20 or 32 bytes,
//! and a syntactically valid host account id. Name interpretation wins when
//! both fit (host account ids can look exactly like `sub.name`); the direct
//! forms only apply when the name interpretation fails format validation.

use crate::dym_name::types::{
    is_0x_address, is_host_address, is_valid_alias, is_valid_chain_id, is_valid_dym_name,
};
use crate::errors::DymNsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DymNameAddressKind {
    /// `[path.]name` to look up.
    Name { path: Vec<String>, name: String },
    /// Already-resolved address carried in the name position.
    Direct(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDymNameAddress {
    pub kind: DymNameAddressKind,
    pub chain_id_or_alias: String,
}

pub fn parse_dym_name_address(input: &str) -> Result<ParsedDymNameAddress, DymNsError> {
    if input.is_empty() {
        return Err(DymNsError::bad_dym_name_address(input, "empty"));
    }
    if input.chars().any(char::is_whitespace) {
        return Err(DymNsError::bad_dym_name_address(input, "contains whitespace"));
    }

    let (name_part, chain_part) = match input.matches('@').count() {
        0 => {
            // Dot form: the last segment is the chain part.
            let Some(split_at) = input.rfind('.') else {
                return Err(DymNsError::bad_dym_name_address(input, "no chain part"));
            };
            (&input[..split_at], &input[split_at + 1..])
        }
        1 => {
            let (left, right) = input.split_once('@').unwrap();
            if right.contains('.') {
                return Err(DymNsError::bad_dym_name_address(
                    input,
                    "chain part must not contain '.'",
                ));
            }
            (left, right)
        }
        _ => {
            return Err(DymNsError::bad_dym_name_address(input, "multiple '@'"));
        }
    };

    if name_part.is_empty() || chain_part.is_empty() {
        return Err(DymNsError::bad_dym_name_address(input, "empty segment"));
    }
    if !is_valid_chain_id(chain_part) && !is_valid_alias(chain_part) {
        return Err(DymNsError::bad_dym_name_address(
            input,
            "chain part is neither a chain-id nor an alias",
        ));
    }

    let segments: Vec<&str> = name_part.split('.').collect();
    if segments.iter().all(|s| is_valid_dym_name(s)) {
        let (name, path) = segments.split_last().unwrap();
        return Ok(ParsedDymNameAddress {
            kind: DymNameAddressKind::Name {
                path: path.iter().map(|s| s.to_string()).collect(),
                name: name.to_string(),
            },
            chain_id_or_alias: chain_part.to_string(),
        });
    }

    // Not a name: accept the whole name position as a direct address.
    if is_0x_address(name_part) {
        return Ok(ParsedDymNameAddress {
            kind: DymNameAddressKind::Direct(name_part.to_lowercase()),
            chain_id_or_alias: chain_part.to_string(),
        });
    }
    if is_host_address(name_part) {
        return Ok(ParsedDymNameAddress {
            kind: DymNameAddressKind::Direct(name_part.to_string()),
            chain_id_or_alias: chain_part.to_string(),
        });
    }

    Err(DymNsError::bad_dym_name_address(
        input,
        "name part is neither a Dym-Name nor an address",
    ))
}

/// Render `(path, name, chain)` back to the canonical `@` form.
pub fn format_dym_name_address(path: &str, name: &str, chain_repr: &str) -> String {
    if path.is_empty() {
        format!("{}@{}", name, chain_repr)
    } else {
        format!("{}.{}@{}", path, name, chain_repr)
    }
}

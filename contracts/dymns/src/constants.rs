//! Contract-wide constants.

use near_sdk::NearToken;

/// Maximum Dym-Name length (single label, excluding sub-names).
pub const MAX_DYM_NAME_LEN: usize = 20;

/// Maximum alias length.
pub const MAX_ALIAS_LEN: usize = 10;

/// Maximum chain-id length.
pub const MAX_CHAIN_ID_LEN: usize = 48;

/// Maximum full sub-name path length ("a.b.c").
pub const MAX_SUB_NAME_PATH_LEN: usize = 66;

/// Maximum number of resolution configs per Dym-Name.
pub const MAX_CONFIGS_PER_NAME: usize = 100;

/// Seconds per day / per year, for expiry arithmetic on unix-second timestamps.
pub const SECONDS_PER_DAY: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Buy-Order id prefixes by asset type. Ids are never reused:
/// the numeric part comes from a persisted monotonic counter.
pub const BUY_ORDER_ID_PREFIX_DYM_NAME: &str = "10";
pub const BUY_ORDER_ID_PREFIX_ALIAS: &str = "20";

/// Delimiter for asset keys ("name:abc", "alias:dym").
/// ":" is valid in neither Dym-Names nor aliases, preventing key collisions.
pub const ASSET_KEY_DELIMITER: &str = ":";

/// No deposit / 1 yocto
pub const NO_DEPOSIT: NearToken = NearToken::from_yoctonear(0);
pub const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

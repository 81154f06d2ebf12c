//! NEP-297-style JSON event emission.
//!
//! Every successful state mutation emits exactly one event line:
//! `EVENT_JSON:{"standard":"dymns","version":"1.0.0","event":"<type>","data":[...]}`

mod builder;
mod market;
mod name;
mod types;

pub(crate) use market::*;
pub(crate) use name::*;

pub(crate) const STANDARD: &str = "dymns";
pub(crate) const VERSION: &str = "1.0.0";
pub(crate) const PREFIX: &str = "EVENT_JSON:";

// --- Event types ---

pub(crate) const NAME: &str = "dym_name";
pub(crate) const ALIAS: &str = "alias";
pub(crate) const SELL_ORDER: &str = "sell_order";
pub(crate) const BUY_ORDER: &str = "buy_order";
pub(crate) const ADMIN: &str = "admin";

//! Typed error handling for the dymns contract.
//!
//! Uses `#[derive(near_sdk::FunctionError)]` from the NEAR SDK to enable
//! `#[handle_result]` on public methods. When a method returns
//! `Err(DymNsError::Xxx)`, the SDK calls `env::panic_str()`
//! with the Display message — same on-wire behaviour as raw panics,
//! but with structured, testable code.

use near_sdk_macros::NearSchema;

#[derive(NearSchema, near_sdk::FunctionError)]
#[abi(borsh, json)]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum DymNsError {
    /// Caller lacks permission (not owner/controller/buyer/creator).
    Unauthorized(String),
    /// Invalid parameters, IDs, or data from the caller.
    InvalidInput(String),
    /// Requested name/alias/order/offer/rollapp does not exist.
    NotFound(String),
    /// Operation not allowed given current record state.
    InvalidState(String),
    /// A precondition set by params or timing is not met.
    FailedPrecondition(String),
    /// An active record for the same asset already exists.
    AlreadyExists(String),
    /// Attached deposit is too low or does not match the required amount.
    InsufficientDeposit(String),
    /// Client-declared price does not match the server-computed cost.
    UnacknowledgedPayment(String),
    /// Internal invariant violation (should never happen).
    InternalError(String),
}

impl std::fmt::Display for DymNsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Self::FailedPrecondition(msg) => write!(f, "Failed precondition: {}", msg),
            Self::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            Self::InsufficientDeposit(msg) => write!(f, "Insufficient deposit: {}", msg),
            Self::UnacknowledgedPayment(msg) => write!(f, "Unacknowledged payment: {}", msg),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

// ── Factory helpers for common errors ────────────────────────────────────────

impl DymNsError {
    pub fn dym_name_not_found(name: &str) -> Self {
        Self::NotFound(format!("Dym-Name: {}", name))
    }
    pub fn sell_order_not_found(asset_id: &str) -> Self {
        Self::NotFound(format!("Sell-Order: {}", asset_id))
    }
    pub fn buy_order_not_found(order_id: &str) -> Self {
        Self::NotFound(format!("Buy-Order: {}", order_id))
    }
    pub fn not_a_rollapp(id: &str) -> Self {
        Self::NotFound(format!("not a RollApp chain-id: {}", id))
    }
    pub fn alias_in_use(rollapp_id: &str) -> Self {
        Self::Unauthorized(format!("alias currently being in used by: {}", rollapp_id))
    }
    pub fn bad_dym_name_address(input: &str, reason: &str) -> Self {
        Self::InvalidInput(format!("invalid Dym-Name address '{}': {}", input, reason))
    }
    pub fn only_owner(what: &str) -> Self {
        Self::Unauthorized(format!("Only {} can perform this action", what))
    }
}

//! Dym-Name registry: records, registration/renewal flows, address
//! resolution, and the reverse indices that keep lookups consistent.

pub mod address;
mod register;
mod registry;
mod resolution;
pub mod types;

pub use register::RegisterNameEstimate;
pub use resolution::{ResolveAddressResult, ReverseResolveResult};
pub use types::*;

//! Merchant cargo, trading, dispatch, and travel resolution for the Caravan
//! simulation.
//!
//! All mutations of the durable player document happen through this crate:
//! the trade processor ([`trade`]), the dispatch processor ([`dispatch`]),
//! the lazy travel resolver ([`travel`]), and the hiring policy
//! ([`roster`]). Every operation validates completely before mutating, so a
//! failed order leaves gold and cargo exactly as they were.
//!
//! # Modules
//!
//! - [`cargo`] -- Capacity-bounded cargo operations with checked arithmetic.
//! - [`trade`] -- Buy/sell order validation and execution against a city
//!   market.
//! - [`dispatch`] -- Journey validation and departure.
//! - [`travel`] -- Pull-based arrival resolution with route-risk ambushes.
//! - [`roster`] -- Merchant lookup and the first-unhired hiring policy.
//! - [`error`] -- The error taxonomy for all merchant operations.

pub mod cargo;
pub mod dispatch;
pub mod error;
pub mod roster;
pub mod trade;
pub mod travel;

// Re-export primary entry points at crate root.
pub use dispatch::{DispatchReceipt, dispatch};
pub use error::MerchantError;
pub use roster::hire_first_unhired;
pub use trade::{TradeReceipt, execute_trade};
pub use travel::{DEFAULT_ROUTE_RISK, resolve_arrivals};

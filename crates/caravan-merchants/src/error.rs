//! Error types for merchant operations.
//!
//! Every validation failure is a typed variant carrying enough context for
//! a human-readable message. Nothing in this crate panics; malformed input
//! (zero quantity, unknown names) surfaces as a validation error.

use caravan_types::{CityId, GoodId};

/// Errors that can occur during trade, dispatch, travel, or hiring.
#[derive(Debug, thiserror::Error)]
pub enum MerchantError {
    /// No merchant with the given name exists in the roster.
    #[error("merchant not found: {0}")]
    MerchantNotFound(String),

    /// The merchant is already traveling and cannot take new orders.
    #[error("merchant {name} is already on the road")]
    MerchantNotFree {
        /// The busy merchant's name.
        name: String,
    },

    /// No connection exists between the two cities.
    #[error("no route from {from} to {to}")]
    RouteNotFound {
        /// The merchant's current city.
        from: CityId,
        /// The requested destination.
        to: CityId,
    },

    /// The good is not on the relevant side of the city's market.
    #[error("good not traded here: {good}")]
    GoodNotFound {
        /// The good that was requested.
        good: GoodId,
    },

    /// A trade order was placed with a zero quantity.
    #[error("trade quantity must be positive")]
    InvalidQuantity,

    /// The player cannot afford the purchase.
    #[error("insufficient gold: need {needed} but have {available}")]
    InsufficientGold {
        /// Total cost of the order.
        needed: u64,
        /// Gold the player actually has.
        available: u64,
    },

    /// The merchant does not carry enough of the good to sell.
    #[error("insufficient stock: wanted {requested} of {good} but only have {available}")]
    InsufficientStock {
        /// The good being sold.
        good: GoodId,
        /// The quantity the order asked for.
        requested: u32,
        /// The quantity the merchant actually holds.
        available: u32,
    },

    /// Loading the cargo would exceed the merchant's capacity.
    #[error("cargo overflow: adding {attempted} of {good} would exceed capacity (current load: {current_load}, capacity: {capacity})")]
    CapacityExceeded {
        /// The good being loaded.
        good: GoodId,
        /// The quantity the order attempted to load.
        attempted: u32,
        /// The merchant's current total load.
        current_load: u32,
        /// The merchant's maximum capacity.
        capacity: u32,
    },

    /// Every merchant in the roster is already hired.
    #[error("all merchants are already hired")]
    AllMerchantsHired,

    /// An arithmetic overflow occurred during a gold or cargo computation.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}

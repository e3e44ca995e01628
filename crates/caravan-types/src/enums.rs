//! Enumeration types for the Caravan trading simulation.

use serde::{Deserialize, Serialize};

/// The two states a merchant can be in.
///
/// A merchant is [`Traveling`] if and only if a destination and arrival
/// time are recorded and the merchant is not free; otherwise the merchant
/// is [`Idle`] at its current city.
///
/// [`Traveling`]: MerchantStatus::Traveling
/// [`Idle`]: MerchantStatus::Idle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MerchantStatus {
    /// Stationed at the current city and available for orders.
    Idle,
    /// En route between two connected cities.
    Traveling,
}

/// Direction of a trade order from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    /// Buy from the city's selling list into the merchant's cargo.
    Buy,
    /// Sell from the merchant's cargo into the city's buying list.
    Sell,
}

//! The trade processor: buy/sell order validation and execution.
//!
//! Orders are resolved against the merchant's current city market (the
//! post-refresh snapshot the caller passes in). Every precondition is
//! checked before anything mutates: either gold and cargo change together,
//! or neither does.

use caravan_types::{CityMarket, GoodId, Player, TradeAction};

use crate::cargo;
use crate::error::MerchantError;

/// Result of a successful trade: what changed and a confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeReceipt {
    /// Human-readable confirmation for the shell.
    pub message: String,
    /// The unit price the order was filled at.
    pub unit_price: u32,
    /// The total gold moved (debited on buy, credited on sell).
    pub total: u64,
}

/// Validate and apply a single buy/sell order.
///
/// # Errors
///
/// - [`MerchantError::InvalidQuantity`] for a zero quantity.
/// - [`MerchantError::MerchantNotFound`] for an unknown merchant name.
/// - [`MerchantError::GoodNotFound`] if the good is not on the relevant
///   side of the market.
/// - [`MerchantError::InsufficientGold`] / [`MerchantError::CapacityExceeded`]
///   on a failed buy, [`MerchantError::InsufficientStock`] on a failed sell
///   -- in every failure case the player document is left untouched.
pub fn execute_trade(
    player: &mut Player,
    merchant_name: &str,
    action: TradeAction,
    good: &GoodId,
    quantity: u32,
    market: &CityMarket,
) -> Result<TradeReceipt, MerchantError> {
    if quantity == 0 {
        return Err(MerchantError::InvalidQuantity);
    }

    let merchant = player
        .merchants
        .iter_mut()
        .find(|m| m.name == merchant_name)
        .ok_or_else(|| MerchantError::MerchantNotFound(merchant_name.to_owned()))?;

    match action {
        TradeAction::Buy => {
            let offer = market
                .selling
                .iter()
                .find(|o| &o.id == good)
                .ok_or_else(|| MerchantError::GoodNotFound { good: good.clone() })?;

            let cost = u64::from(offer.price)
                .checked_mul(u64::from(quantity))
                .ok_or_else(|| MerchantError::ArithmeticOverflow {
                    context: String::from("buy order cost overflow"),
                })?;

            if player.gold < cost {
                return Err(MerchantError::InsufficientGold {
                    needed: cost,
                    available: player.gold,
                });
            }

            // Fails without mutating if capacity would be exceeded.
            cargo::load_goods(&mut merchant.inventory, merchant.capacity, good, quantity)?;

            // Cannot underflow: affordability was checked above.
            player.gold = player.gold.saturating_sub(cost);

            tracing::debug!(merchant = %merchant.name, good = %good, quantity, cost, "Buy filled");
            Ok(TradeReceipt {
                message: format!(
                    "{} bought {quantity} x {} for {cost} gold.",
                    merchant.name, offer.name
                ),
                unit_price: offer.price,
                total: cost,
            })
        }
        TradeAction::Sell => {
            let bid = market
                .buying
                .iter()
                .find(|b| &b.id == good)
                .ok_or_else(|| MerchantError::GoodNotFound { good: good.clone() })?;

            let proceeds = u64::from(bid.price)
                .checked_mul(u64::from(quantity))
                .ok_or_else(|| MerchantError::ArithmeticOverflow {
                    context: String::from("sell order proceeds overflow"),
                })?;
            let new_gold =
                player
                    .gold
                    .checked_add(proceeds)
                    .ok_or_else(|| MerchantError::ArithmeticOverflow {
                        context: String::from("gold balance overflow"),
                    })?;

            // Fails without mutating if the merchant lacks the stock.
            cargo::unload_goods(&mut merchant.inventory, good, quantity)?;

            player.gold = new_gold;

            tracing::debug!(merchant = %merchant.name, good = %good, quantity, proceeds, "Sell filled");
            Ok(TradeReceipt {
                message: format!(
                    "{} sold {quantity} x {} for {proceeds} gold.",
                    merchant.name, bid.name
                ),
                unit_price: bid.price,
                total: proceeds,
            })
        }
    }
}

//! The price formula and its random inputs.
//!
//! `price = floor(base_price * role_multiplier * event_multiplier * noise)`
//!
//! The role multiplier is deliberately inverted from the player's point of
//! view: cities sell at a 0.8 discount and buy at a 1.5 markup, so a
//! round trip within one city always loses money and profit requires
//! exploiting price differences between cities.
//!
//! Noise is uniform in [0.9, 1.1]. To keep the arithmetic exact it is
//! sampled as an integer roll in basis points ([`NOISE_MIN_BP`] to
//! [`NOISE_MAX_BP`]) and scaled into a [`Decimal`]; a roll of
//! [`NOISE_UNITY_BP`] is exactly 1.0, which is what the determinism tests
//! pin the formula against.

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::MarketError;

/// Lower bound of the noise roll, in basis points (0.9).
pub const NOISE_MIN_BP: u32 = 9_000;

/// Upper bound of the noise roll, in basis points (1.1).
pub const NOISE_MAX_BP: u32 = 11_000;

/// The noise roll equal to exactly 1.0.
pub const NOISE_UNITY_BP: u32 = 10_000;

/// Inclusive stock range for a selling-list entry.
pub const STOCK_RANGE: (u32, u32) = (20, 69);

/// Inclusive demand range for a buying-list entry.
pub const DEMAND_RANGE: (u32, u32) = (5, 24);

/// Which side of a city market a price is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketRole {
    /// The city sells the good to the player (discounted).
    Sell,
    /// The city buys the good from the player (marked up).
    Buy,
}

impl MarketRole {
    /// The base multiplier for this side of the market.
    pub fn multiplier(self) -> Decimal {
        match self {
            // 0.8
            Self::Sell => Decimal::new(8, 1),
            // 1.5
            Self::Buy => Decimal::new(15, 1),
        }
    }
}

/// Sample a noise roll uniformly in [[`NOISE_MIN_BP`], [`NOISE_MAX_BP`]].
pub fn sample_noise_bp(rng: &mut impl Rng) -> u32 {
    rng.random_range(NOISE_MIN_BP..=NOISE_MAX_BP)
}

/// Sample a stock figure for a selling-list entry.
pub fn sample_stock(rng: &mut impl Rng) -> u32 {
    let (min, max) = STOCK_RANGE;
    rng.random_range(min..=max)
}

/// Sample a demand figure for a buying-list entry.
pub fn sample_demand(rng: &mut impl Rng) -> u32 {
    let (min, max) = DEMAND_RANGE;
    rng.random_range(min..=max)
}

/// Compute a unit price from the formula inputs.
///
/// The product is computed in [`Decimal`] with checked arithmetic, floored
/// to a whole number of gold, and converted back to `u32`.
///
/// # Errors
///
/// Returns [`MarketError::PriceOverflow`] if any multiplication overflows
/// or the floored result does not fit in `u32`.
pub fn quote(
    base_price: u32,
    role: MarketRole,
    event_multiplier: Decimal,
    noise_bp: u32,
) -> Result<u32, MarketError> {
    let noise = Decimal::new(i64::from(noise_bp), 4);

    let price = Decimal::from(base_price)
        .checked_mul(role.multiplier())
        .and_then(|p| p.checked_mul(event_multiplier))
        .and_then(|p| p.checked_mul(noise))
        .ok_or_else(|| MarketError::PriceOverflow {
            context: format!("base {base_price} x {role:?} x {event_multiplier} x {noise}"),
        })?;

    price
        .floor()
        .to_u32()
        .ok_or_else(|| MarketError::PriceOverflow {
            context: format!("floored price {price} outside u32 range"),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn selling_price_without_event_or_noise() {
        // floor(30 * 0.8) = 24
        let price = quote(30, MarketRole::Sell, Decimal::ONE, NOISE_UNITY_BP).unwrap();
        assert_eq!(price, 24);
    }

    #[test]
    fn buying_price_without_event_or_noise() {
        // floor(30 * 1.5) = 45
        let price = quote(30, MarketRole::Buy, Decimal::ONE, NOISE_UNITY_BP).unwrap();
        assert_eq!(price, 45);
    }

    #[test]
    fn famine_multiplier_scenario() {
        // floor(30 * 0.8 * 5.0) = 120
        let price = quote(30, MarketRole::Sell, Decimal::from(5), NOISE_UNITY_BP).unwrap();
        assert_eq!(price, 120);
    }

    #[test]
    fn price_floors_fractional_results() {
        // 45 * 0.8 = 36 exactly; 45 * 1.5 = 67.5 floors to 67
        assert_eq!(quote(45, MarketRole::Sell, Decimal::ONE, NOISE_UNITY_BP).unwrap(), 36);
        assert_eq!(quote(45, MarketRole::Buy, Decimal::ONE, NOISE_UNITY_BP).unwrap(), 67);
    }

    #[test]
    fn noise_bounds_scale_price() {
        // floor(100 * 0.8 * 0.9) = 72, floor(100 * 0.8 * 1.1) = 88
        assert_eq!(quote(100, MarketRole::Sell, Decimal::ONE, NOISE_MIN_BP).unwrap(), 72);
        assert_eq!(quote(100, MarketRole::Sell, Decimal::ONE, NOISE_MAX_BP).unwrap(), 88);
    }

    #[test]
    fn sampled_rolls_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let noise = sample_noise_bp(&mut rng);
            assert!((NOISE_MIN_BP..=NOISE_MAX_BP).contains(&noise));

            let stock = sample_stock(&mut rng);
            assert!((STOCK_RANGE.0..=STOCK_RANGE.1).contains(&stock));

            let demand = sample_demand(&mut rng);
            assert!((DEMAND_RANGE.0..=DEMAND_RANGE.1).contains(&demand));
        }
    }
}

//! Wholesale per-city market snapshot recomputation.
//!
//! For every city whose economy type has a profile in the rules table, a
//! selling list is built from its produced goods and a buying list from its
//! demanded goods, each priced through [`pricing::quote`]. Cities with an
//! unrecognized economy type are passed through unchanged -- they simply
//! have no entry in the returned snapshot.
//!
//! The snapshot is always replaced as a whole, never patched: the caller
//! swaps the returned map in under its market lock so no reader observes a
//! partially refreshed state.

use std::collections::BTreeMap;

use caravan_types::{CityId, CityMarket, GoodId, MarketBid, MarketEvent, MarketOffer};
use caravan_world::{Catalog, EconomyRules};
use rand::Rng;
use rust_decimal::Decimal;

use crate::error::MarketError;
use crate::pricing::{self, MarketRole};

/// The event multiplier applying to one good at one city.
///
/// Returns the active event's multiplier when the event targets the city
/// and lists the good; 1.0 otherwise (including when no event is active).
fn event_multiplier(active: Option<&MarketEvent>, city: &CityId, good: &GoodId) -> Decimal {
    match active {
        Some(event)
            if event.target_city.as_ref() == Some(city) && event.affected_goods.contains(good) =>
        {
            event.multiplier
        }
        _ => Decimal::ONE,
    }
}

/// Recompute the market snapshot for every city in the catalog.
///
/// # Errors
///
/// Returns [`MarketError::PriceOverflow`] if a price computation fails.
pub fn refresh_markets(
    catalog: &Catalog,
    rules: &EconomyRules,
    active_event: Option<&MarketEvent>,
    rng: &mut impl Rng,
) -> Result<BTreeMap<CityId, CityMarket>, MarketError> {
    let mut snapshot = BTreeMap::new();

    for city in catalog.cities() {
        let Some(profile) = rules.profile(&city.economy_type) else {
            tracing::debug!(city = %city.id, economy_type = %city.economy_type,
                "Unrecognized economy type, city passed through without a market");
            continue;
        };

        let mut market = CityMarket::default();

        for good_id in &profile.produces {
            let Some(good) = catalog.good(good_id) else {
                tracing::warn!(city = %city.id, good = %good_id,
                    "Rules reference a good absent from the catalog, skipping");
                continue;
            };
            let multiplier = event_multiplier(active_event, &city.id, good_id);
            let price = pricing::quote(
                good.base_price,
                MarketRole::Sell,
                multiplier,
                pricing::sample_noise_bp(rng),
            )?;
            market.selling.push(MarketOffer {
                id: good.id.clone(),
                name: good.name.clone(),
                price,
                stock: pricing::sample_stock(rng),
            });
        }

        for good_id in &profile.demands {
            let Some(good) = catalog.good(good_id) else {
                tracing::warn!(city = %city.id, good = %good_id,
                    "Rules reference a good absent from the catalog, skipping");
                continue;
            };
            let multiplier = event_multiplier(active_event, &city.id, good_id);
            let price = pricing::quote(
                good.base_price,
                MarketRole::Buy,
                multiplier,
                pricing::sample_noise_bp(rng),
            )?;
            market.buying.push(MarketBid {
                id: good.id.clone(),
                name: good.name.clone(),
                price,
                demand: pricing::sample_demand(rng),
            });
        }

        snapshot.insert(city.id.clone(), market);
    }

    Ok(snapshot)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use caravan_types::{City, EconomyType};
    use caravan_world::default_catalog;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::events;
    use crate::pricing::{DEMAND_RANGE, STOCK_RANGE};

    fn wheat() -> GoodId {
        GoodId::new("wheat")
    }

    #[test]
    fn every_recognized_city_gets_a_market() {
        let catalog = default_catalog().unwrap();
        let rules = EconomyRules::standard();
        let mut rng = SmallRng::seed_from_u64(1);

        let snapshot = refresh_markets(&catalog, &rules, None, &mut rng).unwrap();
        assert_eq!(snapshot.len(), catalog.city_count());
        for market in snapshot.values() {
            assert!(!market.selling.is_empty());
            assert!(!market.buying.is_empty());
        }
    }

    #[test]
    fn unrecognized_economy_type_is_passed_through() {
        let catalog = Catalog::new(
            caravan_world::default_goods(),
            vec![City {
                id: CityId::new("freeport"),
                name: "Freeport".to_owned(),
                economy_type: EconomyType::new("anarchic"),
                connections: vec![],
            }],
        )
        .unwrap();
        let rules = EconomyRules::standard();
        let mut rng = SmallRng::seed_from_u64(1);

        let snapshot = refresh_markets(&catalog, &rules, None, &mut rng).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn stock_and_demand_stay_in_range() {
        let catalog = default_catalog().unwrap();
        let rules = EconomyRules::standard();
        let mut rng = SmallRng::seed_from_u64(99);

        let snapshot = refresh_markets(&catalog, &rules, None, &mut rng).unwrap();
        for market in snapshot.values() {
            for offer in &market.selling {
                assert!((STOCK_RANGE.0..=STOCK_RANGE.1).contains(&offer.stock));
            }
            for bid in &market.buying {
                assert!((DEMAND_RANGE.0..=DEMAND_RANGE.1).contains(&bid.demand));
            }
        }
    }

    #[test]
    fn event_distorts_only_the_target_city_and_goods() {
        let catalog = default_catalog().unwrap();
        let rules = EconomyRules::standard();
        let famine = events::event_catalog()
            .into_iter()
            .find(|e| e.id.as_str() == "famine_aethelgard")
            .unwrap();

        // Noise varies per draw, so compare against formula bounds instead
        // of exact values: famine wheat sells in [30*0.8*5*0.9, 30*0.8*5*1.1].
        let mut rng = SmallRng::seed_from_u64(3);
        let snapshot = refresh_markets(&catalog, &rules, Some(&famine), &mut rng).unwrap();

        let aethelgard = snapshot.get(&CityId::new("aethelgard")).unwrap();
        let wheat_offer = aethelgard.selling.iter().find(|o| o.id == wheat()).unwrap();
        assert!((108..=132).contains(&wheat_offer.price), "price {}", wheat_offer.price);

        // Oakhaven also sells wheat but is not the target: plain 0.8 role
        // multiplier with noise, so [21, 26].
        let oakhaven = snapshot.get(&CityId::new("oakhaven")).unwrap();
        let plain_offer = oakhaven.selling.iter().find(|o| o.id == wheat()).unwrap();
        assert!((21..=26).contains(&plain_offer.price), "price {}", plain_offer.price);
    }

    #[test]
    fn event_multiplier_ignores_untargeted_goods() {
        let famine = events::event_catalog()
            .into_iter()
            .find(|e| e.id.as_str() == "famine_aethelgard")
            .unwrap();
        let aethelgard = CityId::new("aethelgard");

        assert_eq!(
            event_multiplier(Some(&famine), &aethelgard, &wheat()),
            Decimal::from(5)
        );
        assert_eq!(
            event_multiplier(Some(&famine), &aethelgard, &GoodId::new("wool")),
            Decimal::ONE
        );
        assert_eq!(
            event_multiplier(Some(&famine), &CityId::new("oakhaven"), &wheat()),
            Decimal::ONE
        );
        assert_eq!(event_multiplier(None, &aethelgard, &wheat()), Decimal::ONE);
    }
}

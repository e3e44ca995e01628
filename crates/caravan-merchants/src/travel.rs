//! The lazy travel resolver: pull-based arrival and risk resolution.
//!
//! This deliberately runs only when player state is read, not on a timer:
//! the snapshot handed to a caller must reflect every arrival due by "now",
//! computed on demand. A consequence worth knowing is that arrival and
//! ambush narratives are only observable by the next read after arrival --
//! there is no guaranteed delivery if nothing ever reads the player.
//!
//! For each merchant whose arrival is due, the traversed route's risk is
//! rolled; an ambush destroys half the carried quantity (rounded up) of one
//! randomly chosen good. The merchant then becomes idle at the destination.

use caravan_types::{MerchantStatus, Player};
use caravan_world::Catalog;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

use crate::error::MerchantError;

/// Risk assumed when the traversed route is missing from the catalog.
pub const DEFAULT_ROUTE_RISK: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Advance every merchant whose travel timer has elapsed.
///
/// Returns the narrative messages produced, in merchant-iteration order.
/// An empty list means nothing changed and nothing needs persisting.
/// Merchants already idle are never touched, so calling this twice without
/// new elapsed time yields no duplicate events.
///
/// # Errors
///
/// Returns [`MerchantError::ArithmeticOverflow`] if a cargo computation
/// fails (which would indicate a corrupt document).
pub fn resolve_arrivals(
    player: &mut Player,
    catalog: &Catalog,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<Vec<String>, MerchantError> {
    let mut narratives = Vec::new();

    for merchant in &mut player.merchants {
        if merchant.status != MerchantStatus::Traveling {
            continue;
        }
        let Some(arrival) = merchant.arrival_time else {
            tracing::warn!(merchant = %merchant.name,
                "Traveling merchant has no arrival time, leaving untouched");
            continue;
        };
        if arrival > now {
            continue;
        }
        let Some(destination) = merchant.destination.clone() else {
            tracing::warn!(merchant = %merchant.name,
                "Traveling merchant has no destination, leaving untouched");
            continue;
        };

        // The route traversed runs from the recorded origin (the location
        // field is only updated below, after risk resolution).
        let risk = catalog
            .connection(&merchant.current_location, &destination)
            .map_or(DEFAULT_ROUTE_RISK, |connection| connection.risk);

        let destination_name = catalog
            .city(&destination)
            .map_or_else(|| destination.to_string(), |city| city.name.clone());

        let roll = Decimal::new(i64::from(rng.random_range(0..10_000_u32)), 4);
        if roll < risk {
            narratives.push(resolve_ambush(merchant, &destination_name, rng)?);
        } else {
            narratives.push(format!(
                "{} arrived safely in {destination_name}.",
                merchant.name
            ));
        }

        merchant.status = MerchantStatus::Idle;
        merchant.free = true;
        merchant.current_location = destination;
        merchant.destination = None;
        merchant.arrival_time = None;
    }

    Ok(narratives)
}

/// Apply an ambush to an arriving merchant and produce its narrative.
///
/// One carried good with positive quantity is chosen uniformly at random
/// and loses `ceil(quantity / 2)` units. An empty wagon loses nothing.
fn resolve_ambush(
    merchant: &mut caravan_types::Merchant,
    destination_name: &str,
    rng: &mut impl Rng,
) -> Result<String, MerchantError> {
    let carried: Vec<_> = merchant
        .inventory
        .iter()
        .filter(|(_, qty)| **qty > 0)
        .map(|(good, _)| good.clone())
        .collect();

    let Some(good) = carried.choose(rng).cloned() else {
        tracing::info!(merchant = %merchant.name, "Ambushed with an empty wagon");
        return Ok(format!(
            "{} was ambushed on the road to {destination_name}, but the bandits found an empty wagon.",
            merchant.name
        ));
    };

    let quantity = merchant.inventory.get(&good).copied().unwrap_or(0);
    let lost = quantity.div_ceil(2);
    let remaining = quantity.saturating_sub(lost);
    if remaining == 0 {
        merchant.inventory.remove(&good);
    } else {
        merchant.inventory.insert(good.clone(), remaining);
    }

    tracing::info!(merchant = %merchant.name, good = %good, lost, "Merchant ambushed");
    Ok(format!(
        "{} was ambushed on the road to {destination_name} and lost {lost} {good}!",
        merchant.name
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use caravan_types::{City, CityId, Connection, GoodId, Merchant};
    use caravan_world::{default_catalog, default_player};
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).single().unwrap()
    }

    /// A two-city catalog whose single route has the given risk.
    fn catalog_with_risk(risk: Decimal) -> Catalog {
        let route = Connection {
            target: CityId::new("harrowgate"),
            distance: 10,
            risk,
        };
        Catalog::new(
            vec![],
            vec![
                City {
                    id: CityId::new("westmarch"),
                    name: "Westmarch".to_owned(),
                    economy_type: "agrarian".into(),
                    connections: vec![route],
                },
                City {
                    id: CityId::new("harrowgate"),
                    name: "Harrowgate".to_owned(),
                    economy_type: "agrarian".into(),
                    connections: vec![],
                },
            ],
        )
        .unwrap()
    }

    /// A player with one traveling merchant due to arrive at `arrival`.
    fn traveling_player(cargo: &[(&str, u32)], arrival: DateTime<Utc>) -> Player {
        let mut merchant = Merchant::unhired("Elara", 100, CityId::new("westmarch"));
        merchant.hired = true;
        merchant.free = false;
        merchant.status = MerchantStatus::Traveling;
        merchant.destination = Some(CityId::new("harrowgate"));
        merchant.arrival_time = Some(arrival);
        for (good, qty) in cargo {
            merchant.inventory.insert(GoodId::new(*good), *qty);
        }
        Player {
            name: "Guildmaster".to_owned(),
            gold: 1000,
            merchants: vec![merchant],
        }
    }

    #[test]
    fn safe_arrival_transitions_to_idle() {
        let catalog = catalog_with_risk(Decimal::ZERO);
        let now = start();
        let mut player = traveling_player(&[("wheat", 10)], now);
        let mut rng = SmallRng::seed_from_u64(1);

        let narratives = resolve_arrivals(&mut player, &catalog, now, &mut rng).unwrap();

        assert_eq!(narratives.len(), 1);
        assert!(narratives.first().unwrap().contains("arrived safely in Harrowgate"));

        let merchant = player.merchants.first().unwrap();
        assert_eq!(merchant.status, MerchantStatus::Idle);
        assert!(merchant.free);
        assert_eq!(merchant.current_location, CityId::new("harrowgate"));
        assert!(merchant.destination.is_none());
        assert!(merchant.arrival_time.is_none());
        // Zero risk: cargo untouched.
        assert_eq!(merchant.inventory.get(&GoodId::new("wheat")).copied(), Some(10));
    }

    #[test]
    fn certain_ambush_halves_one_good_rounding_up() {
        let catalog = catalog_with_risk(Decimal::ONE);
        let now = start();
        let mut player = traveling_player(&[("wheat", 5)], now);
        let mut rng = SmallRng::seed_from_u64(1);

        let narratives = resolve_arrivals(&mut player, &catalog, now, &mut rng).unwrap();

        assert!(narratives.first().unwrap().contains("lost 3 wheat"));
        let merchant = player.merchants.first().unwrap();
        assert_eq!(merchant.inventory.get(&GoodId::new("wheat")).copied(), Some(2));
        assert_eq!(merchant.status, MerchantStatus::Idle);
    }

    #[test]
    fn ambush_with_empty_wagon_loses_nothing() {
        let catalog = catalog_with_risk(Decimal::ONE);
        let now = start();
        let mut player = traveling_player(&[], now);
        let mut rng = SmallRng::seed_from_u64(1);

        let narratives = resolve_arrivals(&mut player, &catalog, now, &mut rng).unwrap();

        assert!(narratives.first().unwrap().contains("empty wagon"));
        assert!(player.merchants.first().unwrap().inventory.is_empty());
    }

    #[test]
    fn arrival_not_yet_due_is_untouched() {
        let catalog = catalog_with_risk(Decimal::ZERO);
        let now = start();
        let arrival = now.checked_add_signed(Duration::seconds(5)).unwrap();
        let mut player = traveling_player(&[("wheat", 10)], arrival);
        let mut rng = SmallRng::seed_from_u64(1);

        let narratives = resolve_arrivals(&mut player, &catalog, now, &mut rng).unwrap();

        assert!(narratives.is_empty());
        let merchant = player.merchants.first().unwrap();
        assert_eq!(merchant.status, MerchantStatus::Traveling);
    }

    #[test]
    fn resolution_is_idempotent_per_arrival() {
        let catalog = catalog_with_risk(Decimal::ZERO);
        let now = start();
        let mut player = traveling_player(&[("wheat", 10)], now);
        let mut rng = SmallRng::seed_from_u64(1);

        let first = resolve_arrivals(&mut player, &catalog, now, &mut rng).unwrap();
        assert_eq!(first.len(), 1);

        let second = resolve_arrivals(&mut player, &catalog, now, &mut rng).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn missing_connection_falls_back_to_default_risk() {
        // Route the merchant along an edge the catalog does not know about;
        // with the default world this is oakhaven -> duskmere.
        let catalog = default_catalog().unwrap();
        let now = start();
        let mut player = default_player();
        {
            let merchant = player.merchants.first_mut().unwrap();
            merchant.free = false;
            merchant.status = MerchantStatus::Traveling;
            merchant.destination = Some(CityId::new("duskmere"));
            merchant.arrival_time = Some(now);
        }

        // 0.2 fallback risk: over many seeds, both outcomes appear.
        let mut ambushes = 0_u32;
        let mut arrivals = 0_u32;
        for seed in 0..100 {
            let mut attempt = player.clone();
            let mut rng = SmallRng::seed_from_u64(seed);
            let narratives = resolve_arrivals(&mut attempt, &catalog, now, &mut rng).unwrap();
            let message = narratives.first().unwrap();
            if message.contains("ambushed") {
                ambushes = ambushes.saturating_add(1);
            } else {
                arrivals = arrivals.saturating_add(1);
            }
        }
        assert!(ambushes > 0);
        assert!(arrivals > ambushes);
    }
}

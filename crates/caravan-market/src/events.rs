//! The fixed narrative event catalog and random selection.
//!
//! Five supply/demand shocks, each targeting one city and one set of goods,
//! plus the neutral calm entry. The calm entry is marked by an explicit
//! `is_neutral` flag and is excluded from random selection; it exists so
//! callers can render a well-formed "no event" state.

use std::collections::BTreeSet;

use caravan_types::{CityId, GoodId, MarketEvent};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

/// Probability (in basis points) that a rotation activates an event rather
/// than returning to calm.
pub const EVENT_CHANCE_BP: u32 = 7_000;

/// Helper to build a targeted [`MarketEvent`].
fn shock(
    id: &str,
    title: &str,
    message: &str,
    target_city: &str,
    goods: &[&str],
    multiplier: Decimal,
) -> MarketEvent {
    MarketEvent {
        id: id.into(),
        title: title.to_owned(),
        message: message.to_owned(),
        target_city: Some(CityId::new(target_city)),
        affected_goods: goods.iter().map(|g| GoodId::new(*g)).collect(),
        multiplier,
        is_neutral: false,
    }
}

/// The neutral calm entry: no target, multiplier 1.0.
pub fn calm_event() -> MarketEvent {
    MarketEvent {
        id: "calm".into(),
        title: "Calm Markets".to_owned(),
        message: "Trade flows quietly along the caravan routes.".to_owned(),
        target_city: None,
        affected_goods: BTreeSet::new(),
        multiplier: Decimal::ONE,
        is_neutral: true,
    }
}

/// The full event catalog, calm entry included.
pub fn event_catalog() -> Vec<MarketEvent> {
    vec![
        shock(
            "famine_aethelgard",
            "Famine in Aethelgard",
            "A blight has ruined the fields around Aethelgard. Wheat is suddenly precious.",
            "aethelgard",
            &["wheat"],
            Decimal::from(5),
        ),
        shock(
            "bumper_harvest_oakhaven",
            "Bumper Harvest at Oakhaven",
            "Oakhaven's granaries overflow and the shearing pens are full. Prices tumble.",
            "oakhaven",
            &["wheat", "wool"],
            Decimal::new(5, 1),
        ),
        shock(
            "storm_silverport",
            "Storm Season at Silverport",
            "Gales keep the fishing fleet in harbor. Fish and salt grow scarce.",
            "silverport",
            &["fish", "salt"],
            Decimal::new(25, 1),
        ),
        shock(
            "vein_ironreach",
            "Rich Vein at Ironreach",
            "Miners at Ironreach have struck a rich vein. Iron and gems flood the market.",
            "ironreach",
            &["iron", "gems"],
            Decimal::new(4, 1),
        ),
        shock(
            "bandits_duskmere",
            "Bandits on the Duskmere Road",
            "Bandit raids choke the timber sledges and wine carts out of Duskmere.",
            "duskmere",
            &["timber", "wine"],
            Decimal::new(18, 1),
        ),
        calm_event(),
    ]
}

/// Randomly select the next active event.
///
/// With probability [`EVENT_CHANCE_BP`] / 10000, picks uniformly among the
/// non-neutral catalog entries; otherwise returns `None` (calm). Neutral
/// entries are never drawn.
pub fn pick_next<'a>(catalog: &'a [MarketEvent], rng: &mut impl Rng) -> Option<&'a MarketEvent> {
    let roll: u32 = rng.random_range(0..10_000);
    if roll >= EVENT_CHANCE_BP {
        return None;
    }

    let candidates: Vec<&MarketEvent> = catalog.iter().filter(|e| !e.is_neutral).collect();
    candidates.choose(rng).copied()
}

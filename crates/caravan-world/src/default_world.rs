//! Default starting world for the Caravan simulation.
//!
//! Nine goods and five cities across four economy types, connected by
//! bidirectional trade routes with per-edge distance and ambush risk. Also
//! defines the default player document restored by `reset`: three unhired
//! merchants stationed at Oakhaven with empty cargo and 1000 gold.

use caravan_types::{City, CityId, Connection, Good, GoodId, Merchant, Player};
use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::error::WorldError;

/// Gold the player starts with (and returns to on reset).
pub const STARTING_GOLD: u64 = 1000;

/// Cargo capacity of every starting merchant.
pub const DEFAULT_MERCHANT_CAPACITY: u32 = 100;

/// Names of the starting merchant roster, in hiring-scan order.
const STARTING_MERCHANTS: [&str; 3] = ["Elara", "Roderic", "Tomas"];

/// The city every starting merchant is stationed at.
pub fn starting_city() -> CityId {
    CityId::new("oakhaven")
}

/// Helper to build a [`Good`].
fn good(id: &str, name: &str, base_price: u32) -> Good {
    Good {
        id: GoodId::new(id),
        name: name.to_owned(),
        base_price,
    }
}

/// Helper to build a [`Connection`] with risk given in hundredths.
fn conn(target: &str, distance: u32, risk_pct: i64) -> Connection {
    Connection {
        target: CityId::new(target),
        distance,
        risk: Decimal::new(risk_pct, 2),
    }
}

/// Helper to build a [`City`].
fn city(id: &str, name: &str, economy_type: &str, connections: Vec<Connection>) -> City {
    City {
        id: CityId::new(id),
        name: name.to_owned(),
        economy_type: economy_type.into(),
        connections,
    }
}

/// The default goods list.
pub fn default_goods() -> Vec<Good> {
    vec![
        good("wheat", "Wheat", 30),
        good("fish", "Fish", 20),
        good("timber", "Timber", 45),
        good("salt", "Salt", 55),
        good("wool", "Wool", 60),
        good("iron", "Iron", 80),
        good("wine", "Wine", 110),
        good("spice", "Spice", 150),
        good("gems", "Gems", 300),
    ]
}

/// The default cities list with bidirectional trade routes.
pub fn default_cities() -> Vec<City> {
    vec![
        city(
            "oakhaven",
            "Oakhaven",
            "agrarian",
            vec![
                conn("silverport", 25, 10),
                conn("aethelgard", 30, 20),
                conn("ironreach", 35, 25),
            ],
        ),
        city(
            "aethelgard",
            "Aethelgard",
            "agrarian",
            vec![conn("oakhaven", 30, 20), conn("duskmere", 20, 15)],
        ),
        city(
            "silverport",
            "Silverport",
            "maritime",
            vec![conn("oakhaven", 25, 10), conn("duskmere", 45, 30)],
        ),
        city(
            "ironreach",
            "Ironreach",
            "mining",
            vec![conn("oakhaven", 35, 25), conn("duskmere", 15, 40)],
        ),
        city(
            "duskmere",
            "Duskmere",
            "forestry",
            vec![
                conn("aethelgard", 20, 15),
                conn("silverport", 45, 30),
                conn("ironreach", 15, 40),
            ],
        ),
    ]
}

/// Build the default catalog from [`default_goods`] and [`default_cities`].
///
/// # Errors
///
/// Returns [`WorldError`] if the hard-coded data fails validation (which
/// would be a bug in this module).
pub fn default_catalog() -> Result<Catalog, WorldError> {
    Catalog::new(default_goods(), default_cities())
}

/// The default player document restored by `reset`.
pub fn default_player() -> Player {
    let merchants = STARTING_MERCHANTS
        .iter()
        .map(|name| Merchant::unhired(*name, DEFAULT_MERCHANT_CAPACITY, starting_city()))
        .collect();
    Player {
        name: "Guildmaster".to_owned(),
        gold: STARTING_GOLD,
        merchants,
    }
}

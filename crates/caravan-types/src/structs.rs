//! Core entity structs for the Caravan trading simulation.
//!
//! Reference data ([`Good`], [`City`], [`Connection`]) is loaded once and
//! never mutated. The market snapshot types ([`CityMarket`] and friends) are
//! regenerated wholesale on every refresh. [`Player`] and [`Merchant`] are
//! the only durable, mutated-in-place entities.
//!
//! All persisted documents use camelCase field names, matching the JSON
//! records the surrounding shell reads and writes.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::MerchantStatus;
use crate::ids::{CityId, EconomyType, EventId, GoodId};

// ---------------------------------------------------------------------------
// Reference catalog
// ---------------------------------------------------------------------------

/// A tradeable good from the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Good {
    /// Catalog identifier.
    pub id: GoodId,
    /// Human-readable display name.
    pub name: String,
    /// Base price before role, event, and noise multipliers.
    pub base_price: u32,
}

/// A directed trade-route edge from one city to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// The city this edge leads to.
    pub target: CityId,
    /// Travel distance, interpreted as seconds of travel time.
    pub distance: u32,
    /// Ambush probability on arrival, in the range 0.0 to 1.0.
    pub risk: Decimal,
}

/// A city in the trade-route graph.
///
/// The city's current market is not part of this record; it lives in the
/// process-wide market snapshot and is replaced on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Catalog identifier.
    pub id: CityId,
    /// Human-readable display name.
    pub name: String,
    /// Key into the economy rules table.
    pub economy_type: EconomyType,
    /// Outgoing trade routes.
    pub connections: Vec<Connection>,
}

// ---------------------------------------------------------------------------
// Market snapshot
// ---------------------------------------------------------------------------

/// A priced good a city offers for sale to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOffer {
    /// The good on offer.
    pub id: GoodId,
    /// Display name copied from the catalog.
    pub name: String,
    /// Unit price in gold.
    pub price: u32,
    /// Units available this refresh (display bound, regenerated each time).
    pub stock: u32,
}

/// A priced good a city is willing to buy from the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketBid {
    /// The good being sought.
    pub id: GoodId,
    /// Display name copied from the catalog.
    pub name: String,
    /// Unit price in gold.
    pub price: u32,
    /// Units sought this refresh (display bound, regenerated each time).
    pub demand: u32,
}

/// One city's current market: what it sells and what it buys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityMarket {
    /// Goods the city sells to the player (discounted prices).
    pub selling: Vec<MarketOffer>,
    /// Goods the city buys from the player (marked-up prices).
    pub buying: Vec<MarketBid>,
}

// ---------------------------------------------------------------------------
// Narrative events
// ---------------------------------------------------------------------------

/// A narrative supply/demand shock distorting one city's prices.
///
/// Exactly one event is active at a time, or none (calm). The neutral calm
/// entry is marked explicitly with [`is_neutral`] rather than by its
/// position in the catalog, and is excluded from random selection.
///
/// [`is_neutral`]: MarketEvent::is_neutral
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEvent {
    /// Catalog identifier.
    pub id: EventId,
    /// Short headline for news display.
    pub title: String,
    /// Narrative body used to build the news record.
    pub message: String,
    /// The city whose prices are distorted, if any.
    pub target_city: Option<CityId>,
    /// The goods affected at the target city.
    pub affected_goods: BTreeSet<GoodId>,
    /// Price multiplier applied to affected goods.
    pub multiplier: Decimal,
    /// Marks the neutral calm entry.
    pub is_neutral: bool,
}

/// The latest human-readable description of the economic situation.
///
/// A single process-wide record, overwritten on every event change. The
/// `id` is a monotonic token (unix milliseconds at the time of rotation)
/// so readers can detect that the news changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalNews {
    /// Monotonic token identifying this news edition.
    pub id: i64,
    /// The news text.
    pub text: String,
}

// ---------------------------------------------------------------------------
// Player and merchants
// ---------------------------------------------------------------------------

/// A merchant in the player's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    /// Unique name, used as the merchant's identifier.
    pub name: String,
    /// Whether the player has hired this merchant yet.
    pub hired: bool,
    /// Whether the merchant is available for orders.
    pub free: bool,
    /// Maximum total cargo the merchant can carry.
    pub capacity: u32,
    /// The city the merchant is at (or departed from, while traveling).
    pub current_location: CityId,
    /// Idle or traveling.
    pub status: MerchantStatus,
    /// Destination city while traveling.
    pub destination: Option<CityId>,
    /// Scheduled arrival time while traveling.
    pub arrival_time: Option<DateTime<Utc>>,
    /// Carried cargo: good id to quantity. Sum never exceeds `capacity`.
    pub inventory: BTreeMap<GoodId, u32>,
}

impl Merchant {
    /// Create an unhired, idle merchant stationed at the given city with
    /// empty cargo. This is the shape every roster entry starts in.
    pub fn unhired(name: impl Into<String>, capacity: u32, location: CityId) -> Self {
        Self {
            name: name.into(),
            hired: false,
            free: true,
            capacity,
            current_location: location,
            status: MerchantStatus::Idle,
            destination: None,
            arrival_time: None,
            inventory: BTreeMap::new(),
        }
    }
}

/// The durable player document.
///
/// The aggregate inventory across all merchants is recomputed on every
/// read and is deliberately not stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Player display name.
    pub name: String,
    /// Gold on hand. Never negative at rest.
    pub gold: u64,
    /// The merchant roster, in hiring-scan order.
    pub merchants: Vec<Merchant>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn merchant_document_uses_camel_case() {
        let merchant = Merchant::unhired("Elara", 100, CityId::new("oakhaven"));
        let json = serde_json::to_value(&merchant).unwrap();
        assert_eq!(json["currentLocation"], "oakhaven");
        assert_eq!(json["arrivalTime"], serde_json::Value::Null);
        assert_eq!(json["status"], "idle");
    }

    #[test]
    fn good_base_price_field_name() {
        let good = Good {
            id: GoodId::new("wheat"),
            name: "Wheat".to_owned(),
            base_price: 30,
        };
        let json = serde_json::to_value(&good).unwrap();
        assert_eq!(json["basePrice"], 30);
    }

    #[test]
    fn player_roundtrip_serde() {
        let player = Player {
            name: "Guildmaster".to_owned(),
            gold: 1000,
            merchants: vec![Merchant::unhired("Elara", 100, CityId::new("oakhaven"))],
        };
        let json = serde_json::to_string(&player).unwrap();
        let restored: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, restored);
    }

    #[test]
    fn connection_risk_roundtrip() {
        let conn = Connection {
            target: CityId::new("silverport"),
            distance: 25,
            risk: Decimal::new(1, 1),
        };
        let json = serde_json::to_string(&conn).unwrap();
        let restored: Connection = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.risk, Decimal::new(1, 1));
    }
}

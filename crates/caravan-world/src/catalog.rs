//! The reference catalog: goods and cities indexed by slug.
//!
//! The catalog is loaded once at process start and never mutated. It is the
//! backbone every other component reads from: the market generator derives
//! prices from goods and economy types, the dispatch processor resolves
//! connections, and the travel resolver looks up route risk.

use std::collections::BTreeMap;
use std::path::Path;

use caravan_types::{City, CityId, Connection, Good, GoodId};

use crate::error::WorldError;

/// The immutable reference catalog of goods and cities.
///
/// Construction validates that identifiers are unique and that every
/// connection targets a city that exists.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// All goods indexed by their identifier.
    goods: BTreeMap<GoodId, Good>,
    /// All cities indexed by their identifier.
    cities: BTreeMap<CityId, City>,
}

impl Catalog {
    /// Build a catalog from goods and cities lists.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateGood`] or [`WorldError::DuplicateCity`]
    /// on repeated identifiers, and [`WorldError::DanglingConnection`] if a
    /// connection targets a city absent from the list.
    pub fn new(goods: Vec<Good>, cities: Vec<City>) -> Result<Self, WorldError> {
        let mut good_map = BTreeMap::new();
        for good in goods {
            let id = good.id.clone();
            if good_map.insert(id.clone(), good).is_some() {
                return Err(WorldError::DuplicateGood(id));
            }
        }

        let mut city_map: BTreeMap<CityId, City> = BTreeMap::new();
        for city in cities {
            let id = city.id.clone();
            if city_map.insert(id.clone(), city).is_some() {
                return Err(WorldError::DuplicateCity(id));
            }
        }

        for city in city_map.values() {
            for connection in &city.connections {
                if !city_map.contains_key(&connection.target) {
                    return Err(WorldError::DanglingConnection {
                        from: city.id.clone(),
                        target: connection.target.clone(),
                    });
                }
            }
        }

        Ok(Self {
            goods: good_map,
            cities: city_map,
        })
    }

    /// Load a catalog from the two reference JSON documents.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Io`] if a file cannot be read,
    /// [`WorldError::Parse`] on malformed JSON, or a validation error from
    /// [`Catalog::new`].
    pub fn from_files(goods_path: &Path, cities_path: &Path) -> Result<Self, WorldError> {
        let goods_raw = std::fs::read_to_string(goods_path)?;
        let cities_raw = std::fs::read_to_string(cities_path)?;
        let catalog = Self::from_json(&goods_raw, &cities_raw)?;
        tracing::info!(
            goods = catalog.goods.len(),
            cities = catalog.cities.len(),
            "Reference catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog from raw JSON strings.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Parse`] on malformed JSON, or a validation
    /// error from [`Catalog::new`].
    pub fn from_json(goods_json: &str, cities_json: &str) -> Result<Self, WorldError> {
        let goods: Vec<Good> = serde_json::from_str(goods_json)?;
        let cities: Vec<City> = serde_json::from_str(cities_json)?;
        Self::new(goods, cities)
    }

    // -------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------

    /// Get a good by identifier.
    pub fn good(&self, id: &GoodId) -> Option<&Good> {
        self.goods.get(id)
    }

    /// Get a city by identifier.
    pub fn city(&self, id: &CityId) -> Option<&City> {
        self.cities.get(id)
    }

    /// Find the connection from one city to another, if the edge exists.
    pub fn connection(&self, from: &CityId, to: &CityId) -> Option<&Connection> {
        self.cities
            .get(from)
            .and_then(|city| city.connections.iter().find(|c| &c.target == to))
    }

    /// Iterate over all goods in identifier order.
    pub fn goods(&self) -> impl Iterator<Item = &Good> {
        self.goods.values()
    }

    /// Iterate over all cities in identifier order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    /// Number of goods in the catalog.
    pub fn good_count(&self) -> usize {
        self.goods.len()
    }

    /// Number of cities in the catalog.
    pub fn city_count(&self) -> usize {
        self.cities.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn good(id: &str, price: u32) -> Good {
        Good {
            id: GoodId::new(id),
            name: id.to_owned(),
            base_price: price,
        }
    }

    fn city(id: &str, connections: Vec<Connection>) -> City {
        City {
            id: CityId::new(id),
            name: id.to_owned(),
            economy_type: "agrarian".into(),
            connections,
        }
    }

    fn conn(target: &str, distance: u32) -> Connection {
        Connection {
            target: CityId::new(target),
            distance,
            risk: Decimal::new(2, 1),
        }
    }

    #[test]
    fn duplicate_good_rejected() {
        let result = Catalog::new(vec![good("wheat", 30), good("wheat", 40)], vec![]);
        assert!(matches!(result, Err(WorldError::DuplicateGood(_))));
    }

    #[test]
    fn duplicate_city_rejected() {
        let result = Catalog::new(vec![], vec![city("oakhaven", vec![]), city("oakhaven", vec![])]);
        assert!(matches!(result, Err(WorldError::DuplicateCity(_))));
    }

    #[test]
    fn dangling_connection_rejected() {
        let result = Catalog::new(vec![], vec![city("oakhaven", vec![conn("atlantis", 10)])]);
        assert!(matches!(result, Err(WorldError::DanglingConnection { .. })));
    }

    #[test]
    fn connection_lookup_is_directional() {
        let catalog = Catalog::new(
            vec![],
            vec![
                city("oakhaven", vec![conn("silverport", 25)]),
                city("silverport", vec![]),
            ],
        )
        .unwrap();

        let from = CityId::new("oakhaven");
        let to = CityId::new("silverport");
        assert!(catalog.connection(&from, &to).is_some());
        assert!(catalog.connection(&to, &from).is_none());
    }

    #[test]
    fn from_json_parses_camel_case_documents() {
        let goods = r#"[{"id": "wheat", "name": "Wheat", "basePrice": 30}]"#;
        let cities = r#"[{
            "id": "oakhaven",
            "name": "Oakhaven",
            "economyType": "agrarian",
            "connections": [{"target": "aethelgard", "distance": 30, "risk": "0.2"}]
        }, {
            "id": "aethelgard",
            "name": "Aethelgard",
            "economyType": "agrarian",
            "connections": []
        }]"#;

        let catalog = Catalog::from_json(goods, cities).unwrap();
        assert_eq!(catalog.good_count(), 1);
        assert_eq!(catalog.city_count(), 2);
        let wheat = catalog.good(&GoodId::new("wheat")).unwrap();
        assert_eq!(wheat.base_price, 30);
    }
}

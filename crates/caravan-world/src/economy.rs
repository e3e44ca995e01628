//! The economy rules table: economy type to production/demand profile.
//!
//! Every city carries an [`EconomyType`] slug; this static table decides
//! which goods that city sells (produced) and which it buys (demanded).
//! Cities with a type absent from the table simply get no market -- the
//! generator passes them through unchanged.
//!
//! [`EconomyType`]: caravan_types::EconomyType

use std::collections::BTreeMap;

use caravan_types::{EconomyType, GoodId};

/// The goods an economy type produces and demands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomyProfile {
    /// Goods the city produces, offered on its selling list.
    pub produces: Vec<GoodId>,
    /// Goods the city demands, sought on its buying list.
    pub demands: Vec<GoodId>,
}

/// Static mapping from economy type to production/demand profile.
#[derive(Debug, Clone, Default)]
pub struct EconomyRules {
    /// Profiles indexed by economy type.
    profiles: BTreeMap<EconomyType, EconomyProfile>,
}

impl EconomyRules {
    /// Create an empty rules table.
    pub const fn new() -> Self {
        Self {
            profiles: BTreeMap::new(),
        }
    }

    /// The standard rules table used by the default world.
    pub fn standard() -> Self {
        let mut rules = Self::new();
        rules.insert(
            "agrarian",
            EconomyProfile {
                produces: vec!["wheat".into(), "wool".into()],
                demands: vec!["iron".into(), "spice".into()],
            },
        );
        rules.insert(
            "maritime",
            EconomyProfile {
                produces: vec!["fish".into(), "salt".into()],
                demands: vec!["timber".into(), "wine".into()],
            },
        );
        rules.insert(
            "mining",
            EconomyProfile {
                produces: vec!["iron".into(), "gems".into()],
                demands: vec!["wheat".into(), "fish".into()],
            },
        );
        rules.insert(
            "forestry",
            EconomyProfile {
                produces: vec!["timber".into(), "wine".into()],
                demands: vec!["salt".into(), "wool".into()],
            },
        );
        rules
    }

    /// Register a profile for an economy type, replacing any existing one.
    pub fn insert(&mut self, economy_type: impl Into<EconomyType>, profile: EconomyProfile) {
        self.profiles.insert(economy_type.into(), profile);
    }

    /// Look up the profile for an economy type.
    pub fn profile(&self, economy_type: &EconomyType) -> Option<&EconomyProfile> {
        self.profiles.get(economy_type)
    }

    /// Iterate over all registered profiles.
    pub fn profiles(&self) -> impl Iterator<Item = (&EconomyType, &EconomyProfile)> {
        self.profiles.iter()
    }
}

//! Merchant lookup and the hiring policy.
//!
//! Hiring deliberately uses an explicit ordered scan -- the first merchant
//! in roster order with `hired == false` is selected -- rather than relying
//! on any container iteration quirk.

use caravan_types::{Merchant, Player};

use crate::error::MerchantError;

/// Find a merchant by name.
///
/// # Errors
///
/// Returns [`MerchantError::MerchantNotFound`] if no roster entry matches.
pub fn find_merchant<'a>(player: &'a Player, name: &str) -> Result<&'a Merchant, MerchantError> {
    player
        .merchants
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| MerchantError::MerchantNotFound(name.to_owned()))
}

/// Find a merchant by name, mutably.
///
/// # Errors
///
/// Returns [`MerchantError::MerchantNotFound`] if no roster entry matches.
pub fn find_merchant_mut<'a>(
    player: &'a mut Player,
    name: &str,
) -> Result<&'a mut Merchant, MerchantError> {
    player
        .merchants
        .iter_mut()
        .find(|m| m.name == name)
        .ok_or_else(|| MerchantError::MerchantNotFound(name.to_owned()))
}

/// Hire the first not-yet-hired merchant in roster order.
///
/// Returns the hired merchant's name. The merchant stays idle and free;
/// hiring only flips the `hired` flag.
///
/// # Errors
///
/// Returns [`MerchantError::AllMerchantsHired`] if every roster entry is
/// already hired.
pub fn hire_first_unhired(player: &mut Player) -> Result<String, MerchantError> {
    let merchant = player
        .merchants
        .iter_mut()
        .find(|m| !m.hired)
        .ok_or(MerchantError::AllMerchantsHired)?;
    merchant.hired = true;
    tracing::info!(merchant = %merchant.name, "Merchant hired");
    Ok(merchant.name.clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use caravan_world::default_player;

    use super::*;

    #[test]
    fn hiring_follows_roster_order() {
        let mut player = default_player();
        assert_eq!(hire_first_unhired(&mut player).unwrap(), "Elara");
        assert_eq!(hire_first_unhired(&mut player).unwrap(), "Roderic");
        assert_eq!(hire_first_unhired(&mut player).unwrap(), "Tomas");
    }

    #[test]
    fn hiring_exhausted_roster_fails() {
        let mut player = default_player();
        for _ in 0..3 {
            let _ = hire_first_unhired(&mut player).unwrap();
        }
        let result = hire_first_unhired(&mut player);
        assert!(matches!(result, Err(MerchantError::AllMerchantsHired)));
    }

    #[test]
    fn hired_merchant_stays_free_and_idle() {
        let mut player = default_player();
        let name = hire_first_unhired(&mut player).unwrap();
        let merchant = find_merchant(&player, &name).unwrap();
        assert!(merchant.hired);
        assert!(merchant.free);
        assert!(merchant.inventory.is_empty());
    }

    #[test]
    fn unknown_merchant_lookup_fails() {
        let player = default_player();
        let result = find_merchant(&player, "Nessa");
        assert!(matches!(result, Err(MerchantError::MerchantNotFound(_))));
    }
}

//! Cargo (wagon inventory) operations for merchants.
//!
//! Each merchant carries goods subject to a capacity limit. This module
//! provides functions for loading, unloading, and querying cargo with full
//! checked arithmetic -- no silent overflows, no panics. The invariant that
//! the cargo sum never exceeds capacity is enforced here and nowhere else.

use std::collections::BTreeMap;

use caravan_types::{GoodId, Player};

use crate::error::MerchantError;

/// Compute the total load (sum of all quantities) in a cargo hold.
///
/// Returns `None` if the sum overflows `u32`.
pub fn total_cargo(inventory: &BTreeMap<GoodId, u32>) -> Option<u32> {
    let mut total: u32 = 0;
    for qty in inventory.values() {
        total = total.checked_add(*qty)?;
    }
    Some(total)
}

/// Check whether the cargo holds at least `amount` of the given good.
pub fn has_goods(inventory: &BTreeMap<GoodId, u32>, good: &GoodId, amount: u32) -> bool {
    inventory.get(good).copied().unwrap_or(0) >= amount
}

/// Load `amount` units of `good` into the cargo.
///
/// Fails without mutating if the addition would exceed `capacity` or cause
/// a `u32` overflow.
pub fn load_goods(
    inventory: &mut BTreeMap<GoodId, u32>,
    capacity: u32,
    good: &GoodId,
    amount: u32,
) -> Result<(), MerchantError> {
    let current_load = total_cargo(inventory).ok_or_else(|| MerchantError::ArithmeticOverflow {
        context: String::from("total_cargo overflow in load_goods"),
    })?;

    let new_load = current_load
        .checked_add(amount)
        .ok_or_else(|| MerchantError::CapacityExceeded {
            good: good.clone(),
            attempted: amount,
            current_load,
            capacity,
        })?;

    if new_load > capacity {
        return Err(MerchantError::CapacityExceeded {
            good: good.clone(),
            attempted: amount,
            current_load,
            capacity,
        });
    }

    let entry = inventory.entry(good.clone()).or_insert(0);
    // Cannot overflow: new_load <= capacity <= u32::MAX and the individual
    // quantity is bounded by the total load.
    *entry = entry
        .checked_add(amount)
        .ok_or_else(|| MerchantError::ArithmeticOverflow {
            context: String::from("individual good quantity overflow"),
        })?;

    Ok(())
}

/// Unload `amount` units of `good` from the cargo.
///
/// Fails without mutating if the merchant does not hold enough of the good.
/// Removes the key entirely if the quantity reaches zero.
pub fn unload_goods(
    inventory: &mut BTreeMap<GoodId, u32>,
    good: &GoodId,
    amount: u32,
) -> Result<(), MerchantError> {
    let current = inventory.get(good).copied().unwrap_or(0);

    if current < amount {
        return Err(MerchantError::InsufficientStock {
            good: good.clone(),
            requested: amount,
            available: current,
        });
    }

    let remaining = current.saturating_sub(amount);
    if remaining == 0 {
        inventory.remove(good);
    } else {
        inventory.insert(good.clone(), remaining);
    }

    Ok(())
}

/// Aggregate the player's inventory across all merchants.
///
/// Recomputed on every read; the aggregate is never stored. Quantities are
/// summed with saturating arithmetic.
pub fn aggregate_inventory(player: &Player) -> BTreeMap<GoodId, u32> {
    let mut aggregate: BTreeMap<GoodId, u32> = BTreeMap::new();
    for merchant in &player.merchants {
        for (good, qty) in &merchant.inventory {
            let entry = aggregate.entry(good.clone()).or_insert(0);
            *entry = entry.saturating_add(*qty);
        }
    }
    aggregate
}

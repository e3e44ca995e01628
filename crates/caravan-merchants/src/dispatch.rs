//! The dispatch processor: journey validation and departure.
//!
//! A merchant may only be dispatched along an existing connection from its
//! current city, and only while free. Re-dispatching a traveling merchant
//! would silently overwrite its destination and arrival time, so it is
//! rejected with [`MerchantError::MerchantNotFree`].
//!
//! The connection's distance is interpreted as seconds of travel time.

use caravan_types::{CityId, MerchantStatus, Player};
use caravan_world::Catalog;
use chrono::{DateTime, Duration, Utc};

use crate::error::MerchantError;

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReceipt {
    /// Human-readable confirmation for the shell.
    pub message: String,
    /// Where the merchant is headed.
    pub destination: CityId,
    /// When the merchant will arrive.
    pub arrival_time: DateTime<Utc>,
}

/// Validate and start a merchant's journey to a connected city.
///
/// # Errors
///
/// - [`MerchantError::MerchantNotFound`] for an unknown merchant name.
/// - [`MerchantError::MerchantNotFree`] if the merchant is already
///   traveling.
/// - [`MerchantError::RouteNotFound`] if no connection leads from the
///   merchant's current city to the target. The merchant stays idle.
pub fn dispatch(
    player: &mut Player,
    merchant_name: &str,
    target: &CityId,
    catalog: &Catalog,
    now: DateTime<Utc>,
) -> Result<DispatchReceipt, MerchantError> {
    let merchant = player
        .merchants
        .iter_mut()
        .find(|m| m.name == merchant_name)
        .ok_or_else(|| MerchantError::MerchantNotFound(merchant_name.to_owned()))?;

    if !merchant.free || merchant.status == MerchantStatus::Traveling {
        return Err(MerchantError::MerchantNotFree {
            name: merchant.name.clone(),
        });
    }

    let connection = catalog
        .connection(&merchant.current_location, target)
        .ok_or_else(|| MerchantError::RouteNotFound {
            from: merchant.current_location.clone(),
            to: target.clone(),
        })?;

    let arrival_time = now
        .checked_add_signed(Duration::seconds(i64::from(connection.distance)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    merchant.free = false;
    merchant.status = MerchantStatus::Traveling;
    merchant.destination = Some(target.clone());
    merchant.arrival_time = Some(arrival_time);

    let target_name = catalog
        .city(target)
        .map_or_else(|| target.to_string(), |city| city.name.clone());

    tracing::info!(merchant = %merchant.name, destination = %target,
        distance = connection.distance, "Merchant dispatched");
    Ok(DispatchReceipt {
        message: format!(
            "{} set out for {target_name}, arriving in {} seconds.",
            merchant.name, connection.distance
        ),
        destination: target.clone(),
        arrival_time,
    })
}

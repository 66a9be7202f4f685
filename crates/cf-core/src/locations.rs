use cf_rules::{build_location_map, clamped_occupancy, default_capacity};
use cf_schemas::{Location, LocationMap};
use cf_store::{NewLocation, Store};
use tracing::debug;

use crate::error::{require_non_empty, CoreError};

/// Fetch a location by code, lazily creating it with the convention-based
/// default capacity on first reference.
pub(crate) async fn find_or_create(
    store: &dyn Store,
    location_code: &str,
) -> Result<Location, CoreError> {
    if let Some(location) = store.find_location(location_code).await? {
        return Ok(location);
    }
    let location = store
        .insert_location(NewLocation {
            location_code: location_code.to_string(),
            capacity: default_capacity(location_code),
            occupied: 0,
        })
        .await?;
    debug!(
        code = location_code,
        capacity = location.capacity,
        "location auto-created"
    );
    Ok(location)
}

/// Add `delta` to the occupancy counter of `location_code`, clamping at zero.
/// The location is auto-created if unknown.
pub async fn adjust_occupancy(
    store: &dyn Store,
    location_code: &str,
    delta: i32,
) -> Result<Location, CoreError> {
    let mut location = find_or_create(store, location_code).await?;
    location.occupied = clamped_occupancy(location.occupied, delta);
    store.update_location(&location).await?;
    debug!(
        code = location_code,
        delta,
        occupied = location.occupied,
        "occupancy adjusted"
    );
    Ok(location)
}

/// Overwrite the capacity ceiling of a location (auto-created if unknown).
pub async fn set_capacity(
    store: &dyn Store,
    location_code: &str,
    capacity: i32,
) -> Result<Location, CoreError> {
    require_non_empty("locationCode", location_code)?;
    if capacity < 0 {
        return Err(CoreError::validation("capacity must not be negative"));
    }
    let mut location = find_or_create(store, location_code).await?;
    location.capacity = capacity;
    store.update_location(&location).await?;
    Ok(location)
}

/// Overwrite the occupancy counter from the authoritative live coil count.
/// This is the drift-correction path: occupancy is bookkept incrementally
/// with no transaction around the coil/location write chain, so counters can
/// drift from reality.
pub async fn reconcile_occupancy(
    store: &dyn Store,
    location_code: &str,
) -> Result<Location, CoreError> {
    let mut location = find_or_create(store, location_code).await?;
    let count = store.count_coils_at(location_code).await?;
    location.occupied = count as i32;
    store.update_location(&location).await?;
    debug!(code = location_code, occupied = location.occupied, "occupancy reconciled");
    Ok(location)
}

pub async fn list_locations(store: &dyn Store) -> Result<Vec<Location>, CoreError> {
    Ok(store.list_locations().await?)
}

/// Project the current coil population onto the fixed yard map.
pub async fn location_map(store: &dyn Store) -> Result<LocationMap, CoreError> {
    let coils = store.list_coils().await?;
    Ok(build_location_map(&coils))
}

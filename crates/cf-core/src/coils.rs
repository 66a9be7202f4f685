use std::collections::HashMap;

use cf_rules::{derived_load_code, LocationInput};
use cf_schemas::{Coil, CoilWithLoad, CreateCoil, Load, LoadStatus, UpdateCoil};
use cf_store::{NewCoil, NewLoad, Store};
use tracing::info;

use crate::error::{non_empty_opt, require_non_empty, CoreError};
use crate::loads::recompute_load_status;
use crate::locations::adjust_occupancy;

async fn fetch_coil(store: &dyn Store, id: i64) -> Result<Coil, CoreError> {
    store
        .get_coil(id)
        .await?
        .ok_or_else(|| CoreError::not_found("coil", id))
}

async fn with_load(store: &dyn Store, coil: Coil) -> Result<CoilWithLoad, CoreError> {
    let load = match coil.load_id {
        Some(load_id) => store.get_load(load_id).await?,
        None => None,
    };
    Ok(CoilWithLoad { coil, load })
}

/// Find the load owning `order_number`, creating it (with a derived load
/// code and default Missing status) on first reference.
async fn find_or_create_load(store: &dyn Store, order_number: &str) -> Result<Load, CoreError> {
    if let Some(load) = store.find_load_by_order(order_number).await? {
        return Ok(load);
    }
    let load = store
        .insert_load(NewLoad {
            load_code: derived_load_code(order_number),
            order_number: order_number.to_string(),
            ship_date: None,
            truck_time: None,
            time_to_ship: None,
            client_name: None,
            status: LoadStatus::Missing,
        })
        .await?;
    info!(
        order_number,
        load_code = %load.load_code,
        "load auto-created from coil order number"
    );
    Ok(load)
}

pub async fn get_coil(store: &dyn Store, id: i64) -> Result<CoilWithLoad, CoreError> {
    let coil = fetch_coil(store, id).await?;
    with_load(store, coil).await
}

pub async fn list_coils(store: &dyn Store) -> Result<Vec<CoilWithLoad>, CoreError> {
    let coils = store.list_coils().await?;
    let loads = store.list_loads().await?;
    let by_id: HashMap<i64, Load> = loads.into_iter().map(|l| (l.id, l)).collect();

    Ok(coils
        .into_iter()
        .map(|coil| CoilWithLoad {
            load: coil.load_id.and_then(|id| by_id.get(&id).cloned()),
            coil,
        })
        .collect())
}

/// Create a coil.
///
/// The trailing `*` marker on the location input is stripped and lands in the
/// ready-from-current-location flag. When an order number is supplied the
/// matching load is found or auto-created and the coil linked to it. The
/// target location's occupancy is incremented and the linked load's status
/// re-derived before the stored coil is returned.
pub async fn create_coil(store: &dyn Store, input: CreateCoil) -> Result<CoilWithLoad, CoreError> {
    let parsed = LocationInput::parse(&input.location);
    require_non_empty("coilId", &input.coil_id)?;
    require_non_empty("location", &parsed.code)?;

    let order_number = non_empty_opt(input.order_number);
    let load = match order_number.as_deref() {
        Some(order) => Some(find_or_create_load(store, order).await?),
        None => None,
    };

    let coil = store
        .insert_coil(NewCoil {
            coil_id: input.coil_id,
            location: parsed.code,
            width: input.width,
            weight: input.weight,
            order_number,
            status: input.status.unwrap_or_default(),
            is_ready_from_current_location: parsed.marker,
            load_id: load.as_ref().map(|l| l.id),
        })
        .await?;

    adjust_occupancy(store, &coil.location, 1).await?;

    if let Some(load) = &load {
        recompute_load_status(store, load.id).await?;
    }

    get_coil(store, coil.id).await
}

/// Update a coil. Marker parsing is re-applied to a supplied location; if the
/// (stripped) location changed, the old slot is decremented and the new one
/// incremented before the coil row is persisted. The linked load's status is
/// re-derived afterwards.
pub async fn update_coil(
    store: &dyn Store,
    id: i64,
    patch: UpdateCoil,
) -> Result<CoilWithLoad, CoreError> {
    let mut coil = fetch_coil(store, id).await?;
    let old_location = coil.location.clone();

    // Marker present => flag true. Marker absent => explicit patch value,
    // else the previously stored flag.
    let (new_location, flag) = match patch.location.as_deref() {
        Some(raw) => {
            let parsed = LocationInput::parse(raw);
            require_non_empty("location", &parsed.code)?;
            let flag = if parsed.marker {
                true
            } else {
                patch
                    .is_ready_from_current_location
                    .unwrap_or(coil.is_ready_from_current_location)
            };
            (parsed.code, flag)
        }
        None => (
            coil.location.clone(),
            patch
                .is_ready_from_current_location
                .unwrap_or(coil.is_ready_from_current_location),
        ),
    };

    if let Some(coil_id) = &patch.coil_id {
        require_non_empty("coilId", coil_id)?;
    }

    if new_location != old_location {
        adjust_occupancy(store, &old_location, -1).await?;
        adjust_occupancy(store, &new_location, 1).await?;
    }

    if let Some(coil_id) = patch.coil_id {
        coil.coil_id = coil_id;
    }
    if let Some(width) = patch.width {
        coil.width = width;
    }
    if let Some(weight) = patch.weight {
        coil.weight = weight;
    }
    if let Some(order_number) = patch.order_number {
        // The order number is descriptive on an existing coil; the load link
        // is only established at creation time.
        coil.order_number = non_empty_opt(Some(order_number));
    }
    if let Some(status) = patch.status {
        coil.status = status;
    }
    coil.location = new_location;
    coil.is_ready_from_current_location = flag;

    store.update_coil(&coil).await?;

    if let Some(load_id) = coil.load_id {
        recompute_load_status(store, load_id).await?;
    }

    get_coil(store, id).await
}

/// Delete a coil: the vacated location's occupancy is decremented and the
/// formerly linked load's status re-derived (an emptied load goes Missing
/// unless it was already Shipped).
pub async fn delete_coil(store: &dyn Store, id: i64) -> Result<(), CoreError> {
    let coil = fetch_coil(store, id).await?;
    let location = coil.location.clone();
    let load_id = coil.load_id;

    store.delete_coil(id).await?;
    adjust_occupancy(store, &location, -1).await?;

    if let Some(load_id) = load_id {
        recompute_load_status(store, load_id).await?;
    }
    Ok(())
}

use std::collections::HashMap;

use cf_rules::{next_load_status, ships_on};
use cf_schemas::{Coil, CreateLoad, Load, LoadStatus, LoadWithCoils, UpdateLoad};
use cf_store::{NewLoad, Store};
use chrono::NaiveDate;
use tracing::debug;

use crate::error::{non_empty_opt, require_non_empty, CoreError};

async fn fetch_load(store: &dyn Store, id: i64) -> Result<Load, CoreError> {
    store
        .get_load(id)
        .await?
        .ok_or_else(|| CoreError::not_found("load", id))
}

async fn with_coils(store: &dyn Store, load: Load) -> Result<LoadWithCoils, CoreError> {
    let coils = store.coils_for_load(load.id).await?;
    Ok(LoadWithCoils { load, coils })
}

/// Re-derive and persist the status of a load from its current member coils.
///
/// `Shipped` is terminal: a manually shipped load is returned untouched.
/// A missing load id is fatal to the surrounding operation.
pub async fn recompute_load_status(store: &dyn Store, load_id: i64) -> Result<(), CoreError> {
    let mut load = fetch_load(store, load_id).await?;
    if load.status == LoadStatus::Shipped {
        return Ok(());
    }

    let coils = store.coils_for_load(load_id).await?;
    let next = next_load_status(load.status, &coils);
    if next != load.status {
        debug!(
            load_id,
            from = load.status.as_str(),
            to = next.as_str(),
            "load status re-derived"
        );
    }
    load.status = next;
    store.update_load(&load).await?;
    Ok(())
}

pub async fn get_load(store: &dyn Store, id: i64) -> Result<LoadWithCoils, CoreError> {
    let load = fetch_load(store, id).await?;
    with_coils(store, load).await
}

pub async fn list_loads(store: &dyn Store) -> Result<Vec<LoadWithCoils>, CoreError> {
    let loads = store.list_loads().await?;
    let coils = store.list_coils().await?;

    let mut by_load: HashMap<i64, Vec<Coil>> = HashMap::new();
    for coil in coils {
        if let Some(load_id) = coil.load_id {
            by_load.entry(load_id).or_default().push(coil);
        }
    }

    Ok(loads
        .into_iter()
        .map(|load| {
            let coils = by_load.remove(&load.id).unwrap_or_default();
            LoadWithCoils { load, coils }
        })
        .collect())
}

pub async fn create_load(store: &dyn Store, input: CreateLoad) -> Result<LoadWithCoils, CoreError> {
    require_non_empty("loadCode", &input.load_code)?;
    require_non_empty("orderNumber", &input.order_number)?;
    if store
        .find_load_by_order(&input.order_number)
        .await?
        .is_some()
    {
        return Err(CoreError::validation(format!(
            "a load with order number {} already exists",
            input.order_number
        )));
    }

    let load = store
        .insert_load(NewLoad {
            load_code: input.load_code,
            order_number: input.order_number,
            ship_date: input.ship_date,
            truck_time: non_empty_opt(input.truck_time),
            time_to_ship: non_empty_opt(input.time_to_ship),
            client_name: non_empty_opt(input.client_name),
            status: LoadStatus::Missing,
        })
        .await?;

    // Coils created earlier may already reference this order number, but they
    // are only linked at coil-creation time; a fresh load starts from its own
    // member set (normally empty => Missing).
    recompute_load_status(store, load.id).await?;
    get_load(store, load.id).await
}

pub async fn update_load(
    store: &dyn Store,
    id: i64,
    patch: UpdateLoad,
) -> Result<LoadWithCoils, CoreError> {
    let mut load = fetch_load(store, id).await?;

    if let Some(load_code) = patch.load_code {
        require_non_empty("loadCode", &load_code)?;
        load.load_code = load_code;
    }
    if let Some(order_number) = patch.order_number {
        require_non_empty("orderNumber", &order_number)?;
        load.order_number = order_number;
    }
    if let Some(ship_date) = patch.ship_date {
        load.ship_date = Some(ship_date);
    }
    if let Some(truck_time) = patch.truck_time {
        load.truck_time = non_empty_opt(Some(truck_time));
    }
    if let Some(time_to_ship) = patch.time_to_ship {
        load.time_to_ship = non_empty_opt(Some(time_to_ship));
    }
    if let Some(client_name) = patch.client_name {
        load.client_name = non_empty_opt(Some(client_name));
    }
    if let Some(status) = patch.status {
        load.status = status;
    }

    store.update_load(&load).await?;

    // A manual Shipped override is final; anything else is re-derived from
    // the member coils right away.
    if patch.status != Some(LoadStatus::Shipped) {
        recompute_load_status(store, id).await?;
    }

    get_load(store, id).await
}

/// Direct manual status override. No re-derivation runs afterwards; this is
/// how a load is marked `Shipped` (and how an operator can force any status).
pub async fn set_load_status(
    store: &dyn Store,
    id: i64,
    status: LoadStatus,
) -> Result<LoadWithCoils, CoreError> {
    let mut load = fetch_load(store, id).await?;
    load.status = status;
    store.update_load(&load).await?;
    get_load(store, id).await
}

pub async fn delete_load(store: &dyn Store, id: i64) -> Result<(), CoreError> {
    fetch_load(store, id).await?;
    // Member coils are unlinked by the store, never deleted.
    store.delete_load(id).await?;
    Ok(())
}

/// Loads whose resolved shipping date equals `date` (authoritative date
/// field, legacy timestamp fallback; unresolvable records are excluded).
pub async fn loads_on_date(
    store: &dyn Store,
    date: NaiveDate,
) -> Result<Vec<LoadWithCoils>, CoreError> {
    let mut all = list_loads(store).await?;
    all.retain(|l| ships_on(&l.load, date));
    Ok(all)
}

//! Row → entity mapping. Status columns are stored as their wire text and
//! parsed back through the closed-set enums; an unknown value in the column
//! is a decode failure, not a silent default.

use anyhow::{anyhow, Result};
use cf_schemas::{Coil, CoilStatus, Load, LoadStatus, Location};
use sqlx::postgres::PgRow;
use sqlx::Row;

pub(crate) fn coil_from_row(row: &PgRow) -> Result<Coil> {
    let status_text: String = row.try_get("status")?;
    let status = CoilStatus::parse(&status_text)
        .ok_or_else(|| anyhow!("invalid coil status in db: {status_text}"))?;

    Ok(Coil {
        id: row.try_get("id")?,
        coil_id: row.try_get("coil_id")?,
        location: row.try_get("location")?,
        width: row.try_get("width")?,
        weight: row.try_get("weight")?,
        order_number: row.try_get("order_number")?,
        status,
        is_ready_from_current_location: row.try_get("is_ready_from_current_location")?,
        load_id: row.try_get("load_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn load_from_row(row: &PgRow) -> Result<Load> {
    let status_text: String = row.try_get("status")?;
    let status = LoadStatus::parse(&status_text)
        .ok_or_else(|| anyhow!("invalid load status in db: {status_text}"))?;

    Ok(Load {
        id: row.try_get("id")?,
        load_code: row.try_get("load_code")?,
        order_number: row.try_get("order_number")?,
        ship_date: row.try_get("ship_date")?,
        truck_time: row.try_get("truck_time")?,
        time_to_ship: row.try_get("time_to_ship")?,
        client_name: row.try_get("client_name")?,
        status,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(crate) fn location_from_row(row: &PgRow) -> Result<Location> {
    Ok(Location {
        id: row.try_get("id")?,
        location_code: row.try_get("location_code")?,
        capacity: row.try_get("capacity")?,
        occupied: row.try_get("occupied")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

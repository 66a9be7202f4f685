//! cf-rules
//!
//! The deterministic rule layer of the inventory tracker:
//! - load-status derivation (Ready / Missing / Shipped-override)
//! - location-input marker parsing and the default-capacity convention
//! - occupancy clamping
//! - ship-date resolution and date filtering
//! - the yard map grid projection
//!
//! Deterministic, pure logic. No IO. No store calls.

mod location;
mod map;
mod shipdate;
mod status;

pub use location::{clamped_occupancy, default_capacity, is_storage_area, LocationInput};
pub use map::{build_location_map, cell_code, GRID_COLS, GRID_ROWS};
pub use shipdate::{legacy_timestamp_date, resolved_ship_date, ships_on};
pub use status::{
    coil_blocks_readiness, coil_is_shippable, derived_load_code, next_load_status, FINAL_AREA,
    STAGING_AREAS,
};

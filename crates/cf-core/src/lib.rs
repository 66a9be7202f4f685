//! cf-core
//!
//! Orchestration for the inventory tracker. Every operation is an explicit
//! chain over the injected [`cf_store::Store`]:
//!
//! - coil create/update/delete drive location occupancy and re-derive the
//!   owning load's status synchronously;
//! - load mutations re-derive status unless the user set the terminal
//!   `Shipped` override;
//! - location accounting is lazy-create with convention-based default
//!   capacity, clamped occupancy, and an explicit reconcile to correct drift.
//!
//! There is no transaction spanning the coil → location → load chain; a crash
//! mid-chain leaves visible partial state that `reconcile_occupancy` corrects.

mod coils;
mod error;
mod loads;
mod locations;
mod stats;

pub use coils::{create_coil, delete_coil, get_coil, list_coils, update_coil};
pub use error::CoreError;
pub use loads::{
    create_load, delete_load, get_load, list_loads, loads_on_date, recompute_load_status,
    set_load_status, update_load,
};
pub use locations::{
    adjust_occupancy, list_locations, location_map, reconcile_occupancy, set_capacity,
};
pub use stats::stats_overview;

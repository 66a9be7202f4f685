use cf_schemas::{Coil, LoadStatus};

/// Storage area where coils are fully processed and ready to be loaded.
pub const FINAL_AREA: &str = "S3";

/// Staging areas: a coil parked here is by definition not in its final place.
pub const STAGING_AREAS: [&str; 2] = ["S1", "S2"];

/// Derive the next status of a load from its member coils.
///
/// Decision order:
/// 1. `Shipped` is terminal; a manually shipped load is never recomputed.
/// 2. A load with no coils is `Missing`.
/// 3. Any coil in a staging area, or any coil carrying the
///    ready-from-current-location marker, forces `Missing` regardless of the
///    rest of the tally.
/// 4. Otherwise the load is `Ready` iff every coil sits at [`FINAL_AREA`];
///    there is no partial-ready state.
pub fn next_load_status(current: LoadStatus, coils: &[Coil]) -> LoadStatus {
    if current == LoadStatus::Shipped {
        return LoadStatus::Shipped;
    }
    if coils.is_empty() {
        return LoadStatus::Missing;
    }

    let mut all_at_final = true;
    for coil in coils {
        if coil_blocks_readiness(coil) {
            return LoadStatus::Missing;
        }
        if coil.location != FINAL_AREA {
            all_at_final = false;
        }
    }

    if all_at_final {
        LoadStatus::Ready
    } else {
        LoadStatus::Missing
    }
}

/// A coil that disqualifies its load outright: parked in a staging area or
/// individually marked ready-from-current-location.
pub fn coil_blocks_readiness(coil: &Coil) -> bool {
    STAGING_AREAS.contains(&coil.location.as_str()) || coil.is_ready_from_current_location
}

/// Coil-level readiness used by the dashboard counters: at the final area and
/// not carrying the marker.
pub fn coil_is_shippable(coil: &Coil) -> bool {
    coil.location == FINAL_AREA && !coil.is_ready_from_current_location
}

/// Load code generated when a load is auto-created from a coil's order number.
pub fn derived_load_code(order_number: &str) -> String {
    format!("LOAD-{order_number}")
}

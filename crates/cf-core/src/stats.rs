use std::collections::BTreeMap;

use cf_rules::coil_is_shippable;
use cf_schemas::{LoadStatus, LocationStat, StatsOverview};
use cf_store::Store;

use crate::error::CoreError;

/// Dashboard aggregate: entity totals, load counts by status, coil readiness
/// counts, and per-location capacity/occupancy joined with live coil counts.
pub async fn stats_overview(store: &dyn Store) -> Result<StatsOverview, CoreError> {
    let coils = store.list_coils().await?;
    let loads = store.list_loads().await?;
    let locations = store.list_locations().await?;

    let total_coils = coils.len() as i64;
    let total_loads = loads.len() as i64;

    let count_loads = |status: LoadStatus| loads.iter().filter(|l| l.status == status).count() as i64;
    let ready_loads = count_loads(LoadStatus::Ready);
    let missing_loads = count_loads(LoadStatus::Missing);
    let shipped_loads = count_loads(LoadStatus::Shipped);

    let mut coils_by_location: BTreeMap<String, i64> = BTreeMap::new();
    for coil in &coils {
        *coils_by_location.entry(coil.location.clone()).or_insert(0) += 1;
    }

    let location_stats = locations
        .iter()
        .map(|loc| LocationStat {
            location_code: loc.location_code.clone(),
            capacity: loc.capacity,
            occupied: loc.occupied,
            free_space: loc.free_space(),
            coil_count: coils_by_location
                .get(&loc.location_code)
                .copied()
                .unwrap_or(0),
        })
        .collect();

    let ready_coils = coils.iter().filter(|c| coil_is_shippable(c)).count() as i64;
    let missing_coils = total_coils - ready_coils;

    Ok(StatsOverview {
        total_coils,
        total_loads,
        ready_loads,
        missing_loads,
        shipped_loads,
        ready_coils,
        missing_coils,
        location_stats,
        coils_by_location,
    })
}

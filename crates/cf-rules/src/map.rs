use std::collections::BTreeMap;

use cf_schemas::{Coil, LocationMap, LocationMapCell, LocationMapCoil, SpecialAreas};

/// Section-3 main grid: 6 rows deep, 4 bays wide.
pub const GRID_ROWS: u32 = 6;
pub const GRID_COLS: u32 = 4;

/// Overflow row south of the main grid.
const ROW_126: &str = "126";
/// Finished-goods area.
const S3: &str = "S3";
/// Truck reserving area.
const TRUCK: &str = "TRUCK";
/// Overflow staging next to S3.
const S3OS: &str = "S3OS";

/// Bay code for a section-3 grid cell: `3` + two-digit column + two-digit row.
///
/// Columns are numbered 01–04 from the east wall (right to left), rows 01–06
/// from the south wall, so `30302` is the bay in column 3, row 2.
pub fn cell_code(col: u32, row: u32) -> String {
    format!("3{col:02}{row:02}")
}

/// Project the current coil population onto the yard map: the fixed section-3
/// grid plus the four special areas, each cell carrying its member coils.
///
/// `cells` is ordered for display: row 6 (north) first, and west bay (column
/// 4) first within each row.
pub fn build_location_map(coils: &[Coil]) -> LocationMap {
    let mut by_location: BTreeMap<&str, Vec<LocationMapCoil>> = BTreeMap::new();
    for coil in coils {
        by_location
            .entry(coil.location.as_str())
            .or_default()
            .push(LocationMapCoil {
                coil_id: coil.coil_id.clone(),
                status: coil.status,
            });
    }

    let make_cell = |code: String, row: u32, col: u32| {
        let coils = by_location.get(code.as_str()).cloned().unwrap_or_default();
        LocationMapCell {
            coil_count: coils.len(),
            location_code: code,
            coils,
            row,
            col,
        }
    };

    let mut cells = Vec::with_capacity(GRID_ROWS as usize);
    for row in (1..=GRID_ROWS).rev() {
        let mut display_row = Vec::with_capacity(GRID_COLS as usize);
        for col in (1..=GRID_COLS).rev() {
            display_row.push(make_cell(cell_code(col, row), row, col));
        }
        cells.push(display_row);
    }

    let special_areas = SpecialAreas {
        row126: make_cell(ROW_126.to_string(), 0, 0),
        s3: make_cell(S3.to_string(), 0, 0),
        truck_reserving: make_cell(TRUCK.to_string(), 0, 0),
        s3os: make_cell(S3OS.to_string(), 0, 0),
    };

    LocationMap {
        cells,
        special_areas,
    }
}

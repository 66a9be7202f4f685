//! Shared entity and wire types for the CoilFlow plant inventory service.
//!
//! Everything here is plain data: `Serialize + Deserialize`, camelCase on the
//! wire (the dashboard consumes camelCase JSON). No IO, no business logic.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CoilStatus
// ---------------------------------------------------------------------------

/// Processing status of a single coil.
///
/// Wire values are the shorthand the plant floor uses: `NP`, `RTS`, `scrap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoilStatus {
    #[default]
    #[serde(rename = "NP")]
    NotProcessed,
    #[serde(rename = "RTS")]
    ReadyToShip,
    #[serde(rename = "scrap")]
    Scrap,
}

impl CoilStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoilStatus::NotProcessed => "NP",
            CoilStatus::ReadyToShip => "RTS",
            CoilStatus::Scrap => "scrap",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NP" => Some(CoilStatus::NotProcessed),
            "RTS" => Some(CoilStatus::ReadyToShip),
            "scrap" => Some(CoilStatus::Scrap),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// LoadStatus
// ---------------------------------------------------------------------------

/// Shipping readiness of a load.
///
/// `Shipped` is a terminal, user-set override: once a load is Shipped the
/// derivation engine never writes Ready/Missing over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadStatus {
    Ready,
    #[default]
    Missing,
    Shipped,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Ready => "Ready",
            LoadStatus::Missing => "Missing",
            LoadStatus::Shipped => "Shipped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Ready" => Some(LoadStatus::Ready),
            "Missing" => Some(LoadStatus::Missing),
            "Shipped" => Some(LoadStatus::Shipped),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Coil
// ---------------------------------------------------------------------------

/// A coil as stored. `location` is always the bare code: the trailing `*`
/// marker on user input is stripped at the edge and lands in
/// `is_ready_from_current_location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coil {
    pub id: i64,
    /// Unique external coil code (e.g. "C-48213").
    pub coil_id: String,
    pub location: String,
    pub width: f64,
    pub weight: f64,
    pub order_number: Option<String>,
    pub status: CoilStatus,
    pub is_ready_from_current_location: bool,
    /// Owning load, if the coil has been grouped for shipping.
    pub load_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// A shipment grouping of coils sharing an order number.
///
/// `ship_date` is the authoritative calendar date. `truck_time` is the legacy
/// full-timestamp field kept for backward compatibility; it is only consulted
/// when `ship_date` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Load {
    pub id: i64,
    /// Unique external load code (e.g. "LOAD-ORD-9").
    pub load_code: String,
    pub order_number: String,
    pub ship_date: Option<NaiveDate>,
    pub truck_time: Option<String>,
    pub time_to_ship: Option<String>,
    pub client_name: Option<String>,
    pub status: LoadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A named storage slot with finite capacity and an occupancy counter.
///
/// `occupied` is bookkept incrementally as coils move and can drift from the
/// true coil count; the reconcile operation overwrites it from an
/// authoritative count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub location_code: String,
    pub capacity: i32,
    pub occupied: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    pub fn free_space(&self) -> i32 {
        self.capacity - self.occupied
    }
}

// ---------------------------------------------------------------------------
// Relation views
// ---------------------------------------------------------------------------

/// Coil with its owning load embedded (list/detail responses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoilWithLoad {
    #[serde(flatten)]
    pub coil: Coil,
    pub load: Option<Load>,
}

/// Load with its member coils embedded (list/detail responses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadWithCoils {
    #[serde(flatten)]
    pub load: Load,
    pub coils: Vec<Coil>,
}

// ---------------------------------------------------------------------------
// Mutation payloads
// ---------------------------------------------------------------------------

/// Create-coil request body. `location` may carry a trailing `*` marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoil {
    pub coil_id: String,
    pub location: String,
    pub width: f64,
    pub weight: f64,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub status: Option<CoilStatus>,
}

/// Update-coil request body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoil {
    #[serde(default)]
    pub coil_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub status: Option<CoilStatus>,
    #[serde(default)]
    pub is_ready_from_current_location: Option<bool>,
}

/// Create-load request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoad {
    pub load_code: String,
    pub order_number: String,
    #[serde(default)]
    pub ship_date: Option<NaiveDate>,
    #[serde(default)]
    pub truck_time: Option<String>,
    #[serde(default)]
    pub time_to_ship: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
}

/// Update-load request body. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoad {
    #[serde(default)]
    pub load_code: Option<String>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub ship_date: Option<NaiveDate>,
    #[serde(default)]
    pub truck_time: Option<String>,
    #[serde(default)]
    pub time_to_ship: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub status: Option<LoadStatus>,
}

// ---------------------------------------------------------------------------
// Location map projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMapCoil {
    pub coil_id: String,
    pub status: CoilStatus,
}

/// One bay of the yard map. `row`/`col` are the 1-based bay numbers for grid
/// cells and 0 for the special areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMapCell {
    pub location_code: String,
    pub coils: Vec<LocationMapCoil>,
    pub coil_count: usize,
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialAreas {
    pub row126: LocationMapCell,
    pub s3: LocationMapCell,
    pub truck_reserving: LocationMapCell,
    pub s3os: LocationMapCell,
}

/// The full yard projection: the section-3 grid plus the named special areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMap {
    /// 6 rows × 4 columns, ordered for display: north row first, west bay
    /// first within each row.
    pub cells: Vec<Vec<LocationMapCell>>,
    pub special_areas: SpecialAreas,
}

// ---------------------------------------------------------------------------
// Stats overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStat {
    pub location_code: String,
    pub capacity: i32,
    pub occupied: i32,
    pub free_space: i32,
    /// Live count of coil rows at this location (not the bookkept counter).
    pub coil_count: i64,
}

/// Dashboard aggregate returned by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    pub total_coils: i64,
    pub total_loads: i64,
    pub ready_loads: i64,
    pub missing_loads: i64,
    pub shipped_loads: i64,
    pub ready_coils: i64,
    pub missing_coils: i64,
    pub location_stats: Vec<LocationStat>,
    pub coils_by_location: std::collections::BTreeMap<String, i64>,
}

//! cf-store
//!
//! The key-addressed store seam: every orchestration function takes
//! `&dyn Store` so the same logic runs against Postgres in production and the
//! in-memory store in tests. The trait is deliberately dumb (get, list,
//! insert, update, delete) with no business rules behind it.

use async_trait::async_trait;
use cf_schemas::{Coil, CoilStatus, Load, LoadStatus, Location};
use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    /// Backend failure (connection, constraint, decode). Carries full context.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Insert payloads
// ---------------------------------------------------------------------------

/// Coil row to insert. Ids and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewCoil {
    pub coil_id: String,
    pub location: String,
    pub width: f64,
    pub weight: f64,
    pub order_number: Option<String>,
    pub status: CoilStatus,
    pub is_ready_from_current_location: bool,
    pub load_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewLoad {
    pub load_code: String,
    pub order_number: String,
    pub ship_date: Option<NaiveDate>,
    pub truck_time: Option<String>,
    pub time_to_ship: Option<String>,
    pub client_name: Option<String>,
    pub status: LoadStatus,
}

#[derive(Debug, Clone)]
pub struct NewLocation {
    pub location_code: String,
    pub capacity: i32,
    pub occupied: i32,
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Key-addressed relational store for the three inventory entities.
///
/// Contract notes:
/// - `get_*`/`find_*` return `Ok(None)` for a missing key; `update_*` and
///   `delete_*` return [`StoreError::NotFound`] when the id does not exist.
/// - `update_*` persists the full row by id and refreshes `updated_at`.
/// - `delete_load` unlinks member coils (their `load_id` becomes `None`);
///   it never deletes coil rows.
/// - List order is stable: ascending id for coils/loads, ascending code for
///   locations.
#[async_trait]
pub trait Store: Send + Sync {
    // -- coils --------------------------------------------------------------

    async fn list_coils(&self) -> StoreResult<Vec<Coil>>;
    async fn get_coil(&self, id: i64) -> StoreResult<Option<Coil>>;
    async fn insert_coil(&self, new: NewCoil) -> StoreResult<Coil>;
    async fn update_coil(&self, coil: &Coil) -> StoreResult<()>;
    async fn delete_coil(&self, id: i64) -> StoreResult<()>;
    /// Member coils of a load, ascending id.
    async fn coils_for_load(&self, load_id: i64) -> StoreResult<Vec<Coil>>;
    /// Live count of coil rows at a location code (authoritative for
    /// occupancy reconciliation).
    async fn count_coils_at(&self, location_code: &str) -> StoreResult<i64>;

    // -- loads --------------------------------------------------------------

    async fn list_loads(&self) -> StoreResult<Vec<Load>>;
    async fn get_load(&self, id: i64) -> StoreResult<Option<Load>>;
    async fn find_load_by_order(&self, order_number: &str) -> StoreResult<Option<Load>>;
    async fn insert_load(&self, new: NewLoad) -> StoreResult<Load>;
    async fn update_load(&self, load: &Load) -> StoreResult<()>;
    async fn delete_load(&self, id: i64) -> StoreResult<()>;

    // -- locations ----------------------------------------------------------

    async fn list_locations(&self) -> StoreResult<Vec<Location>>;
    async fn find_location(&self, location_code: &str) -> StoreResult<Option<Location>>;
    async fn insert_location(&self, new: NewLocation) -> StoreResult<Location>;
    async fn update_location(&self, location: &Location) -> StoreResult<()>;
}

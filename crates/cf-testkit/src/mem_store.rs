use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use cf_schemas::{Coil, Load, Location};
use cf_store::{NewCoil, NewLoad, NewLocation, Store, StoreError, StoreResult};
use chrono::Utc;

#[derive(Default)]
struct Inner {
    coils: BTreeMap<i64, Coil>,
    loads: BTreeMap<i64, Load>,
    locations: BTreeMap<i64, Location>,
    next_id: i64,
}

impl Inner {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory [`Store`]. BTreeMaps keep list order deterministic (ascending
/// id), matching the SQL `order by id` contract of the Postgres store.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("MemStore lock poisoned")
    }
}

#[async_trait]
impl Store for MemStore {
    // -- coils --------------------------------------------------------------

    async fn list_coils(&self) -> StoreResult<Vec<Coil>> {
        Ok(self.lock().coils.values().cloned().collect())
    }

    async fn get_coil(&self, id: i64) -> StoreResult<Option<Coil>> {
        Ok(self.lock().coils.get(&id).cloned())
    }

    async fn insert_coil(&self, new: NewCoil) -> StoreResult<Coil> {
        let mut inner = self.lock();
        let now = Utc::now();
        let coil = Coil {
            id: inner.assign_id(),
            coil_id: new.coil_id,
            location: new.location,
            width: new.width,
            weight: new.weight,
            order_number: new.order_number,
            status: new.status,
            is_ready_from_current_location: new.is_ready_from_current_location,
            load_id: new.load_id,
            created_at: now,
            updated_at: now,
        };
        inner.coils.insert(coil.id, coil.clone());
        Ok(coil)
    }

    async fn update_coil(&self, coil: &Coil) -> StoreResult<()> {
        let mut inner = self.lock();
        let slot = inner
            .coils
            .get_mut(&coil.id)
            .ok_or_else(|| StoreError::not_found("coil", coil.id))?;
        *slot = Coil {
            updated_at: Utc::now(),
            ..coil.clone()
        };
        Ok(())
    }

    async fn delete_coil(&self, id: i64) -> StoreResult<()> {
        self.lock()
            .coils
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("coil", id))
    }

    async fn coils_for_load(&self, load_id: i64) -> StoreResult<Vec<Coil>> {
        Ok(self
            .lock()
            .coils
            .values()
            .filter(|c| c.load_id == Some(load_id))
            .cloned()
            .collect())
    }

    async fn count_coils_at(&self, location_code: &str) -> StoreResult<i64> {
        Ok(self
            .lock()
            .coils
            .values()
            .filter(|c| c.location == location_code)
            .count() as i64)
    }

    // -- loads --------------------------------------------------------------

    async fn list_loads(&self) -> StoreResult<Vec<Load>> {
        Ok(self.lock().loads.values().cloned().collect())
    }

    async fn get_load(&self, id: i64) -> StoreResult<Option<Load>> {
        Ok(self.lock().loads.get(&id).cloned())
    }

    async fn find_load_by_order(&self, order_number: &str) -> StoreResult<Option<Load>> {
        Ok(self
            .lock()
            .loads
            .values()
            .find(|l| l.order_number == order_number)
            .cloned())
    }

    async fn insert_load(&self, new: NewLoad) -> StoreResult<Load> {
        let mut inner = self.lock();
        let now = Utc::now();
        let load = Load {
            id: inner.assign_id(),
            load_code: new.load_code,
            order_number: new.order_number,
            ship_date: new.ship_date,
            truck_time: new.truck_time,
            time_to_ship: new.time_to_ship,
            client_name: new.client_name,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        inner.loads.insert(load.id, load.clone());
        Ok(load)
    }

    async fn update_load(&self, load: &Load) -> StoreResult<()> {
        let mut inner = self.lock();
        let slot = inner
            .loads
            .get_mut(&load.id)
            .ok_or_else(|| StoreError::not_found("load", load.id))?;
        *slot = Load {
            updated_at: Utc::now(),
            ..load.clone()
        };
        Ok(())
    }

    async fn delete_load(&self, id: i64) -> StoreResult<()> {
        let mut inner = self.lock();
        inner
            .loads
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("load", id))?;
        // Unlink member coils, mirroring the FK's ON DELETE SET NULL.
        for coil in inner.coils.values_mut() {
            if coil.load_id == Some(id) {
                coil.load_id = None;
            }
        }
        Ok(())
    }

    // -- locations ----------------------------------------------------------

    async fn list_locations(&self) -> StoreResult<Vec<Location>> {
        let mut locations: Vec<Location> = self.lock().locations.values().cloned().collect();
        locations.sort_by(|a, b| a.location_code.cmp(&b.location_code));
        Ok(locations)
    }

    async fn find_location(&self, location_code: &str) -> StoreResult<Option<Location>> {
        Ok(self
            .lock()
            .locations
            .values()
            .find(|l| l.location_code == location_code)
            .cloned())
    }

    async fn insert_location(&self, new: NewLocation) -> StoreResult<Location> {
        let mut inner = self.lock();
        let now = Utc::now();
        let location = Location {
            id: inner.assign_id(),
            location_code: new.location_code,
            capacity: new.capacity,
            occupied: new.occupied,
            created_at: now,
            updated_at: now,
        };
        inner.locations.insert(location.id, location.clone());
        Ok(location)
    }

    async fn update_location(&self, location: &Location) -> StoreResult<()> {
        let mut inner = self.lock();
        let slot = inner
            .locations
            .get_mut(&location.id)
            .ok_or_else(|| StoreError::not_found("location", &location.location_code))?;
        *slot = Location {
            updated_at: Utc::now(),
            ..location.clone()
        };
        Ok(())
    }
}

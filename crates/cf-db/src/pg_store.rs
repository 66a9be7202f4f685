use anyhow::Context;
use async_trait::async_trait;
use cf_schemas::{Coil, Load, Location};
use cf_store::{NewCoil, NewLoad, NewLocation, Store, StoreError, StoreResult};
use sqlx::PgPool;

use crate::rows::{coil_from_row, load_from_row, location_from_row};

/// Postgres-backed [`Store`]. One pool, plain `sqlx::query` + binds,
/// `updated_at` refreshed on every update.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const COIL_COLS: &str = r#"
    id, coil_id, location, width, weight, order_number, status,
    is_ready_from_current_location, load_id, created_at, updated_at
"#;

const LOAD_COLS: &str = r#"
    id, load_code, order_number, ship_date, truck_time, time_to_ship,
    client_name, status, created_at, updated_at
"#;

const LOCATION_COLS: &str = r#"
    id, location_code, capacity, occupied, created_at, updated_at
"#;

#[async_trait]
impl Store for PgStore {
    // -- coils --------------------------------------------------------------

    async fn list_coils(&self) -> StoreResult<Vec<Coil>> {
        let rows = sqlx::query(&format!("select {COIL_COLS} from coils order by id"))
            .fetch_all(&self.pool)
            .await
            .context("list_coils query failed")?;
        rows.iter().map(|r| Ok(coil_from_row(r)?)).collect()
    }

    async fn get_coil(&self, id: i64) -> StoreResult<Option<Coil>> {
        let row = sqlx::query(&format!("select {COIL_COLS} from coils where id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("get_coil query failed")?;
        Ok(match row {
            Some(r) => Some(coil_from_row(&r)?),
            None => None,
        })
    }

    async fn insert_coil(&self, new: NewCoil) -> StoreResult<Coil> {
        let row = sqlx::query(&format!(
            r#"
            insert into coils (
              coil_id, location, width, weight, order_number, status,
              is_ready_from_current_location, load_id
            ) values (
              $1, $2, $3, $4, $5, $6, $7, $8
            )
            returning {COIL_COLS}
            "#
        ))
        .bind(&new.coil_id)
        .bind(&new.location)
        .bind(new.width)
        .bind(new.weight)
        .bind(&new.order_number)
        .bind(new.status.as_str())
        .bind(new.is_ready_from_current_location)
        .bind(new.load_id)
        .fetch_one(&self.pool)
        .await
        .context("insert_coil failed")?;
        Ok(coil_from_row(&row)?)
    }

    async fn update_coil(&self, coil: &Coil) -> StoreResult<()> {
        let res = sqlx::query(
            r#"
            update coils
            set coil_id = $2,
                location = $3,
                width = $4,
                weight = $5,
                order_number = $6,
                status = $7,
                is_ready_from_current_location = $8,
                load_id = $9,
                updated_at = now()
            where id = $1
            "#,
        )
        .bind(coil.id)
        .bind(&coil.coil_id)
        .bind(&coil.location)
        .bind(coil.width)
        .bind(coil.weight)
        .bind(&coil.order_number)
        .bind(coil.status.as_str())
        .bind(coil.is_ready_from_current_location)
        .bind(coil.load_id)
        .execute(&self.pool)
        .await
        .context("update_coil failed")?;

        if res.rows_affected() == 0 {
            return Err(StoreError::not_found("coil", coil.id));
        }
        Ok(())
    }

    async fn delete_coil(&self, id: i64) -> StoreResult<()> {
        let res = sqlx::query("delete from coils where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete_coil failed")?;
        if res.rows_affected() == 0 {
            return Err(StoreError::not_found("coil", id));
        }
        Ok(())
    }

    async fn coils_for_load(&self, load_id: i64) -> StoreResult<Vec<Coil>> {
        let rows = sqlx::query(&format!(
            "select {COIL_COLS} from coils where load_id = $1 order by id"
        ))
        .bind(load_id)
        .fetch_all(&self.pool)
        .await
        .context("coils_for_load query failed")?;
        rows.iter().map(|r| Ok(coil_from_row(r)?)).collect()
    }

    async fn count_coils_at(&self, location_code: &str) -> StoreResult<i64> {
        let (n,): (i64,) = sqlx::query_as::<_, (i64,)>(
            "select count(*)::bigint from coils where location = $1",
        )
        .bind(location_code)
        .fetch_one(&self.pool)
        .await
        .context("count_coils_at query failed")?;
        Ok(n)
    }

    // -- loads --------------------------------------------------------------

    async fn list_loads(&self) -> StoreResult<Vec<Load>> {
        let rows = sqlx::query(&format!("select {LOAD_COLS} from loads order by id"))
            .fetch_all(&self.pool)
            .await
            .context("list_loads query failed")?;
        rows.iter().map(|r| Ok(load_from_row(r)?)).collect()
    }

    async fn get_load(&self, id: i64) -> StoreResult<Option<Load>> {
        let row = sqlx::query(&format!("select {LOAD_COLS} from loads where id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("get_load query failed")?;
        Ok(match row {
            Some(r) => Some(load_from_row(&r)?),
            None => None,
        })
    }

    async fn find_load_by_order(&self, order_number: &str) -> StoreResult<Option<Load>> {
        let row = sqlx::query(&format!(
            "select {LOAD_COLS} from loads where order_number = $1"
        ))
        .bind(order_number)
        .fetch_optional(&self.pool)
        .await
        .context("find_load_by_order query failed")?;
        Ok(match row {
            Some(r) => Some(load_from_row(&r)?),
            None => None,
        })
    }

    async fn insert_load(&self, new: NewLoad) -> StoreResult<Load> {
        let row = sqlx::query(&format!(
            r#"
            insert into loads (
              load_code, order_number, ship_date, truck_time, time_to_ship,
              client_name, status
            ) values (
              $1, $2, $3, $4, $5, $6, $7
            )
            returning {LOAD_COLS}
            "#
        ))
        .bind(&new.load_code)
        .bind(&new.order_number)
        .bind(new.ship_date)
        .bind(&new.truck_time)
        .bind(&new.time_to_ship)
        .bind(&new.client_name)
        .bind(new.status.as_str())
        .fetch_one(&self.pool)
        .await
        .context("insert_load failed")?;
        Ok(load_from_row(&row)?)
    }

    async fn update_load(&self, load: &Load) -> StoreResult<()> {
        let res = sqlx::query(
            r#"
            update loads
            set load_code = $2,
                order_number = $3,
                ship_date = $4,
                truck_time = $5,
                time_to_ship = $6,
                client_name = $7,
                status = $8,
                updated_at = now()
            where id = $1
            "#,
        )
        .bind(load.id)
        .bind(&load.load_code)
        .bind(&load.order_number)
        .bind(load.ship_date)
        .bind(&load.truck_time)
        .bind(&load.time_to_ship)
        .bind(&load.client_name)
        .bind(load.status.as_str())
        .execute(&self.pool)
        .await
        .context("update_load failed")?;

        if res.rows_affected() == 0 {
            return Err(StoreError::not_found("load", load.id));
        }
        Ok(())
    }

    async fn delete_load(&self, id: i64) -> StoreResult<()> {
        // Member coils are unlinked by the FK (ON DELETE SET NULL).
        let res = sqlx::query("delete from loads where id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("delete_load failed")?;
        if res.rows_affected() == 0 {
            return Err(StoreError::not_found("load", id));
        }
        Ok(())
    }

    // -- locations ----------------------------------------------------------

    async fn list_locations(&self) -> StoreResult<Vec<Location>> {
        let rows = sqlx::query(&format!(
            "select {LOCATION_COLS} from locations order by location_code"
        ))
        .fetch_all(&self.pool)
        .await
        .context("list_locations query failed")?;
        rows.iter().map(|r| Ok(location_from_row(r)?)).collect()
    }

    async fn find_location(&self, location_code: &str) -> StoreResult<Option<Location>> {
        let row = sqlx::query(&format!(
            "select {LOCATION_COLS} from locations where location_code = $1"
        ))
        .bind(location_code)
        .fetch_optional(&self.pool)
        .await
        .context("find_location query failed")?;
        Ok(match row {
            Some(r) => Some(location_from_row(&r)?),
            None => None,
        })
    }

    async fn insert_location(&self, new: NewLocation) -> StoreResult<Location> {
        let row = sqlx::query(&format!(
            r#"
            insert into locations (location_code, capacity, occupied)
            values ($1, $2, $3)
            returning {LOCATION_COLS}
            "#
        ))
        .bind(&new.location_code)
        .bind(new.capacity)
        .bind(new.occupied)
        .fetch_one(&self.pool)
        .await
        .context("insert_location failed")?;
        Ok(location_from_row(&row)?)
    }

    async fn update_location(&self, location: &Location) -> StoreResult<()> {
        let res = sqlx::query(
            r#"
            update locations
            set capacity = $2,
                occupied = $3,
                updated_at = now()
            where id = $1
            "#,
        )
        .bind(location.id)
        .bind(location.capacity)
        .bind(location.occupied)
        .execute(&self.pool)
        .await
        .context("update_location failed")?;

        if res.rows_affected() == 0 {
            return Err(StoreError::not_found("location", &location.location_code));
        }
        Ok(())
    }
}

//! Axum router and all HTTP handlers for cf-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers. All handlers are `pub(crate)` so the scenario tests in
//! `tests/` can compose the router directly.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use cf_schemas::{CreateCoil, CreateLoad, UpdateCoil, UpdateLoad};
use chrono::{Days, Local};
use tracing::info;

use crate::{
    api_types::{ApiError, CapacityUpdate, HealthResponse, LocationResponse, StatusOverride},
    state::AppState,
};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here; `main.rs`
/// attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/coils", get(list_coils).post(create_coil))
        .route(
            "/v1/coils/:id",
            get(get_coil).put(update_coil).delete(delete_coil),
        )
        .route("/v1/loads", get(list_loads).post(create_load))
        .route(
            "/v1/loads/:id",
            get(get_load).put(update_load).delete(delete_load),
        )
        .route("/v1/loads/:id/status", put(set_load_status))
        .route("/v1/loads/today/list", get(loads_today))
        .route("/v1/loads/tomorrow/list", get(loads_tomorrow))
        .route("/v1/locations", get(list_locations))
        .route("/v1/locations/map", get(location_map))
        .route("/v1/locations/:code", put(set_capacity))
        .route("/v1/stats/overview", get(stats_overview))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
        }),
    )
}

// ---------------------------------------------------------------------------
// Coils
// ---------------------------------------------------------------------------

pub(crate) async fn list_coils(
    State(st): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let coils = cf_core::list_coils(st.store.as_ref()).await?;
    Ok(Json(coils))
}

pub(crate) async fn get_coil(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let coil = cf_core::get_coil(st.store.as_ref(), id).await?;
    Ok(Json(coil))
}

pub(crate) async fn create_coil(
    State(st): State<Arc<AppState>>,
    Json(input): Json<CreateCoil>,
) -> Result<impl IntoResponse, ApiError> {
    let coil = cf_core::create_coil(st.store.as_ref(), input).await?;
    info!(coil_id = %coil.coil.coil_id, location = %coil.coil.location, "coil created");
    Ok((StatusCode::CREATED, Json(coil)))
}

pub(crate) async fn update_coil(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<UpdateCoil>,
) -> Result<impl IntoResponse, ApiError> {
    let coil = cf_core::update_coil(st.store.as_ref(), id, patch).await?;
    Ok(Json(coil))
}

pub(crate) async fn delete_coil(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    cf_core::delete_coil(st.store.as_ref(), id).await?;
    info!(id, "coil deleted");
    Ok(StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Loads
// ---------------------------------------------------------------------------

pub(crate) async fn list_loads(
    State(st): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let loads = cf_core::list_loads(st.store.as_ref()).await?;
    Ok(Json(loads))
}

pub(crate) async fn get_load(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let load = cf_core::get_load(st.store.as_ref(), id).await?;
    Ok(Json(load))
}

pub(crate) async fn create_load(
    State(st): State<Arc<AppState>>,
    Json(input): Json<CreateLoad>,
) -> Result<impl IntoResponse, ApiError> {
    let load = cf_core::create_load(st.store.as_ref(), input).await?;
    info!(load_code = %load.load.load_code, "load created");
    Ok((StatusCode::CREATED, Json(load)))
}

pub(crate) async fn update_load(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<UpdateLoad>,
) -> Result<impl IntoResponse, ApiError> {
    let load = cf_core::update_load(st.store.as_ref(), id, patch).await?;
    Ok(Json(load))
}

pub(crate) async fn set_load_status(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<StatusOverride>,
) -> Result<impl IntoResponse, ApiError> {
    let load = cf_core::set_load_status(st.store.as_ref(), id, body.status).await?;
    info!(id, status = body.status.as_str(), "load status overridden");
    Ok(Json(load))
}

pub(crate) async fn delete_load(
    State(st): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    cf_core::delete_load(st.store.as_ref(), id).await?;
    info!(id, "load deleted");
    Ok(StatusCode::OK)
}

pub(crate) async fn loads_today(
    State(st): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let today = Local::now().date_naive();
    let loads = cf_core::loads_on_date(st.store.as_ref(), today).await?;
    Ok(Json(loads))
}

pub(crate) async fn loads_tomorrow(
    State(st): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let tomorrow = Local::now().date_naive() + Days::new(1);
    let loads = cf_core::loads_on_date(st.store.as_ref(), tomorrow).await?;
    Ok(Json(loads))
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

pub(crate) async fn list_locations(
    State(st): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let locations = cf_core::list_locations(st.store.as_ref()).await?;
    let body: Vec<LocationResponse> = locations.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

pub(crate) async fn location_map(
    State(st): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let map = cf_core::location_map(st.store.as_ref()).await?;
    Ok(Json(map))
}

pub(crate) async fn set_capacity(
    State(st): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(body): Json<CapacityUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let location = cf_core::set_capacity(st.store.as_ref(), &code, body.capacity).await?;
    info!(code = %code, capacity = body.capacity, "location capacity updated");
    Ok(Json(LocationResponse::from(location)))
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

pub(crate) async fn stats_overview(
    State(st): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = cf_core::stats_overview(st.store.as_ref()).await?;
    Ok(Json(stats))
}

//! In-process scenario tests for cf-daemon HTTP endpoints.
//!
//! These tests spin up the Axum router **without** binding a TCP socket.
//! Each test calls `routes::build_router` over an in-memory store and drives
//! it via `tower::ServiceExt::oneshot`; no network IO, no Postgres.

use std::sync::Arc;

use axum::http::{Request, StatusCode};
use cf_daemon::{routes, state};
use cf_testkit::MemStore;
use http_body_util::BodyExt;
use tower::ServiceExt; // oneshot

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fresh shared state backed by a clean in-memory store.
fn make_state() -> Arc<state::AppState> {
    Arc::new(state::AppState::new(Arc::new(MemStore::new())))
}

/// Drive the router with a single request and return (status, body_bytes).
async fn call(
    st: &Arc<state::AppState>,
    req: Request<axum::body::Body>,
) -> (StatusCode, bytes::Bytes) {
    let resp = routes::build_router(Arc::clone(st))
        .oneshot(req)
        .await
        .expect("oneshot failed");
    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .expect("body collect failed")
        .to_bytes();
    (status, body)
}

fn get(uri: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<axum::body::Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}

fn json(method: &str, uri: &str, body: serde_json::Value) -> Request<axum::body::Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

fn parse_json(b: bytes::Bytes) -> serde_json::Value {
    serde_json::from_slice(&b).expect("body is not valid JSON")
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_200_ok_true() {
    let st = make_state();
    let (status, body) = call(&st, get("/v1/health")).await;
    assert_eq!(status, StatusCode::OK);

    let json = parse_json(body);
    assert_eq!(json["ok"], true);
    assert_eq!(json["service"], "cf-daemon");
}

// ---------------------------------------------------------------------------
// Coil CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn coil_create_returns_201_with_stripped_location() {
    let st = make_state();
    let (status, body) = call(
        &st,
        json(
            "POST",
            "/v1/coils",
            serde_json::json!({
                "coilId": "COIL-1",
                "location": "S1*",
                "width": 200.0,
                "weight": 100.0,
                "orderNumber": "ORD-9"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let coil = parse_json(body);
    assert_eq!(coil["location"], "S1");
    assert_eq!(coil["isReadyFromCurrentLocation"], true);
    assert_eq!(coil["load"]["loadCode"], "LOAD-ORD-9");
    assert_eq!(coil["load"]["status"], "Missing");
}

#[tokio::test]
async fn coil_list_embeds_the_load_relation() {
    let st = make_state();
    let _ = call(
        &st,
        json(
            "POST",
            "/v1/coils",
            serde_json::json!({
                "coilId": "COIL-1",
                "location": "S3",
                "width": 100.0,
                "weight": 50.0,
                "orderNumber": "ORD-1"
            }),
        ),
    )
    .await;

    let (status, body) = call(&st, get("/v1/coils")).await;
    assert_eq!(status, StatusCode::OK);

    let coils = parse_json(body);
    assert_eq!(coils.as_array().unwrap().len(), 1);
    assert_eq!(coils[0]["coilId"], "COIL-1");
    assert_eq!(coils[0]["load"]["orderNumber"], "ORD-1");
}

#[tokio::test]
async fn coil_update_and_delete_roundtrip() {
    let st = make_state();
    let (_, body) = call(
        &st,
        json(
            "POST",
            "/v1/coils",
            serde_json::json!({
                "coilId": "COIL-1",
                "location": "S1",
                "width": 100.0,
                "weight": 50.0
            }),
        ),
    )
    .await;
    let id = parse_json(body)["id"].as_i64().expect("id");

    let (status, body) = call(
        &st,
        json(
            "PUT",
            &format!("/v1/coils/{id}"),
            serde_json::json!({ "location": "S3", "status": "RTS" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = parse_json(body);
    assert_eq!(updated["location"], "S3");
    assert_eq!(updated["status"], "RTS");

    let (status, _) = call(&st, delete(&format!("/v1/coils/{id}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&st, get(&format!("/v1/coils/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn coil_validation_failure_is_400() {
    let st = make_state();
    let (status, body) = call(
        &st,
        json(
            "POST",
            "/v1/coils",
            serde_json::json!({
                "coilId": "",
                "location": "S1",
                "width": 100.0,
                "weight": 50.0
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json = parse_json(body);
    assert!(
        json["error"].as_str().unwrap_or("").contains("coilId"),
        "body should name the offending field: {json}"
    );
}

#[tokio::test]
async fn unknown_coil_id_is_404() {
    let st = make_state();
    let (status, body) = call(&st, get("/v1/coils/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json = parse_json(body);
    assert!(json["error"].as_str().unwrap_or("").contains("999"));
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn locations_report_capacity_defaults_and_free_space() {
    let st = make_state();
    let _ = call(
        &st,
        json(
            "POST",
            "/v1/coils",
            serde_json::json!({
                "coilId": "COIL-1",
                "location": "S1",
                "width": 100.0,
                "weight": 50.0
            }),
        ),
    )
    .await;

    let (status, body) = call(&st, get("/v1/locations")).await;
    assert_eq!(status, StatusCode::OK);
    let locations = parse_json(body);
    assert_eq!(locations[0]["locationCode"], "S1");
    assert_eq!(locations[0]["capacity"], 50);
    assert_eq!(locations[0]["occupied"], 1);
    assert_eq!(locations[0]["freeSpace"], 49);
}

#[tokio::test]
async fn capacity_update_via_put() {
    let st = make_state();
    let (status, body) = call(
        &st,
        json(
            "PUT",
            "/v1/locations/S2",
            serde_json::json!({ "capacity": 80 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let loc = parse_json(body);
    assert_eq!(loc["locationCode"], "S2");
    assert_eq!(loc["capacity"], 80);

    let (status, body) = call(
        &st,
        json(
            "PUT",
            "/v1/locations/S2",
            serde_json::json!({ "capacity": -5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(parse_json(body)["error"]
        .as_str()
        .unwrap_or("")
        .contains("capacity"));
}

#[tokio::test]
async fn location_map_has_grid_and_special_areas() {
    let st = make_state();
    let _ = call(
        &st,
        json(
            "POST",
            "/v1/coils",
            serde_json::json!({
                "coilId": "COIL-1",
                "location": "30302",
                "width": 100.0,
                "weight": 50.0
            }),
        ),
    )
    .await;

    let (status, body) = call(&st, get("/v1/locations/map")).await;
    assert_eq!(status, StatusCode::OK);
    let map = parse_json(body);

    let cells = map["cells"].as_array().expect("cells");
    assert_eq!(cells.len(), 6);
    assert_eq!(cells[0].as_array().unwrap().len(), 4);

    let bay = cells
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .find(|c| c["locationCode"] == "30302")
        .expect("bay 30302 present");
    assert_eq!(bay["coilCount"], 1);
    assert_eq!(bay["coils"][0]["coilId"], "COIL-1");

    assert_eq!(map["specialAreas"]["s3"]["locationCode"], "S3");
    assert_eq!(map["specialAreas"]["row126"]["locationCode"], "126");
    assert_eq!(map["specialAreas"]["truckReserving"]["coilCount"], 0);
    assert_eq!(map["specialAreas"]["s3os"]["coilCount"], 0);
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stats_overview_reports_totals() {
    let st = make_state();
    let _ = call(
        &st,
        json(
            "POST",
            "/v1/coils",
            serde_json::json!({
                "coilId": "COIL-1",
                "location": "S3",
                "width": 100.0,
                "weight": 50.0,
                "orderNumber": "ORD-1"
            }),
        ),
    )
    .await;

    let (status, body) = call(&st, get("/v1/stats/overview")).await;
    assert_eq!(status, StatusCode::OK);
    let stats = parse_json(body);
    assert_eq!(stats["totalCoils"], 1);
    assert_eq!(stats["totalLoads"], 1);
    assert_eq!(stats["readyLoads"], 1);
    assert_eq!(stats["readyCoils"], 1);
    assert_eq!(stats["coilsByLocation"]["S3"], 1);
}

// ---------------------------------------------------------------------------
// Unknown routes return 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let st = make_state();
    let (status, _) = call(&st, get("/v1/does_not_exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//! End-to-end coil lifecycle scenarios against the in-memory store:
//! auto-load creation, marker handling, and synchronous status re-derivation.

use cf_core::{create_coil, delete_coil, get_load, set_load_status, update_coil, CoreError};
use cf_schemas::{CreateCoil, LoadStatus, UpdateCoil};
use cf_testkit::MemStore;

fn coil_input(coil_id: &str, location: &str, order: Option<&str>) -> CreateCoil {
    CreateCoil {
        coil_id: coil_id.to_string(),
        location: location.to_string(),
        width: 200.0,
        weight: 100.0,
        order_number: order.map(str::to_string),
        status: None,
    }
}

#[tokio::test]
async fn creating_a_marked_coil_auto_creates_a_missing_load() {
    let store = MemStore::new();

    let created = create_coil(&store, coil_input("COIL-1", "S1*", Some("ORD-9")))
        .await
        .expect("create");

    // Marker stripped, flag set.
    assert_eq!(created.coil.location, "S1");
    assert!(created.coil.is_ready_from_current_location);

    // Load auto-created with the derived code; staging/marker rule => Missing.
    let load = created.load.expect("load linked");
    assert_eq!(load.load_code, "LOAD-ORD-9");
    assert_eq!(load.order_number, "ORD-9");
    assert_eq!(load.status, LoadStatus::Missing);
}

#[tokio::test]
async fn unmarked_create_leaves_flag_false() {
    let store = MemStore::new();
    let created = create_coil(&store, coil_input("COIL-1", "30302", None))
        .await
        .expect("create");
    assert_eq!(created.coil.location, "30302");
    assert!(!created.coil.is_ready_from_current_location);
    assert!(created.load.is_none());
}

#[tokio::test]
async fn two_coils_at_final_area_make_the_load_ready() {
    let store = MemStore::new();

    let first = create_coil(&store, coil_input("COIL-1", "S3", Some("ORD-1")))
        .await
        .expect("create first");
    let load_id = first.load.expect("load").id;

    create_coil(&store, coil_input("COIL-2", "S3", Some("ORD-1")))
        .await
        .expect("create second");

    let load = get_load(&store, load_id).await.expect("load");
    assert_eq!(load.coils.len(), 2);
    assert_eq!(load.load.status, LoadStatus::Ready);
}

#[tokio::test]
async fn moving_a_coil_to_staging_flips_the_load_back_to_missing() {
    let store = MemStore::new();

    let first = create_coil(&store, coil_input("COIL-1", "S3", Some("ORD-1")))
        .await
        .expect("create");
    let load = first.load.expect("load");
    let load_id = load.id;
    assert_eq!(load.status, LoadStatus::Ready);

    update_coil(
        &store,
        first.coil.id,
        UpdateCoil {
            location: Some("S2".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("update");

    let load = get_load(&store, load_id).await.expect("load");
    assert_eq!(load.load.status, LoadStatus::Missing);
}

#[tokio::test]
async fn marker_on_update_disqualifies_an_otherwise_ready_load() {
    let store = MemStore::new();

    let created = create_coil(&store, coil_input("COIL-1", "S3", Some("ORD-1")))
        .await
        .expect("create");
    let load_id = created.load.expect("load").id;

    // Same bay, but now explicitly marked ready-from-current-location.
    let updated = update_coil(
        &store,
        created.coil.id,
        UpdateCoil {
            location: Some("S3*".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("update");
    assert!(updated.coil.is_ready_from_current_location);

    let load = get_load(&store, load_id).await.expect("load");
    assert_eq!(load.load.status, LoadStatus::Missing);
}

#[tokio::test]
async fn deleting_the_last_coil_empties_the_load_to_missing() {
    let store = MemStore::new();

    let created = create_coil(&store, coil_input("COIL-1", "S3", Some("ORD-1")))
        .await
        .expect("create");
    let load_id = created.load.expect("load").id;
    assert_eq!(
        get_load(&store, load_id).await.unwrap().load.status,
        LoadStatus::Ready
    );

    delete_coil(&store, created.coil.id).await.expect("delete");

    let load = get_load(&store, load_id).await.expect("load survives");
    assert!(load.coils.is_empty());
    assert_eq!(load.load.status, LoadStatus::Missing);
}

#[tokio::test]
async fn shipped_override_survives_coil_mutations() {
    let store = MemStore::new();

    let created = create_coil(&store, coil_input("COIL-1", "S3", Some("ORD-1")))
        .await
        .expect("create");
    let load_id = created.load.expect("load").id;

    set_load_status(&store, load_id, LoadStatus::Shipped)
        .await
        .expect("ship");

    // Mutate the member coil every which way; Shipped must stick.
    update_coil(
        &store,
        created.coil.id,
        UpdateCoil {
            location: Some("S1".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("move");
    assert_eq!(
        get_load(&store, load_id).await.unwrap().load.status,
        LoadStatus::Shipped
    );

    delete_coil(&store, created.coil.id).await.expect("delete");
    assert_eq!(
        get_load(&store, load_id).await.unwrap().load.status,
        LoadStatus::Shipped
    );
}

#[tokio::test]
async fn second_coil_reuses_the_existing_load() {
    let store = MemStore::new();

    let first = create_coil(&store, coil_input("COIL-1", "S1", Some("ORD-7")))
        .await
        .expect("create first");
    let second = create_coil(&store, coil_input("COIL-2", "S2", Some("ORD-7")))
        .await
        .expect("create second");

    assert_eq!(
        first.load.as_ref().unwrap().id,
        second.load.as_ref().unwrap().id
    );
}

#[tokio::test]
async fn missing_ids_surface_not_found() {
    let store = MemStore::new();

    let err = delete_coil(&store, 999).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }), "got {err:?}");

    let err = update_coil(&store, 999, UpdateCoil::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn empty_required_fields_are_rejected_before_any_write() {
    let store = MemStore::new();

    let err = create_coil(&store, coil_input("", "S3", Some("ORD-1")))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)), "got {err:?}");

    // A bare "*" strips to an empty location code.
    let err = create_coil(&store, coil_input("COIL-1", "*", None))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)), "got {err:?}");

    // Nothing was written: no coils, no loads, no locations.
    assert!(cf_core::list_coils(&store).await.unwrap().is_empty());
    assert!(cf_core::list_loads(&store).await.unwrap().is_empty());
    assert!(cf_core::list_locations(&store).await.unwrap().is_empty());
}

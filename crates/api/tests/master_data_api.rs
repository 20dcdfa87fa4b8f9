//! HTTP-level tests for complexity levels, screen types and hour mappings.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, id_by_name, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Complexity levels / screen types
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_complexities_returns_seeded_levels(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/complexities").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Simple", "Medium", "Complex"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_complexity_trims_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/complexities",
        json!({"name": "  Very Complex ", "hours": 24, "description": "Edge of feasible"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Very Complex");
    assert_eq!(json["hours"], 24);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_positive_hours_rejected(pool: PgPool) {
    for hours in [0, -4] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/screen-types",
            json!({"name": "Wizard", "hours": hours}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_name_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/complexities", json!({"name": "   ", "hours": 2})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_screen_type_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/screen-types", json!({"name": "Static", "hours": 1})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rename_screen_type_keeps_matrix_consistent(pool: PgPool) {
    let dynamic_id = id_by_name(&pool, "screen-types", "Dynamic").await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/screen-types/{dynamic_id}"),
        json!({"name": "Interactive"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Interactive");

    let app = common::build_test_app(pool);
    let json = body_json(
        get(
            app,
            "/api/v1/hour-mappings/lookup?complexity=Medium&screen_type=Interactive",
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["hours"], 12);
    assert_eq!(json["data"]["mapped"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_complexity_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/complexities/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_unreferenced_complexity(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(app, "/api/v1/complexities", json!({"name": "Trivial", "hours": 1})).await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/complexities/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/complexities/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Hour mappings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_unmapped_pair(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(
        app,
        "/api/v1/hour-mappings/lookup?complexity=Complex&screen_type=Legacy",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["hours"].is_null());
    assert_eq!(json["data"]["mapped"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_mapping_overwrites_hours(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/v1/hour-mappings",
        json!({"complexity_name": "Medium", "screen_type_name": "Dynamic", "hours": 14}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["hours"], 14);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/hour-mappings").await).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 9);
    let cell = rows
        .iter()
        .find(|r| r["complexity_name"] == "Medium" && r["screen_type_name"] == "Dynamic")
        .unwrap();
    assert_eq!(cell["hours"], 14);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_mapping_for_unknown_level_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/hour-mappings",
        json!({"complexity_name": "Complex", "screen_type_name": "Legacy", "hours": 10}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_mapping_negative_hours_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/hour-mappings",
        json!({"complexity_name": "Simple", "screen_type_name": "Static", "hours": -1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn matrix_has_every_pair(pool: PgPool) {
    // A level with no mappings shows up as a row of nulls.
    let app = common::build_test_app(pool.clone());
    post_json(app, "/api/v1/complexities", json!({"name": "Extreme", "hours": 40})).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/hour-mappings/matrix").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["complexities"].as_array().unwrap().len(), 4);
    assert_eq!(data["screen_types"].as_array().unwrap().len(), 3);

    let rows = data["rows"].as_array().unwrap();
    let medium = rows.iter().find(|r| r["complexity"] == "Medium").unwrap();
    let dynamic = medium["cells"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["screen_type"] == "Dynamic")
        .unwrap();
    assert_eq!(dynamic["hours"], 12);

    let extreme = rows.iter().find(|r| r["complexity"] == "Extreme").unwrap();
    assert!(extreme["cells"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["hours"].is_null()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_mapping(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let rows = body_json(get(app, "/api/v1/hour-mappings").await).await;
    let id = rows[0]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/hour-mappings/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/hour-mappings/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lookup_without_screen_type_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/hour-mappings/lookup?complexity=Medium").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_complexity_without_hours_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/complexities", json!({"name": "Huge"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

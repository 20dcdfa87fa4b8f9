//! Integration tests for the estimation record store.
//!
//! Covers the atomic header+details write, rollback on a failing detail
//! row, and the calculated-hours snapshot surviving later mapping edits.

use assert_matches::assert_matches;
use estimator_db::models::estimation::{NewEstimation, NewEstimationDetail};
use estimator_db::models::hour_mapping::UpsertHourMapping;
use estimator_db::models::project::CreateProject;
use estimator_db::models::screen::CreateScreen;
use estimator_db::repositories::{
    ComplexityRepo, EstimationRepo, HourMappingRepo, ProjectRepo, ScreenRepo, ScreenTypeRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// IDs of a project with two screens plus the seeded Medium / Dynamic levels.
struct Fixture {
    project_id: i64,
    screen_ids: [i64; 2],
    medium_id: i64,
    dynamic_id: i64,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: "Storefront".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    let mut screen_ids = [0; 2];
    for (slot, name) in screen_ids.iter_mut().zip(["Login", "Checkout"]) {
        let screen = ScreenRepo::create(
            pool,
            project.id,
            &CreateScreen {
                name: name.to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
        *slot = screen.id;
    }

    let medium_id = ComplexityRepo::list(pool)
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.name == "Medium")
        .expect("seeded Medium complexity")
        .id;
    let dynamic_id = ScreenTypeRepo::list(pool)
        .await
        .unwrap()
        .into_iter()
        .find(|s| s.name == "Dynamic")
        .expect("seeded Dynamic screen type")
        .id;

    Fixture {
        project_id: project.id,
        screen_ids,
        medium_id,
        dynamic_id,
    }
}

fn header(project_id: i64, version: &str, total_hours: i64) -> NewEstimation {
    NewEstimation {
        project_id,
        name: "Phase 1".to_string(),
        version_number: version.to_string(),
        total_hours,
        notes: Some("first pass".to_string()),
        created_by: Some("estimator@example.com".to_string()),
    }
}

fn line(f: &Fixture, screen_id: i64, hours: i32) -> NewEstimationDetail {
    NewEstimationDetail {
        screen_id,
        complexity_id: f.medium_id,
        screen_type_id: f.dynamic_id,
        calculated_hours: hours,
    }
}

async fn estimation_count(pool: &PgPool, project_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM estimations WHERE project_id = $1")
        .bind(project_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_persists_header_and_details(pool: PgPool) {
    let f = fixture(&pool).await;
    let details = [line(&f, f.screen_ids[0], 12), line(&f, f.screen_ids[1], 12)];

    let estimation = EstimationRepo::create(&pool, &header(f.project_id, "1.0", 24), &details)
        .await
        .unwrap();

    assert_eq!(estimation.total_hours, 24);
    assert_eq!(estimation.version_number, "1.0");

    let stored = EstimationRepo::list_details(&pool, estimation.id).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].line_number, 1);
    assert_eq!(stored[0].screen_name, "Login");
    assert_eq!(stored[1].screen_name, "Checkout");
    assert_eq!(stored[1].complexity_name, "Medium");
    assert_eq!(stored[1].screen_type_name, "Dynamic");
    let sum: i64 = stored.iter().map(|d| i64::from(d.calculated_hours)).sum();
    assert_eq!(sum, estimation.total_hours);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failing_detail_rolls_back_header(pool: PgPool) {
    let f = fixture(&pool).await;
    // Second row references a screen that does not exist.
    let details = [line(&f, f.screen_ids[0], 12), line(&f, 9_999_999, 12)];

    let err = EstimationRepo::create(&pool, &header(f.project_id, "1.0", 24), &details)
        .await
        .unwrap_err();

    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503"));
    assert_eq!(estimation_count(&pool, f.project_id).await, 0);
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM estimation_details")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_project_is_rejected(pool: PgPool) {
    let f = fixture(&pool).await;
    let err = EstimationRepo::create(&pool, &header(9_999_999, "1.0", 12), &[line(&f, f.screen_ids[0], 12)])
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_total_violates_check(pool: PgPool) {
    let f = fixture(&pool).await;
    let err = EstimationRepo::create(&pool, &header(f.project_id, "1.0", -1), &[])
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23514"));
    assert_eq!(estimation_count(&pool, f.project_id).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_version_is_unique_violation(pool: PgPool) {
    let f = fixture(&pool).await;
    let details = [line(&f, f.screen_ids[0], 12)];
    EstimationRepo::create(&pool, &header(f.project_id, "1.0", 12), &details)
        .await
        .unwrap();

    let err = EstimationRepo::create(&pool, &header(f.project_id, "1.0", 12), &details)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(ref db)
            if db.constraint() == Some("uq_estimations_project_id_name_version")
    );

    // A new version of the same estimation is fine.
    EstimationRepo::create(&pool, &header(f.project_id, "1.1", 12), &details)
        .await
        .unwrap();
    assert_eq!(estimation_count(&pool, f.project_id).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mapping_change_does_not_alter_existing_details(pool: PgPool) {
    let f = fixture(&pool).await;
    let estimation = EstimationRepo::create(
        &pool,
        &header(f.project_id, "1.0", 12),
        &[line(&f, f.screen_ids[0], 12)],
    )
    .await
    .unwrap();

    HourMappingRepo::upsert(
        &pool,
        &UpsertHourMapping {
            complexity_name: "Medium".to_string(),
            screen_type_name: "Dynamic".to_string(),
            hours: 20,
        },
    )
    .await
    .unwrap();

    let details = EstimationRepo::list_details(&pool, estimation.id).await.unwrap();
    assert_eq!(details[0].calculated_hours, 12);
    let reloaded = EstimationRepo::find_by_id(&pool, estimation.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.total_hours, 12);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_project_and_pagination(pool: PgPool) {
    let f = fixture(&pool).await;
    let details = [line(&f, f.screen_ids[0], 12)];
    for version in ["1", "2", "3"] {
        EstimationRepo::create(&pool, &header(f.project_id, version, 12), &details)
            .await
            .unwrap();
    }

    let by_project = EstimationRepo::list_by_project(&pool, f.project_id).await.unwrap();
    assert_eq!(by_project.len(), 3);
    assert_eq!(by_project[0].version_number, "3");

    let page = EstimationRepo::list(&pool, 2, 1).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].version_number, "2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn referenced_rows_block_deletion(pool: PgPool) {
    let f = fixture(&pool).await;
    EstimationRepo::create(
        &pool,
        &header(f.project_id, "1.0", 12),
        &[line(&f, f.screen_ids[0], 12)],
    )
    .await
    .unwrap();

    assert!(ScreenRepo::is_referenced(&pool, f.screen_ids[0]).await.unwrap());
    assert!(!ScreenRepo::is_referenced(&pool, f.screen_ids[1]).await.unwrap());
    assert!(ComplexityRepo::is_referenced(&pool, f.medium_id).await.unwrap());
    assert!(ScreenTypeRepo::is_referenced(&pool, f.dynamic_id).await.unwrap());
    assert!(ProjectRepo::has_estimations(&pool, f.project_id).await.unwrap());

    let err = ComplexityRepo::delete(&pool, f.medium_id).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503"));
}

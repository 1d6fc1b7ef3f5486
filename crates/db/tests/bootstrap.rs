mod common;

use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    shelfsight_db::health_check(&pool).await.unwrap();

    let tables = [
        "profiles",
        "sessions",
        "stores",
        "planograms",
        "shelves",
        "tasks",
        "verifications",
        "analysis_points",
        "report_templates",
        "reports",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 >= 0, "{table} should exist");
    }
}

/// Report templates are seeded by the migrations.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_templates_seeded(pool: PgPool) {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM report_templates")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(count.0 > 0, "report_templates should have seed data");
}

/// The planogram default slot count matches the standard display unit.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_planogram_default_slots(pool: PgPool) {
    common::seed_shelf(&pool).await;
    let slots: (i32,) = sqlx::query_as("SELECT slots_per_tray FROM planograms LIMIT 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(slots.0, 23);
}

use sqlx::PgPool;

/// Connect, migrate and verify the lookup tables are seeded.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    marketplace_db::health_check(&pool).await.unwrap();

    for (table, expected) in [("ad_states", 3), ("reservation_statuses", 2)] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, expected, "{table} seed rows");
    }
}

/// Seeded names line up with the ids the application enums use.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lookup_ids_match_enums(pool: PgPool) {
    use marketplace_core::ad::AdState;
    use marketplace_core::reservation::ReservationStatus;

    for (state, name) in [
        (AdState::Draft, "draft"),
        (AdState::Published, "published"),
        (AdState::Unpublished, "unpublished"),
    ] {
        let row: (String,) = sqlx::query_as("SELECT name FROM ad_states WHERE id = $1")
            .bind(state.id())
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.0, name);
    }

    for (status, name) in [
        (ReservationStatus::Active, "active"),
        (ReservationStatus::Cancelled, "cancelled"),
    ] {
        let row: (String,) = sqlx::query_as("SELECT name FROM reservation_statuses WHERE id = $1")
            .bind(status.id())
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(row.0, name);
    }
}

use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    kusina_db::health_check(&pool).await.unwrap();

    // Verify the roles table carries the four seeded roles.
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM roles")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 4, "roles should be seeded");

    for role in kusina_core::roles::VALID_ROLES {
        let found: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM roles WHERE name = $1")
            .bind(role)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(found.0, 1, "role '{role}' should be seeded exactly once");
    }
}

/// Verify the entity tables exist with their aggregate columns.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_entity_tables_exist(pool: PgPool) {
    for table in ["municipalities", "dishes", "restaurants", "ratings", "favorites"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and start empty");
    }
}

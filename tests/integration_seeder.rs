use prepdesk::cli::seeder::seed_database;
use sqlx::PgPool;

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seed_creates_complete_dataset(pool: PgPool) {
    seed_database(&pool, 2, 4, 3, 2).await.unwrap();

    assert_eq!(count(&pool, "users").await, 2);
    assert_eq!(count(&pool, "curators").await, 2);
    assert_eq!(count(&pool, "students").await, 4);
    assert_eq!(count(&pool, "teachers").await, 3);
    assert_eq!(count(&pool, "group_sessions").await, 2);
    // At least one review per teacher.
    assert!(count(&pool, "reviews").await >= 3);

    // Teachers must satisfy the unique NOT NULL contact columns.
    let blank_contacts: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM teachers WHERE phone = '' OR email = ''",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(blank_contacts, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seed_is_rerunnable_for_logins(pool: PgPool) {
    seed_database(&pool, 1, 0, 0, 0).await.unwrap();
    seed_database(&pool, 0, 0, 0, 0).await.unwrap();

    assert_eq!(count(&pool, "users").await, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_seed_refuses_students_without_curators(pool: PgPool) {
    let result = seed_database(&pool, 0, 5, 0, 0).await;

    assert!(result.is_err());
    assert_eq!(count(&pool, "students").await, 0);
}

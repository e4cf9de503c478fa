use prepdesk::utils::password::hash_password;
#[allow(unused_imports)]
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

#[allow(dead_code)]
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    email: &str,
    password: &str,
    is_admin: bool,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (email, password, is_admin) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(email)
    .bind(&hashed)
    .bind(is_admin)
    .fetch_one(&mut **tx)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
        is_admin,
    }
}

#[allow(dead_code)]
pub async fn create_test_curator(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    phone: &str,
) -> i64 {
    sqlx::query_scalar("INSERT INTO curators (name, phone) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(phone)
        .fetch_one(&mut **tx)
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_student(
    tx: &mut Transaction<'_, Postgres>,
    first_name: &str,
    course: i32,
    curator_id: i64,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO students (first_name, last_name, course, curator_id, phone, email)
         VALUES ($1, 'Tester', $2, $3, $4, $5) RETURNING id",
    )
    .bind(first_name)
    .bind(course)
    .bind(curator_id)
    .bind(generate_unique_phone())
    .bind(generate_unique_email())
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_teacher(
    tx: &mut Transaction<'_, Postgres>,
    first_name: &str,
    last_name: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO teachers (first_name, last_name, phone, email, about_me)
         VALUES ($1, $2, $3, $4, 'About me') RETURNING id",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(generate_unique_phone())
    .bind(generate_unique_email())
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_group_session(tx: &mut Transaction<'_, Postgres>, title: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO group_sessions (title, description)
         VALUES ($1, 'Session description') RETURNING id",
    )
    .bind(title)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn link_teacher_to_session(
    tx: &mut Transaction<'_, Postgres>,
    teacher_id: i64,
    group_session_id: i64,
) {
    sqlx::query(
        "INSERT INTO teacher_group_sessions (teacher_id, group_session_id) VALUES ($1, $2)",
    )
    .bind(teacher_id)
    .bind(group_session_id)
    .execute(&mut **tx)
    .await
    .unwrap();
}

#[allow(dead_code)]
pub async fn create_test_review(
    tx: &mut Transaction<'_, Postgres>,
    teacher_id: i64,
    name: &str,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO reviews (teacher_id, name, description)
         VALUES ($1, $2, 'Great lessons') RETURNING id",
    )
    .bind(teacher_id)
    .bind(name)
    .fetch_one(&mut **tx)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_phone() -> String {
    format!("+1-{}", &Uuid::new_v4().to_string()[..18])
}

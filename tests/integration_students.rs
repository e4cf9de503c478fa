mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    create_test_curator, create_test_student, create_test_user, generate_unique_email,
    generate_unique_phone,
};
use http_body_util::BodyExt;
use prepdesk::config::cors::CorsConfig;
use prepdesk::config::jwt::JwtConfig;
use prepdesk::router::init_router;
use prepdesk::state::AppState;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

async fn setup_test_app(pool: PgPool) -> NormalizePath<axum::Router> {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

async fn get_auth_token(app: NormalizePath<axum::Router>, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/ielts/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["access_token"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_students_requires_auth(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("GET")
        .uri("/ielts/students/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_as_staff(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", false).await;
    let curator_id = create_test_curator(&mut tx, "Anna", &generate_unique_phone()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &email, "testpass123").await;

    let request = Request::builder()
        .method("POST")
        .uri("/ielts/students/")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "first_name": "Ivan",
                "last_name": "Petrov",
                "course": 21,
                "curator": curator_id,
                "phone": generate_unique_phone(),
                "email": generate_unique_email()
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["first_name"], "Ivan");
    assert_eq!(body["course"], 21);
    // Defaults applied when omitted.
    assert_eq!(body["skype_name"], "");
    assert_eq!(body["ielts_module"], "G");
    assert_eq!(body["goal_score"], "7.0");
    assert_eq!(body["package"], "S");
    assert!(body["exam_date"].is_null());
    // The curator is rendered as a hyperlink.
    assert_eq!(body["curator"], format!("/ielts/curators/{}", curator_id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_unknown_curator(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", false).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &email, "testpass123").await;

    let request = Request::builder()
        .method("POST")
        .uri("/ielts/students/")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "first_name": "Ivan",
                "last_name": "Petrov",
                "course": 21,
                "curator": 999999,
                "phone": generate_unique_phone(),
                "email": generate_unique_email()
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(body["curator"].is_array());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_course_too_low(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", false).await;
    let curator_id = create_test_curator(&mut tx, "Anna", &generate_unique_phone()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &email, "testpass123").await;

    let request = Request::builder()
        .method("POST")
        .uri("/ielts/students/")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "first_name": "Ivan",
                "last_name": "Petrov",
                "course": 19,
                "curator": curator_id,
                "phone": generate_unique_phone(),
                "email": generate_unique_email()
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(body["course"].is_array());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_invalid_module(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", false).await;
    let curator_id = create_test_curator(&mut tx, "Anna", &generate_unique_phone()).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &email, "testpass123").await;

    let request = Request::builder()
        .method("POST")
        .uri("/ielts/students/")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "first_name": "Ivan",
                "last_name": "Petrov",
                "course": 21,
                "curator": curator_id,
                "phone": generate_unique_phone(),
                "email": generate_unique_email(),
                "ielts_module": "X"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(body["ielts_module"].is_array());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_students_filter_by_course(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", false).await;
    let curator_id = create_test_curator(&mut tx, "Anna", &generate_unique_phone()).await;
    create_test_student(&mut tx, "Ivan", 20, curator_id).await;
    create_test_student(&mut tx, "Olga", 21, curator_id).await;
    create_test_student(&mut tx, "Pavel", 21, curator_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &email, "testpass123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/ielts/students/?course=21")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 2);
    for student in body["data"].as_array().unwrap() {
        assert_eq!(student["course"], 21);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_students_is_paginated(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", false).await;
    let curator_id = create_test_curator(&mut tx, "Anna", &generate_unique_phone()).await;
    for n in 0..12 {
        create_test_student(&mut tx, &format!("Student{:02}", n), 20, curator_id).await;
    }
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &email, "testpass123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/ielts/students/")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["meta"]["total"], 12);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["has_more"], true);

    let request = Request::builder()
        .method("GET")
        .uri("/ielts/students/?page=2")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["meta"]["has_more"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_students_ordering(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", false).await;
    let curator_id = create_test_curator(&mut tx, "Anna", &generate_unique_phone()).await;
    create_test_student(&mut tx, "Boris", 20, curator_id).await;
    create_test_student(&mut tx, "Alina", 20, curator_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &email, "testpass123").await;

    let request = Request::builder()
        .method("GET")
        .uri("/ielts/students/?ordering=first_name")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["first_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alina", "Boris"]);

    let request = Request::builder()
        .method("GET")
        .uri("/ielts/students/?ordering=-first_name")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["first_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Boris", "Alina"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_patch_student_partial_update(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", false).await;
    let curator_id = create_test_curator(&mut tx, "Anna", &generate_unique_phone()).await;
    let id = create_test_student(&mut tx, "Ivan", 20, curator_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &email, "testpass123").await;

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/ielts/students/{}", id))
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "goal_score": "8.5" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(body["goal_score"], "8.5");
    // Other fields stay intact.
    assert_eq!(body["first_name"], "Ivan");
    assert_eq!(body["course"], 20);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_student_as_staff(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", false).await;
    let curator_id = create_test_curator(&mut tx, "Anna", &generate_unique_phone()).await;
    let id = create_test_student(&mut tx, "Ivan", 20, curator_id).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &email, "testpass123").await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/ielts/students/{}", id))
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = Request::builder()
        .method("GET")
        .uri(format!("/ielts/students/{}", id))
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_duplicate_phone(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let email = generate_unique_email();
    create_test_user(&mut tx, &email, "testpass123", false).await;
    let curator_id = create_test_curator(&mut tx, "Anna", &generate_unique_phone()).await;
    let phone = generate_unique_phone();
    sqlx::query(
        "INSERT INTO students (first_name, last_name, course, curator_id, phone, email)
         VALUES ('Ivan', 'Petrov', 20, $1, $2, $3)",
    )
    .bind(curator_id)
    .bind(&phone)
    .bind(generate_unique_email())
    .execute(&mut *tx)
    .await
    .unwrap();
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app.clone(), &email, "testpass123").await;

    let request = Request::builder()
        .method("POST")
        .uri("/ielts/students/")
        .header("Authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "first_name": "Olga",
                "last_name": "Petrova",
                "course": 20,
                "curator": curator_id,
                "phone": phone,
                "email": generate_unique_email()
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(body["phone"].is_array());
}

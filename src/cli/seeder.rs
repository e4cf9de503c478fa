use chrono::{Duration, Utc};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::{FirstName, LastName, Name};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::time::Instant;

use crate::utils::password::hash_password;

const IELTS_MODULES: [&str; 2] = ["G", "A"];
const PACKAGES: [&str; 3] = ["B", "S", "V"];
const COURSES: [i32; 3] = [20, 21, 22];

fn fake_phone(n: usize) -> String {
    // Suffixed with the row index so the unique constraint never trips.
    format!("+1-555-{:04}-{}", (0..10_000).fake::<u32>(), n)
}

/// Seeds the database with fake curators, students, teachers, group
/// sessions and reviews, plus one admin and one staff login.
pub async fn seed_database(
    db: &PgPool,
    num_curators: usize,
    num_students: usize,
    num_teachers: usize,
    num_group_sessions: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    if num_students > 0 && num_curators == 0 {
        return Err("Cannot seed students without curators".into());
    }

    let start_time = Instant::now();

    println!("Seeding database...");
    println!("   - Curators: {}", num_curators);
    println!("   - Students: {}", num_students);
    println!("   - Teachers: {}", num_teachers);
    println!("   - Group sessions: {}", num_group_sessions);

    // One transaction for the whole run so a failure never leaves
    // partial demo data behind.
    let mut tx = db.begin().await?;

    let password = hash_password("password123")
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;
    sqlx::query(
        "INSERT INTO users (email, password, is_admin)
         VALUES ('admin@prepdesk.io', $1, TRUE), ('staff@prepdesk.io', $1, FALSE)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(&password)
    .execute(&mut *tx)
    .await?;

    let mut curator_ids = Vec::with_capacity(num_curators);
    for n in 0..num_curators {
        let name: String = FirstName().fake();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO curators (name, phone) VALUES ($1, $2) RETURNING id",
        )
        .bind(&name)
        .bind(fake_phone(n))
        .fetch_one(&mut *tx)
        .await?;
        curator_ids.push(id);
    }

    for n in 0..num_students {
        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();
        let email = format!("student{}@example.com", n);
        let curator_id = curator_ids[n % curator_ids.len()];
        let course = COURSES[n % COURSES.len()];
        let ielts_module = IELTS_MODULES[n % IELTS_MODULES.len()];
        let package = PACKAGES[n % PACKAGES.len()];
        let goal_score = Decimal::new((50..=90).fake::<i64>(), 1);
        let exam_date = if n % 3 == 0 {
            None
        } else {
            Some((Utc::now() + Duration::days((30..180).fake::<i64>())).date_naive())
        };

        sqlx::query(
            "INSERT INTO students
                (first_name, last_name, course, curator_id, phone, email,
                 skype_name, ielts_module, goal_score, exam_date, package)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(&first_name)
        .bind(&last_name)
        .bind(course)
        .bind(curator_id)
        .bind(fake_phone(num_curators + n))
        .bind(&email)
        .bind(format!("live:{}", email))
        .bind(ielts_module)
        .bind(goal_score)
        .bind(exam_date)
        .bind(package)
        .execute(&mut *tx)
        .await?;
    }

    let mut teacher_ids = Vec::with_capacity(num_teachers);
    for n in 0..num_teachers {
        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();
        let email = format!("teacher{}@example.com", n);
        let about_me: String = Paragraph(1..3).fake();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO teachers (first_name, last_name, phone, email, skype_name, about_me)
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&first_name)
        .bind(&last_name)
        .bind(fake_phone(num_curators + num_students + n))
        .bind(&email)
        .bind(format!("live:{}", email))
        .bind(&about_me)
        .fetch_one(&mut *tx)
        .await?;
        teacher_ids.push(id);
    }

    for n in 0..num_group_sessions {
        let title: String = Sentence(2..5).fake();
        let description: String = Paragraph(1..3).fake();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO group_sessions (title, description)
             VALUES ($1, $2) RETURNING id",
        )
        .bind(&title)
        .bind(&description)
        .fetch_one(&mut *tx)
        .await?;

        // Every session gets one or two teachers.
        for teacher_id in teacher_ids.iter().cycle().skip(n).take(1 + n % 2) {
            sqlx::query(
                "INSERT INTO teacher_group_sessions (teacher_id, group_session_id)
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(teacher_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }
    }

    for teacher_id in &teacher_ids {
        for _ in 0..(1..4).fake::<usize>() {
            let name: String = Name().fake();
            let description: String = Paragraph(1..2).fake();
            sqlx::query(
                "INSERT INTO reviews (teacher_id, name, description)
                 VALUES ($1, $2, $3)",
            )
            .bind(teacher_id)
            .bind(&name)
            .bind(&description)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    println!("Seeding completed in {:.2?}", start_time.elapsed());
    println!("   Logins: admin@prepdesk.io / staff@prepdesk.io (password123)");

    Ok(())
}

//! Demo-data seeder: one course with subjects, class offerings, staff,
//! students with enrollments, a term's worth of grades and attendance,
//! and a few announcements and calendar events.

use chrono::{Datelike, Duration, Utc};
use fake::Fake;
use fake::faker::name::en::Name;
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::users::model::groups;
use crate::utils::password::hash_password;

pub struct SeedPlan {
    pub classes: usize,
    pub students_per_class: usize,
    pub teachers: usize,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            classes: 2,
            students_per_class: 20,
            teachers: 4,
        }
    }
}

fn email_for(name: &str, n: usize) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '.' })
        .collect();
    format!("{}.{}@nexus.edu", slug, n)
}

pub async fn seed_database(
    pool: &PgPool,
    plan: SeedPlan,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Seeding demo data...");
    println!(
        "  {} classes, {} students per class, {} teachers",
        plan.classes, plan.students_per_class, plan.teachers
    );

    // bcrypt is slow; one hash is reused for every seeded account.
    let password_hash = hash_password("password123").map_err(|e| e.error)?;
    let mut rng = rand::thread_rng();

    let course_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (name, code, description, workload_hours)
         VALUES ('Computer Science', 'CS', 'Demo course', 2400)
         ON CONFLICT (code) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .fetch_one(pool)
    .await?;

    let subject_names = ["Mathematics", "Programming", "Databases", "Networks"];
    let mut subject_ids = Vec::new();
    for name in subject_names {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO subjects (name, course_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(course_id)
        .fetch_one(pool)
        .await?;
        subject_ids.push(id);
    }

    let term = format!("{}.1", Utc::now().year());
    let shifts = ["morning", "evening"];
    let mut class_ids = Vec::new();
    for i in 0..plan.classes {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO classes (code, term, shift, course_id)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(format!("CS-{}{}", Utc::now().year() % 100, (b'A' + i as u8) as char))
        .bind(&term)
        .bind(shifts[i % shifts.len()])
        .bind(course_id)
        .fetch_one(pool)
        .await?;
        class_ids.push(id);
    }

    // Teachers, each linked to a fresh account and assigned everywhere.
    for n in 0..plan.teachers {
        let name: String = Name().fake();
        let email = email_for(&name, n);
        let user_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(format!("teacher{}", n))
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(pool)
        .await?;

        let teacher_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO teachers (user_id, full_name, email, specialty, hired_on)
             VALUES ($1, $2, $3, $4, CURRENT_DATE) RETURNING id",
        )
        .bind(user_id)
        .bind(&name)
        .bind(&email)
        .bind(subject_names[n % subject_names.len()])
        .fetch_one(pool)
        .await?;

        sqlx::query("INSERT INTO teacher_subjects (teacher_id, subject_id) VALUES ($1, $2)")
            .bind(teacher_id)
            .bind(subject_ids[n % subject_ids.len()])
            .execute(pool)
            .await?;
        for class_id in &class_ids {
            sqlx::query("INSERT INTO teacher_classes (teacher_id, class_id) VALUES ($1, $2)")
                .bind(teacher_id)
                .bind(class_id)
                .execute(pool)
                .await?;
        }
    }

    // Registrar and coordination staff accounts.
    for (n, group_id) in [(0, groups::REGISTRAR), (1, groups::COORDINATION)] {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(if n == 0 { "registrar" } else { "coordination" })
        .bind(format!("staff{}@nexus.edu", n))
        .bind(&password_hash)
        .fetch_one(pool)
        .await?;

        sqlx::query("INSERT INTO user_groups (user_id, group_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(group_id)
            .execute(pool)
            .await?;
    }

    // Students with enrollments, grades and a month of attendance.
    let mut student_count = 0;
    for class_id in &class_ids {
        for _ in 0..plan.students_per_class {
            student_count += 1;
            let name: String = Name().fake();
            let email = email_for(&name, student_count + 1000);

            let user_id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(format!("student{}", student_count))
            .bind(&email)
            .bind(&password_hash)
            .fetch_one(pool)
            .await?;

            let student_id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO students (user_id, full_name, email, current_class_id)
                 VALUES ($1, $2, $3, $4) RETURNING id",
            )
            .bind(user_id)
            .bind(&name)
            .bind(&email)
            .bind(class_id)
            .fetch_one(pool)
            .await?;

            let enrollment_id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO enrollments (student_id, class_id) VALUES ($1, $2) RETURNING id",
            )
            .bind(student_id)
            .bind(class_id)
            .fetch_one(pool)
            .await?;

            for subject_id in &subject_ids {
                for kind in ["test 1", "test 2"] {
                    let value = Decimal::new(rng.gen_range(40..=100), 1);
                    sqlx::query(
                        "INSERT INTO grades (enrollment_id, subject_id, value, evaluation_kind)
                         VALUES ($1, $2, $3, $4)",
                    )
                    .bind(enrollment_id)
                    .bind(subject_id)
                    .bind(value)
                    .bind(kind)
                    .execute(pool)
                    .await?;
                }

                for day in 0..8 {
                    let date = Utc::now().date_naive() - Duration::days(day * 2);
                    let present = rng.gen_range(0..10) != 0;
                    sqlx::query(
                        "INSERT INTO attendance (enrollment_id, subject_id, class_date, present)
                         VALUES ($1, $2, $3, $4)
                         ON CONFLICT (enrollment_id, subject_id, class_date)
                         DO UPDATE SET present = EXCLUDED.present",
                    )
                    .bind(enrollment_id)
                    .bind(subject_id)
                    .bind(date)
                    .bind(present)
                    .execute(pool)
                    .await?;
                }
            }
        }
    }

    sqlx::query(
        "INSERT INTO announcements (title, body, audience)
         VALUES ('Welcome back', 'Classes resume on Monday.', 'students'),
                ('Staff meeting', 'All teachers, room 12, Friday 14:00.', 'teachers'),
                ('Enrollment period', 'Re-enrollment is open until the end of the month.', 'all')",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "INSERT INTO calendar_events (title, description, starts_at)
         VALUES ('Midterm exams', 'Midterm exam week', NOW() + INTERVAL '14 days'),
                ('Holiday', 'National holiday, no classes', NOW() + INTERVAL '30 days')",
    )
    .execute(pool)
    .await?;

    println!("Seeded {} students across {} classes.", student_count, class_ids.len());
    Ok(())
}

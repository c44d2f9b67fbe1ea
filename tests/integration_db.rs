//! Database-backed tests. They run against `DATABASE_URL` and skip
//! themselves (with a note) when no database is configured.

mod common;

use axum::body::Body;
use axum::http::{Request, header};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use common::{lazy_test_state, test_jwt_config, token_for, unique_email, unique_username};
use nexus::modules::attendance::model::{AttendanceBatchDto, AttendanceEntryDto};
use nexus::modules::attendance::service::AttendanceService;
use nexus::modules::auth::model::{LoginRequest, Role};
use nexus::modules::auth::service::AuthService;
use nexus::modules::dashboards::service::DashboardService;
use nexus::router::init_router;
use nexus::state::AppState;
use nexus::utils::aggregates::average_grade;
use nexus::utils::password::hash_password;

async fn test_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("skipping: DATABASE_URL not set");
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to the test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");
    Some(pool)
}

struct Fixture {
    subject_id: Uuid,
    student_id: Uuid,
    enrollment_id: Uuid,
}

/// Course, subject, class, student and enrollment in one pass.
async fn seed_fixture(pool: &PgPool) -> Fixture {
    let course_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (name, code, workload_hours) VALUES ($1, $2, 100) RETURNING id",
    )
    .bind("Test Course")
    .bind(format!("TC-{}", Uuid::new_v4()))
    .fetch_one(pool)
    .await
    .unwrap();

    let subject_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO subjects (name, course_id) VALUES ('Test Subject', $1) RETURNING id",
    )
    .bind(course_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let class_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO classes (code, term, shift, course_id)
         VALUES ($1, '2026.1', 'morning', $2) RETURNING id",
    )
    .bind(format!("T-{}", Uuid::new_v4()))
    .bind(course_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let student_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO students (full_name, email, current_class_id)
         VALUES ('Test Student', $1, $2) RETURNING id",
    )
    .bind(unique_email())
    .bind(class_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let enrollment_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO enrollments (student_id, class_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(student_id)
    .bind(class_id)
    .fetch_one(pool)
    .await
    .unwrap();

    Fixture {
        subject_id,
        student_id,
        enrollment_id,
    }
}

#[tokio::test]
async fn attendance_resubmission_coalesces_into_one_row() {
    let Some(pool) = test_pool().await else { return };
    let fixture = seed_fixture(&pool).await;
    let class_date = chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();

    let sheet = |present| AttendanceBatchDto {
        subject_id: fixture.subject_id,
        class_date,
        entries: vec![AttendanceEntryDto {
            enrollment_id: fixture.enrollment_id,
            present,
        }],
    };

    AttendanceService::record_sheet(&pool, sheet(false)).await.unwrap();
    AttendanceService::record_sheet(&pool, sheet(true)).await.unwrap();

    let rows = sqlx::query_as::<_, (bool,)>(
        "SELECT present FROM attendance
         WHERE enrollment_id = $1 AND subject_id = $2 AND class_date = $3",
    )
    .bind(fixture.enrollment_id)
    .bind(fixture.subject_id)
    .bind(class_date)
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), 1, "double submission must never produce two rows");
    assert!(rows[0].0, "the second submission wins");
}

#[tokio::test]
async fn login_resolves_student_and_links_by_email() {
    let Some(pool) = test_pool().await else { return };

    let email = unique_email();
    let username = unique_username();
    let hashed = hash_password("secret123").unwrap();

    sqlx::query("INSERT INTO users (username, email, password) VALUES ($1, $2, $3)")
        .bind(&username)
        .bind(&email)
        .bind(&hashed)
        .execute(&pool)
        .await
        .unwrap();

    // Legacy data: the student record exists but is not linked yet.
    let student_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO students (full_name, email) VALUES ('Legacy Student', $1) RETURNING id",
    )
    .bind(&email)
    .fetch_one(&pool)
    .await
    .unwrap();

    let login = |username: String| LoginRequest {
        username,
        password: "secret123".to_string(),
    };

    let response = AuthService::login_user(&pool, login(username.clone()), &test_jwt_config())
        .await
        .unwrap();
    assert_eq!(response.role, Some(Role::Student));
    assert_eq!(response.landing, "/dashboard/aluno/");

    let linked_user = sqlx::query_scalar::<_, Option<Uuid>>(
        "SELECT user_id FROM students WHERE id = $1",
    )
    .bind(student_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(linked_user.is_some(), "login must persist the link");

    // A second login takes the already-linked branch and stays stable.
    let response = AuthService::login_user(&pool, login(username), &test_jwt_config())
        .await
        .unwrap();
    assert_eq!(response.role, Some(Role::Student));
}

#[tokio::test]
async fn grade_average_uses_all_enrollment_grades() {
    let Some(pool) = test_pool().await else { return };
    let fixture = seed_fixture(&pool).await;

    for value in [70, 80, 90] {
        sqlx::query(
            "INSERT INTO grades (enrollment_id, subject_id, value, evaluation_kind)
             VALUES ($1, $2, $3, 'test')",
        )
        .bind(fixture.enrollment_id)
        .bind(fixture.subject_id)
        .bind(Decimal::new(value, 1))
        .execute(&pool)
        .await
        .unwrap();
    }

    let values = DashboardService::grade_values(&pool, fixture.student_id)
        .await
        .unwrap();
    assert_eq!(values.len(), 3);
    assert_eq!(average_grade(&values), Decimal::new(80, 1));
}

#[tokio::test]
async fn denied_write_is_redirected_and_mutates_nothing() {
    let Some(pool) = test_pool().await else { return };

    let before = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(&pool)
        .await
        .unwrap();

    let state = AppState {
        db: pool.clone(),
        ..lazy_test_state()
    };
    let app = init_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/dashboard/secretaria/alunos")
        .header(header::CONTENT_TYPE, "application/json")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", token_for(Some(Role::Student))),
        )
        .body(Body::from(
            serde_json::json!({
                "full_name": "Should Not Exist",
                "email": unique_email(),
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_redirection());

    let after = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(before, after, "denied request must not mutate state");
}

use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{CreateStudentDto, Student, StudentFilterParams, UpdateStudentDto};

const STUDENT_COLUMNS: &str = "id, user_id, enrollment_number, full_name, email, phone, \
                               birth_date, current_class_id, created_at, updated_at";

pub struct StudentService;

impl StudentService {
    /// Create a student, optionally provisioning and linking a login
    /// account in the same transaction.
    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let mut tx = db.begin().await?;

        let user_id = match &dto.account {
            Some(account) => {
                let hashed = hash_password(&account.password)?;
                let user_id = sqlx::query_scalar::<_, Uuid>(
                    "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(&account.username)
                .bind(&dto.email)
                .bind(&hashed)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| match unique_violation(&e) {
                    true => AppError::bad_request(anyhow::anyhow!(
                        "Username or email already taken"
                    )),
                    false => AppError::database(anyhow::Error::from(e)),
                })?;
                Some(user_id)
            }
            None => None,
        };

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (user_id, full_name, email, phone, birth_date, current_class_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&dto.full_name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(dto.birth_date)
        .bind(dto.current_class_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match unique_violation(&e) {
            true => AppError::bad_request(anyhow::anyhow!(
                "Student with email {} already exists",
                dto.email
            )),
            false => AppError::database(anyhow::Error::from(e)),
        })?;

        tx.commit().await?;
        Ok(student)
    }

    #[instrument(skip(db, params))]
    pub async fn list_students(
        db: &PgPool,
        params: &StudentFilterParams,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let name = params
            .name
            .as_ref()
            .map(|n| format!("%{}%", n))
            .unwrap_or_else(|| "%".to_string());
        let email = params
            .email
            .as_ref()
            .map(|e| format!("%{}%", e))
            .unwrap_or_else(|| "%".to_string());

        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             WHERE full_name ILIKE $1 AND email ILIKE $2
             ORDER BY full_name
             LIMIT $3 OFFSET $4"
        ))
        .bind(&name)
        .bind(&email)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await
        .context("Failed to list students")
        .map_err(AppError::database)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM students WHERE full_name ILIKE $1 AND email ILIKE $2",
        )
        .bind(&name)
        .bind(&email)
        .fetch_one(db)
        .await
        .context("Failed to count students")
        .map_err(AppError::database)?;

        Ok((students, total))
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    /// Student profile linked to a login account, if any.
    #[instrument(skip(db))]
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch student by account")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(db, id).await?;

        let full_name = dto.full_name.unwrap_or(existing.full_name);
        let email = dto.email.unwrap_or(existing.email);
        let phone = dto.phone.or(existing.phone);
        let birth_date = dto.birth_date.or(existing.birth_date);
        let current_class_id = dto.current_class_id.or(existing.current_class_id);

        sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET full_name = $1, email = $2, phone = $3, birth_date = $4,
                 current_class_id = $5, updated_at = NOW()
             WHERE id = $6
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&full_name)
        .bind(&email)
        .bind(&phone)
        .bind(birth_date)
        .bind(current_class_id)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| match unique_violation(&e) {
            true => AppError::bad_request(anyhow::anyhow!(
                "Student with email {} already exists",
                email
            )),
            false => AppError::database(anyhow::Error::from(e)),
        })
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| match foreign_key_violation(&e) {
                true => AppError::could_not_complete(),
                false => AppError::database(anyhow::Error::from(e)),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }
}

pub(crate) fn unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

pub(crate) fn foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

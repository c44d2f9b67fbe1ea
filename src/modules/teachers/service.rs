use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::service::{foreign_key_violation, unique_violation};
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{
    AssignTeacherDto, CreateTeacherDto, Teacher, TeacherFilterParams, UpdateTeacherDto,
};

const TEACHER_COLUMNS: &str =
    "id, user_id, full_name, email, phone, specialty, hired_on, created_at, updated_at";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db, dto))]
    pub async fn create_teacher(db: &PgPool, dto: CreateTeacherDto) -> Result<Teacher, AppError> {
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

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "INSERT INTO teachers (user_id, full_name, email, phone, specialty, hired_on)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&dto.full_name)
        .bind(&dto.email)
        .bind(&dto.phone)
        .bind(&dto.specialty)
        .bind(dto.hired_on)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match unique_violation(&e) {
            true => AppError::bad_request(anyhow::anyhow!(
                "Teacher with email {} already exists",
                dto.email
            )),
            false => AppError::database(anyhow::Error::from(e)),
        })?;

        tx.commit().await?;
        Ok(teacher)
    }

    #[instrument(skip(db, params))]
    pub async fn list_teachers(
        db: &PgPool,
        params: &TeacherFilterParams,
    ) -> Result<(Vec<Teacher>, i64), AppError> {
        let name = params
            .name
            .as_ref()
            .map(|n| format!("%{}%", n))
            .unwrap_or_else(|| "%".to_string());

        let teachers = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers
             WHERE full_name ILIKE $1
             ORDER BY full_name
             LIMIT $2 OFFSET $3"
        ))
        .bind(&name)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await
        .context("Failed to list teachers")
        .map_err(AppError::database)?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers WHERE full_name ILIKE $1")
                .bind(&name)
                .fetch_one(db)
                .await
                .context("Failed to count teachers")
                .map_err(AppError::database)?;

        Ok((teachers, total))
    }

    #[instrument(skip(db))]
    pub async fn get_teacher(db: &PgPool, id: Uuid) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch teacher")
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Teacher not found")))
    }

    #[instrument(skip(db))]
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> Result<Option<Teacher>, AppError> {
        sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("Failed to fetch teacher by account")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_teacher(
        db: &PgPool,
        id: Uuid,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let existing = Self::get_teacher(db, id).await?;

        let full_name = dto.full_name.unwrap_or(existing.full_name);
        let email = dto.email.unwrap_or(existing.email);
        let phone = dto.phone.or(existing.phone);
        let specialty = dto.specialty.or(existing.specialty);
        let hired_on = dto.hired_on.or(existing.hired_on);

        sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers
             SET full_name = $1, email = $2, phone = $3, specialty = $4,
                 hired_on = $5, updated_at = NOW()
             WHERE id = $6
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(&full_name)
        .bind(&email)
        .bind(&phone)
        .bind(&specialty)
        .bind(hired_on)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| match unique_violation(&e) {
            true => AppError::bad_request(anyhow::anyhow!(
                "Teacher with email {} already exists",
                email
            )),
            false => AppError::database(anyhow::Error::from(e)),
        })
    }

    /// Replace subject and class assignments wholesale.
    #[instrument(skip(db, dto))]
    pub async fn assign_teacher(
        db: &PgPool,
        id: Uuid,
        dto: AssignTeacherDto,
    ) -> Result<(), AppError> {
        // Existence check first so the caller gets 404 over a FK error.
        Self::get_teacher(db, id).await?;

        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM teacher_subjects WHERE teacher_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for subject_id in &dto.subject_ids {
            sqlx::query("INSERT INTO teacher_subjects (teacher_id, subject_id) VALUES ($1, $2)")
                .bind(id)
                .bind(subject_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| match foreign_key_violation(&e) {
                    true => AppError::could_not_complete(),
                    false => AppError::database(anyhow::Error::from(e)),
                })?;
        }

        sqlx::query("DELETE FROM teacher_classes WHERE teacher_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        for class_id in &dto.class_ids {
            sqlx::query("INSERT INTO teacher_classes (teacher_id, class_id) VALUES ($1, $2)")
                .bind(id)
                .bind(class_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| match foreign_key_violation(&e) {
                    true => AppError::could_not_complete(),
                    false => AppError::database(anyhow::Error::from(e)),
                })?;
        }

        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_teacher(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teachers WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| match foreign_key_violation(&e) {
                true => AppError::could_not_complete(),
                false => AppError::database(anyhow::Error::from(e)),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Teacher not found")));
        }

        Ok(())
    }
}

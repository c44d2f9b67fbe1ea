use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::service::unique_violation;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{AdminDashboard, CreateUserDto, User, UserFilterParams, groups};

const USER_COLUMNS: &str =
    "id, username, email, is_superuser, is_active, created_at, updated_at";

pub struct UserService;

impl UserService {
    /// Create an account, assign its groups and, when requested, link it
    /// to an existing student or teacher record — all in one transaction.
    /// This is the provisioning path that replaces link-on-login.
    #[instrument(skip(db, dto))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        for group in &dto.groups {
            if groups::id_by_name(group).is_none() {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Unknown group: {}",
                    group
                )));
            }
        }

        let hashed = hash_password(&dto.password)?;
        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password, is_superuser)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed)
        .bind(dto.is_superuser)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match unique_violation(&e) {
            true => AppError::bad_request(anyhow::anyhow!("Username or email already taken")),
            false => AppError::database(anyhow::Error::from(e)),
        })?;

        for group in &dto.groups {
            let group_id = groups::id_by_name(group).expect("validated above");
            sqlx::query(
                "INSERT INTO user_groups (user_id, group_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(user.id)
            .bind(group_id)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(student_id) = dto.student_id {
            let result =
                sqlx::query("UPDATE students SET user_id = $1, updated_at = NOW() WHERE id = $2 AND user_id IS NULL")
                    .bind(user.id)
                    .bind(student_id)
                    .execute(&mut *tx)
                    .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Student is unknown or already linked"
                )));
            }
        }

        if let Some(teacher_id) = dto.teacher_id {
            let result =
                sqlx::query("UPDATE teachers SET user_id = $1, updated_at = NOW() WHERE id = $2 AND user_id IS NULL")
                    .bind(user.id)
                    .bind(teacher_id)
                    .execute(&mut *tx)
                    .await?;
            if result.rows_affected() == 0 {
                return Err(AppError::bad_request(anyhow::anyhow!(
                    "Teacher is unknown or already linked"
                )));
            }
        }

        tx.commit().await?;
        Ok(user)
    }

    #[instrument(skip(db, params))]
    pub async fn list_users(
        db: &PgPool,
        params: &UserFilterParams,
    ) -> Result<(Vec<User>, i64), AppError> {
        let username = params
            .username
            .as_ref()
            .map(|u| format!("%{}%", u))
            .unwrap_or_else(|| "%".to_string());
        let email = params
            .email
            .as_ref()
            .map(|e| format!("%{}%", e))
            .unwrap_or_else(|| "%".to_string());

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE username ILIKE $1 AND email ILIKE $2
             ORDER BY username
             LIMIT $3 OFFSET $4"
        ))
        .bind(&username)
        .bind(&email)
        .bind(params.pagination.limit())
        .bind(params.pagination.offset())
        .fetch_all(db)
        .await
        .context("Failed to list users")
        .map_err(AppError::database)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE username ILIKE $1 AND email ILIKE $2",
        )
        .bind(&username)
        .bind(&email)
        .fetch_one(db)
        .await
        .context("Failed to count users")
        .map_err(AppError::database)?;

        Ok((users, total))
    }

    /// Replace a user's group memberships.
    #[instrument(skip(db))]
    pub async fn assign_groups(
        db: &PgPool,
        user_id: Uuid,
        group_names: &[String],
    ) -> Result<(), AppError> {
        let mut group_ids = Vec::with_capacity(group_names.len());
        for name in group_names {
            let id = groups::id_by_name(name).ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!("Unknown group: {}", name))
            })?;
            group_ids.push(id);
        }

        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(db)
            .await?;
        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        let mut tx = db.begin().await?;
        sqlx::query("DELETE FROM user_groups WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        for group_id in group_ids {
            sqlx::query("INSERT INTO user_groups (user_id, group_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(group_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn admin_dashboard(db: &PgPool) -> Result<AdminDashboard, AppError> {
        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(db)
            .await?;
        let total_students = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(db)
            .await?;
        let total_teachers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(db)
            .await?;
        let total_classes = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes")
            .fetch_one(db)
            .await?;
        let total_active_enrollments = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM enrollments WHERE status = 'active'",
        )
        .fetch_one(db)
        .await?;

        Ok(AdminDashboard {
            total_users,
            total_students,
            total_teachers,
            total_classes,
            total_active_enrollments,
        })
    }
}

use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::{User, groups};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::{LoginRequest, LoginResponse};
use super::resolver::{LinkAction, PrincipalSnapshot, resolve};

pub struct AuthService;

impl AuthService {
    /// Authenticate, resolve the dashboard role, perform any pending
    /// legacy link-up and issue the access token.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            username: String,
            email: String,
            password: String,
            is_superuser: bool,
            is_active: bool,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        }

        let record = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, username, email, password, is_superuser, is_active, created_at, updated_at
             FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

        if !record.is_active {
            return Err(AppError::unauthorized("Account is disabled"));
        }

        if !verify_password(&dto.password, &record.password)? {
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let snapshot =
            Self::load_principal_snapshot(db, record.id, record.is_superuser, &record.email)
                .await?;
        let resolution = resolve(&snapshot);

        match resolution.link {
            Some(LinkAction::LinkStudentByEmail) => {
                Self::ensure_student_linked(db, record.id, &record.email).await?;
            }
            Some(LinkAction::LinkTeacherByEmail) => {
                Self::ensure_teacher_linked(db, record.id, &record.email).await?;
            }
            None => {}
        }

        let access_token = create_access_token(
            record.id,
            &record.username,
            &record.email,
            resolution.role,
            jwt_config,
        )?;

        info!(
            user_id = %record.id,
            role = resolution.role.map(|r| r.as_str()).unwrap_or("none"),
            "Login resolved"
        );

        Ok(LoginResponse {
            access_token,
            role: resolution.role,
            landing: resolution.landing.as_path().to_string(),
            user: User {
                id: record.id,
                username: record.username,
                email: record.email,
                is_superuser: record.is_superuser,
                is_active: record.is_active,
                created_at: record.created_at,
                updated_at: record.updated_at,
            },
        })
    }

    /// One pass over the principal's linked records and groups.
    #[instrument(skip(db, email))]
    pub async fn load_principal_snapshot(
        db: &PgPool,
        user_id: Uuid,
        is_superuser: bool,
        email: &str,
    ) -> Result<PrincipalSnapshot, AppError> {
        let has_student_profile = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;

        let has_teacher_profile = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teachers WHERE user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;

        let unlinked_student_email_match = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE user_id IS NULL AND email = $1)",
        )
        .bind(email)
        .fetch_one(db)
        .await?;

        let unlinked_teacher_email_match = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM teachers WHERE user_id IS NULL AND email = $1)",
        )
        .bind(email)
        .fetch_one(db)
        .await?;

        let group_names = sqlx::query_scalar::<_, String>(
            "SELECT g.name FROM groups g
             JOIN user_groups ug ON ug.group_id = g.id
             WHERE ug.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(PrincipalSnapshot {
            is_superuser,
            has_student_profile,
            has_teacher_profile,
            unlinked_student_email_match,
            unlinked_teacher_email_match,
            in_registrar_group: group_names.iter().any(|n| n == groups::names::REGISTRAR),
            in_coordination_group: group_names.iter().any(|n| n == groups::names::COORDINATION),
        })
    }

    /// Idempotent legacy link-up: attaches the account to the student
    /// record sharing its email, if that record is still unlinked.
    #[instrument(skip(db, email))]
    pub async fn ensure_student_linked(
        db: &PgPool,
        user_id: Uuid,
        email: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE students SET user_id = $1, updated_at = NOW()
             WHERE user_id IS NULL AND email = $2",
        )
        .bind(user_id)
        .bind(email)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Idempotent legacy link-up for teacher records.
    #[instrument(skip(db, email))]
    pub async fn ensure_teacher_linked(
        db: &PgPool,
        user_id: Uuid,
        email: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE teachers SET user_id = $1, updated_at = NOW()
             WHERE user_id IS NULL AND email = $2",
        )
        .bind(user_id)
        .bind(email)
        .execute(db)
        .await?;
        Ok(())
    }
}

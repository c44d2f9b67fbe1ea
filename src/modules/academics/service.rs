use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::service::{foreign_key_violation, unique_violation};
use crate::utils::errors::AppError;

use super::model::{
    AcademicOverview, Course, CreateClassDto, CreateCourseDto, CreateSubjectDto, SchoolClass,
    Subject, UpdateClassDto, UpdateCourseDto,
};

pub struct AcademicService;

impl AcademicService {
    #[instrument(skip(db, dto))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            "INSERT INTO courses (name, code, description, workload_hours)
             VALUES ($1, $2, $3, $4)
             RETURNING id, name, code, description, workload_hours",
        )
        .bind(&dto.name)
        .bind(&dto.code)
        .bind(&dto.description)
        .bind(dto.workload_hours)
        .fetch_one(db)
        .await
        .map_err(|e| match unique_violation(&e) {
            true => {
                AppError::bad_request(anyhow::anyhow!("Course code {} already exists", dto.code))
            }
            false => AppError::database(anyhow::Error::from(e)),
        })
    }

    #[instrument(skip(db))]
    pub async fn list_courses(db: &PgPool) -> Result<Vec<Course>, AppError> {
        sqlx::query_as::<_, Course>(
            "SELECT id, name, code, description, workload_hours FROM courses ORDER BY name",
        )
        .fetch_all(db)
        .await
        .context("Failed to list courses")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let existing = sqlx::query_as::<_, Course>(
            "SELECT id, name, code, description, workload_hours FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        sqlx::query_as::<_, Course>(
            "UPDATE courses SET name = $1, description = $2, workload_hours = $3
             WHERE id = $4
             RETURNING id, name, code, description, workload_hours",
        )
        .bind(dto.name.unwrap_or(existing.name))
        .bind(dto.description.or(existing.description))
        .bind(dto.workload_hours.unwrap_or(existing.workload_hours))
        .bind(id)
        .fetch_one(db)
        .await
        .context("Failed to update course")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| match foreign_key_violation(&e) {
                true => AppError::could_not_complete(),
                false => AppError::database(anyhow::Error::from(e)),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }
        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn create_subject(db: &PgPool, dto: CreateSubjectDto) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(
            "INSERT INTO subjects (name, syllabus, course_id)
             VALUES ($1, $2, $3)
             RETURNING id, name, syllabus, course_id",
        )
        .bind(&dto.name)
        .bind(&dto.syllabus)
        .bind(dto.course_id)
        .fetch_one(db)
        .await
        .map_err(|e| match foreign_key_violation(&e) {
            true => AppError::could_not_complete(),
            false => AppError::database(anyhow::Error::from(e)),
        })
    }

    #[instrument(skip(db))]
    pub async fn list_subjects_for_course(
        db: &PgPool,
        course_id: Uuid,
    ) -> Result<Vec<Subject>, AppError> {
        sqlx::query_as::<_, Subject>(
            "SELECT id, name, syllabus, course_id FROM subjects WHERE course_id = $1 ORDER BY name",
        )
        .bind(course_id)
        .fetch_all(db)
        .await
        .context("Failed to list subjects")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_subject(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| match foreign_key_violation(&e) {
                true => AppError::could_not_complete(),
                false => AppError::database(anyhow::Error::from(e)),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Subject not found")));
        }
        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn create_class(db: &PgPool, dto: CreateClassDto) -> Result<SchoolClass, AppError> {
        sqlx::query_as::<_, SchoolClass>(
            "INSERT INTO classes (code, term, shift, course_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, code, term, shift, course_id",
        )
        .bind(&dto.code)
        .bind(&dto.term)
        .bind(&dto.shift)
        .bind(dto.course_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if unique_violation(&e) {
                AppError::bad_request(anyhow::anyhow!(
                    "Class {} already exists for term {}",
                    dto.code,
                    dto.term
                ))
            } else if foreign_key_violation(&e) {
                AppError::could_not_complete()
            } else {
                AppError::database(anyhow::Error::from(e))
            }
        })
    }

    #[instrument(skip(db))]
    pub async fn list_classes(db: &PgPool) -> Result<Vec<SchoolClass>, AppError> {
        sqlx::query_as::<_, SchoolClass>(
            "SELECT id, code, term, shift, course_id FROM classes ORDER BY term DESC, code",
        )
        .fetch_all(db)
        .await
        .context("Failed to list classes")
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_class(db: &PgPool, id: Uuid) -> Result<SchoolClass, AppError> {
        sqlx::query_as::<_, SchoolClass>(
            "SELECT id, code, term, shift, course_id FROM classes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_class(
        db: &PgPool,
        id: Uuid,
        dto: UpdateClassDto,
    ) -> Result<SchoolClass, AppError> {
        let existing = Self::get_class(db, id).await?;

        sqlx::query_as::<_, SchoolClass>(
            "UPDATE classes SET code = $1, term = $2, shift = $3
             WHERE id = $4
             RETURNING id, code, term, shift, course_id",
        )
        .bind(dto.code.unwrap_or(existing.code))
        .bind(dto.term.unwrap_or(existing.term))
        .bind(dto.shift.unwrap_or(existing.shift))
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| match unique_violation(&e) {
            true => AppError::could_not_complete(),
            false => AppError::database(anyhow::Error::from(e)),
        })
    }

    #[instrument(skip(db))]
    pub async fn delete_class(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| match foreign_key_violation(&e) {
                true => AppError::could_not_complete(),
                false => AppError::database(anyhow::Error::from(e)),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Class not found")));
        }
        Ok(())
    }

    /// Everything the academic-management screen shows at once.
    #[instrument(skip(db))]
    pub async fn overview(db: &PgPool) -> Result<AcademicOverview, AppError> {
        let courses = Self::list_courses(db).await?;
        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT id, name, syllabus, course_id FROM subjects ORDER BY name",
        )
        .fetch_all(db)
        .await
        .context("Failed to list subjects")
        .map_err(AppError::database)?;
        let classes = Self::list_classes(db).await?;

        Ok(AcademicOverview {
            courses,
            subjects,
            classes,
        })
    }
}

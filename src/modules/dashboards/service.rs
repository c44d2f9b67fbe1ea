use std::collections::HashMap;

use anyhow::Context;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::academics::model::{SchoolClass, Subject};
use crate::modules::academics::service::AcademicService;
use crate::modules::announcements::service::AnnouncementService;
use crate::modules::events::service::EventService;
use crate::modules::students::model::Student;
use crate::modules::teachers::model::Teacher;
use crate::utils::aggregates::{
    absence_count, attendance_percentage, attendance_standing, average_grade, grade_standing,
};
use crate::utils::errors::AppError;

use super::model::{
    AttendanceReport, AttendanceRow, ClassPerformanceRow, CoordinatorDashboard, RegistrarDashboard,
    ReportCard, ReportCardRow, StudentDashboard, StudentSchedule, TeacherDashboard,
};

/// How many announcements the student dashboard shows.
const DASHBOARD_ANNOUNCEMENTS: i64 = 3;

pub struct DashboardService;

impl DashboardService {
    /// All grade values reachable through the student's enrollments.
    #[instrument(skip(db))]
    pub async fn grade_values(db: &PgPool, student_id: Uuid) -> Result<Vec<Decimal>, AppError> {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT g.value FROM grades g
             JOIN enrollments e ON e.id = g.enrollment_id
             WHERE e.student_id = $1",
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch grade values")
        .map_err(AppError::database)
    }

    /// Attendance flags reachable through the student's enrollments.
    #[instrument(skip(db))]
    async fn presence_flags(db: &PgPool, student_id: Uuid) -> Result<Vec<bool>, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT a.present FROM attendance a
             JOIN enrollments e ON e.id = a.enrollment_id
             WHERE e.student_id = $1",
        )
        .bind(student_id)
        .fetch_all(db)
        .await
        .context("Failed to fetch attendance flags")
        .map_err(AppError::database)
    }

    #[instrument(skip(db, student))]
    pub async fn student_dashboard(
        db: &PgPool,
        student: Student,
    ) -> Result<StudentDashboard, AppError> {
        let values = Self::grade_values(db, student.id).await?;
        let flags = Self::presence_flags(db, student.id).await?;
        let announcements =
            AnnouncementService::latest_for_students(db, DASHBOARD_ANNOUNCEMENTS).await?;

        Ok(StudentDashboard {
            average: average_grade(&values),
            absences: absence_count(&flags),
            announcements,
            student,
        })
    }

    /// Subjects of the student's current course, or empty without a class.
    async fn current_subjects(
        db: &PgPool,
        student: &Student,
    ) -> Result<(Option<SchoolClass>, Vec<Subject>), AppError> {
        let Some(class_id) = student.current_class_id else {
            return Ok((None, Vec::new()));
        };
        let class = AcademicService::get_class(db, class_id).await?;
        let subjects = AcademicService::list_subjects_for_course(db, class.course_id).await?;
        Ok((Some(class), subjects))
    }

    #[instrument(skip(db, student))]
    pub async fn report_card(db: &PgPool, student: &Student) -> Result<ReportCard, AppError> {
        let (class, subjects) = Self::current_subjects(db, student).await?;

        let grade_rows = sqlx::query_as::<_, (Uuid, Decimal)>(
            "SELECT g.subject_id, g.value FROM grades g
             JOIN enrollments e ON e.id = g.enrollment_id
             WHERE e.student_id = $1
             ORDER BY g.recorded_on",
        )
        .bind(student.id)
        .fetch_all(db)
        .await
        .context("Failed to fetch grades")
        .map_err(AppError::database)?;

        let mut by_subject: HashMap<Uuid, Vec<Decimal>> = HashMap::new();
        for (subject_id, value) in grade_rows {
            by_subject.entry(subject_id).or_default().push(value);
        }

        let rows = subjects
            .into_iter()
            .map(|subject| {
                let grades = by_subject.remove(&subject.id).unwrap_or_default();
                ReportCardRow {
                    average: average_grade(&grades),
                    standing: grade_standing(&grades),
                    subject_id: subject.id,
                    subject: subject.name,
                    grades,
                }
            })
            .collect();

        Ok(ReportCard {
            student_name: student.full_name.clone(),
            enrollment_number: student.enrollment_number.clone(),
            class_code: class.map(|c| c.code),
            rows,
        })
    }

    #[instrument(skip(db, student))]
    pub async fn attendance_report(
        db: &PgPool,
        student: &Student,
    ) -> Result<AttendanceReport, AppError> {
        let (_, subjects) = Self::current_subjects(db, student).await?;

        let counts = sqlx::query_as::<_, (Uuid, i64, i64)>(
            "SELECT a.subject_id,
                    COUNT(*),
                    COUNT(*) FILTER (WHERE NOT a.present)
             FROM attendance a
             JOIN enrollments e ON e.id = a.enrollment_id
             WHERE e.student_id = $1
             GROUP BY a.subject_id",
        )
        .bind(student.id)
        .fetch_all(db)
        .await
        .context("Failed to count attendance")
        .map_err(AppError::database)?;

        let by_subject: HashMap<Uuid, (i64, i64)> = counts
            .into_iter()
            .map(|(subject_id, total, absences)| (subject_id, (total, absences)))
            .collect();

        let rows = subjects
            .into_iter()
            .map(|subject| {
                let (total, absences) = by_subject.get(&subject.id).copied().unwrap_or((0, 0));
                let percentage = attendance_percentage(total, absences);
                AttendanceRow {
                    subject_id: subject.id,
                    subject: subject.name,
                    total_lessons: total,
                    absences,
                    percentage,
                    standing: attendance_standing(percentage),
                }
            })
            .collect();

        Ok(AttendanceReport {
            student_name: student.full_name.clone(),
            enrollment_number: student.enrollment_number.clone(),
            rows,
        })
    }

    #[instrument(skip(db, student))]
    pub async fn schedule(db: &PgPool, student: &Student) -> Result<StudentSchedule, AppError> {
        let (class, subjects) = Self::current_subjects(db, student).await?;

        let course_name = match &class {
            Some(class) => sqlx::query_scalar::<_, String>(
                "SELECT name FROM courses WHERE id = $1",
            )
            .bind(class.course_id)
            .fetch_optional(db)
            .await?,
            None => None,
        };

        Ok(StudentSchedule {
            class,
            course_name,
            subjects,
        })
    }

    #[instrument(skip(db, teacher))]
    pub async fn teacher_dashboard(
        db: &PgPool,
        teacher: &Teacher,
    ) -> Result<TeacherDashboard, AppError> {
        let classes = sqlx::query_as::<_, SchoolClass>(
            "SELECT c.id, c.code, c.term, c.shift, c.course_id
             FROM classes c
             JOIN teacher_classes tc ON tc.class_id = c.id
             WHERE tc.teacher_id = $1
             ORDER BY c.term DESC, c.code",
        )
        .bind(teacher.id)
        .fetch_all(db)
        .await
        .context("Failed to list the teacher's classes")
        .map_err(AppError::database)?;

        let total_students = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT e.student_id)
             FROM enrollments e
             JOIN teacher_classes tc ON tc.class_id = e.class_id
             WHERE tc.teacher_id = $1",
        )
        .bind(teacher.id)
        .fetch_one(db)
        .await?;

        let grades_recorded = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)
             FROM grades g
             JOIN enrollments e ON e.id = g.enrollment_id
             JOIN teacher_classes tc ON tc.class_id = e.class_id
             WHERE tc.teacher_id = $1",
        )
        .bind(teacher.id)
        .fetch_one(db)
        .await?;

        let grades_this_month = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)
             FROM grades g
             JOIN enrollments e ON e.id = g.enrollment_id
             JOIN teacher_classes tc ON tc.class_id = e.class_id
             WHERE tc.teacher_id = $1
               AND date_trunc('month', g.recorded_on) = date_trunc('month', CURRENT_DATE)",
        )
        .bind(teacher.id)
        .fetch_one(db)
        .await?;

        Ok(TeacherDashboard {
            teacher_name: teacher.full_name.clone(),
            classes,
            total_students,
            grades_recorded,
            grades_this_month,
        })
    }

    #[instrument(skip(db))]
    pub async fn registrar_dashboard(db: &PgPool) -> Result<RegistrarDashboard, AppError> {
        let total_students = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(db)
            .await?;
        let total_teachers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(db)
            .await?;
        let total_classes = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes")
            .fetch_one(db)
            .await?;
        let pending_documents = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM documents WHERE status = 'pending'",
        )
        .fetch_one(db)
        .await?;
        let pending_justifications = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM absence_justifications WHERE status = 'pending'",
        )
        .fetch_one(db)
        .await?;

        Ok(RegistrarDashboard {
            total_students,
            total_teachers,
            total_classes,
            pending_documents,
            pending_justifications,
        })
    }

    #[instrument(skip(db))]
    pub async fn coordinator_dashboard(db: &PgPool) -> Result<CoordinatorDashboard, AppError> {
        let total_classes = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes")
            .fetch_one(db)
            .await?;
        let total_students = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(db)
            .await?;
        let total_teachers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(db)
            .await?;

        let upcoming_events = EventService::list_events(db).await?;
        let now = chrono::Utc::now();
        let upcoming_events = upcoming_events
            .into_iter()
            .filter(|event| event.starts_at >= now)
            .take(5)
            .collect();

        Ok(CoordinatorDashboard {
            total_classes,
            total_students,
            total_teachers,
            upcoming_events,
        })
    }

    /// Per-class performance for the coordination report screen.
    #[instrument(skip(db))]
    pub async fn class_performance(db: &PgPool) -> Result<Vec<ClassPerformanceRow>, AppError> {
        let classes = AcademicService::list_classes(db).await?;

        let enrolled: HashMap<Uuid, i64> = sqlx::query_as::<_, (Uuid, i64)>(
            "SELECT class_id, COUNT(*) FROM enrollments GROUP BY class_id",
        )
        .fetch_all(db)
        .await?
        .into_iter()
        .collect();

        let averages: HashMap<Uuid, Decimal> = sqlx::query_as::<_, (Uuid, Decimal)>(
            "SELECT e.class_id, AVG(g.value)
             FROM grades g
             JOIN enrollments e ON e.id = g.enrollment_id
             GROUP BY e.class_id",
        )
        .fetch_all(db)
        .await?
        .into_iter()
        .collect();

        let attendance: HashMap<Uuid, (i64, i64)> = sqlx::query_as::<_, (Uuid, i64, i64)>(
            "SELECT e.class_id,
                    COUNT(*),
                    COUNT(*) FILTER (WHERE NOT a.present)
             FROM attendance a
             JOIN enrollments e ON e.id = a.enrollment_id
             GROUP BY e.class_id",
        )
        .fetch_all(db)
        .await?
        .into_iter()
        .map(|(class_id, total, absences)| (class_id, (total, absences)))
        .collect();

        Ok(classes
            .into_iter()
            .map(|class| {
                let (total, absences) = attendance.get(&class.id).copied().unwrap_or((0, 0));
                ClassPerformanceRow {
                    enrolled: enrolled.get(&class.id).copied().unwrap_or(0),
                    average: averages
                        .get(&class.id)
                        .copied()
                        .unwrap_or(Decimal::ZERO)
                        .round_dp(1),
                    attendance_percentage: attendance_percentage(total, absences),
                    class_id: class.id,
                    class_code: class.code,
                    term: class.term,
                }
            })
            .collect())
    }
}

//! View models for the role dashboards. These are the JSON equivalents
//! of what the original server-rendered screens displayed.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::academics::model::{SchoolClass, Subject};
use crate::modules::announcements::model::Announcement;
use crate::modules::events::model::CalendarEvent;
use crate::modules::students::model::Student;
use crate::utils::aggregates::{AttendanceStanding, GradeStanding};

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDashboard {
    pub student: Student,
    #[schema(value_type = f64)]
    pub average: Decimal,
    pub absences: i64,
    pub announcements: Vec<Announcement>,
}

/// One subject line of the report card.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportCardRow {
    pub subject_id: Uuid,
    pub subject: String,
    #[schema(value_type = Vec<f64>)]
    pub grades: Vec<Decimal>,
    #[schema(value_type = f64)]
    pub average: Decimal,
    pub standing: GradeStanding,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportCard {
    pub student_name: String,
    pub enrollment_number: String,
    /// Class code, or None when the student has no current class.
    pub class_code: Option<String>,
    pub rows: Vec<ReportCardRow>,
}

/// One subject line of the attendance detail.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceRow {
    pub subject_id: Uuid,
    pub subject: String,
    pub total_lessons: i64,
    pub absences: i64,
    pub percentage: i32,
    pub standing: AttendanceStanding,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceReport {
    pub student_name: String,
    pub enrollment_number: String,
    pub rows: Vec<AttendanceRow>,
}

/// The student's schedule skeleton: current class plus its subjects.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentSchedule {
    pub class: Option<SchoolClass>,
    pub course_name: Option<String>,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherDashboard {
    pub teacher_name: String,
    pub classes: Vec<SchoolClass>,
    pub total_students: i64,
    pub grades_recorded: i64,
    pub grades_this_month: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrarDashboard {
    pub total_students: i64,
    pub total_teachers: i64,
    pub total_classes: i64,
    pub pending_documents: i64,
    pub pending_justifications: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoordinatorDashboard {
    pub total_classes: i64,
    pub total_students: i64,
    pub total_teachers: i64,
    pub upcoming_events: Vec<CalendarEvent>,
}

/// One class line of the coordination performance report.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClassPerformanceRow {
    pub class_id: Uuid,
    pub class_code: String,
    pub term: String,
    pub enrolled: i64,
    #[schema(value_type = f64)]
    pub average: Decimal,
    pub attendance_percentage: i32,
}

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::academics::model::{
    AcademicOverview, Course, CreateClassDto, CreateCourseDto, CreateSubjectDto, SchoolClass,
    Subject, UpdateClassDto, UpdateCourseDto,
};
use crate::modules::announcements::model::{Announcement, CreateAnnouncementDto};
use crate::modules::attendance::model::{Attendance, AttendanceBatchDto, AttendanceEntryDto};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, MessageResponse, Role};
use crate::modules::dashboards::model::{
    AttendanceReport, AttendanceRow, ClassPerformanceRow, CoordinatorDashboard,
    RegistrarDashboard, ReportCard, ReportCardRow, StudentDashboard, StudentSchedule,
    TeacherDashboard,
};
use crate::modules::documents::model::{CreateDocumentDto, Document, DocumentStatus};
use crate::modules::enrollments::model::{
    CreateEnrollmentDto, Enrollment, RosterEntry, UpdateEnrollmentStatusDto,
};
use crate::modules::events::model::{CalendarEvent, CreateEventDto, UpdateEventDto};
use crate::modules::grades::model::{
    CreateGradeDto, Grade, GradeBatchDto, GradeEntryDto, UpdateGradeDto,
};
use crate::modules::justifications::model::{AbsenceJustification, SubmitJustificationDto};
use crate::modules::materials::model::Material;
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, ProvisionAccountDto, Student, UpdateStudentDto,
};
use crate::modules::teachers::model::{
    AssignTeacherDto, CreateTeacherDto, PaginatedTeachersResponse, Teacher, UpdateTeacherDto,
};
use crate::modules::users::model::{
    AdminDashboard, AssignGroupsDto, CreateUserDto, PaginatedUsersResponse, User,
};
use crate::utils::aggregates::{AttendanceStanding, GradeStanding};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::dashboards::controller::student_dashboard,
        crate::modules::dashboards::controller::student_report_card,
        crate::modules::dashboards::controller::export_report_card_pdf,
        crate::modules::dashboards::controller::student_attendance,
        crate::modules::dashboards::controller::export_attendance_pdf,
        crate::modules::dashboards::controller::export_attendance_excel,
        crate::modules::dashboards::controller::student_schedule,
        crate::modules::dashboards::controller::teacher_dashboard,
        crate::modules::dashboards::controller::registrar_dashboard,
        crate::modules::dashboards::controller::coordinator_dashboard,
        crate::modules::dashboards::controller::class_performance_report,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::list_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::assign_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::academics::controller::academic_overview,
        crate::modules::academics::controller::create_course,
        crate::modules::academics::controller::list_courses,
        crate::modules::academics::controller::update_course,
        crate::modules::academics::controller::delete_course,
        crate::modules::academics::controller::create_subject,
        crate::modules::academics::controller::list_course_subjects,
        crate::modules::academics::controller::delete_subject,
        crate::modules::academics::controller::create_class,
        crate::modules::academics::controller::list_classes,
        crate::modules::academics::controller::update_class,
        crate::modules::academics::controller::delete_class,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::list_student_enrollments,
        crate::modules::enrollments::controller::class_roster,
        crate::modules::enrollments::controller::update_enrollment_status,
        crate::modules::enrollments::controller::delete_enrollment,
        crate::modules::grades::controller::create_grade,
        crate::modules::grades::controller::record_grade_batch,
        crate::modules::grades::controller::list_grades,
        crate::modules::grades::controller::get_grade,
        crate::modules::grades::controller::update_grade,
        crate::modules::grades::controller::delete_grade,
        crate::modules::attendance::controller::record_attendance_sheet,
        crate::modules::attendance::controller::list_attendance,
        crate::modules::announcements::controller::create_announcement,
        crate::modules::announcements::controller::list_announcements,
        crate::modules::announcements::controller::delete_announcement,
        crate::modules::events::controller::list_events,
        crate::modules::events::controller::create_event,
        crate::modules::events::controller::update_event,
        crate::modules::events::controller::delete_event,
        crate::modules::documents::controller::create_document,
        crate::modules::documents::controller::list_documents,
        crate::modules::documents::controller::issue_document,
        crate::modules::documents::controller::deliver_document,
        crate::modules::documents::controller::download_document,
        crate::modules::materials::controller::upload_material,
        crate::modules::materials::controller::list_materials,
        crate::modules::materials::controller::download_material,
        crate::modules::materials::controller::delete_material,
        crate::modules::justifications::controller::submit_justification,
        crate::modules::justifications::controller::list_own_justifications,
        crate::modules::justifications::controller::list_justifications,
        crate::modules::justifications::controller::approve_justification,
        crate::modules::justifications::controller::reject_justification,
        crate::modules::users::controller::admin_dashboard,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::assign_groups,
        crate::modules::users::controller::delete_user,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            LoginRequest,
            LoginResponse,
            Role,
            User,
            CreateUserDto,
            AssignGroupsDto,
            PaginatedUsersResponse,
            AdminDashboard,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            ProvisionAccountDto,
            PaginatedStudentsResponse,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            AssignTeacherDto,
            PaginatedTeachersResponse,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            Subject,
            CreateSubjectDto,
            SchoolClass,
            CreateClassDto,
            UpdateClassDto,
            AcademicOverview,
            Enrollment,
            CreateEnrollmentDto,
            UpdateEnrollmentStatusDto,
            RosterEntry,
            Grade,
            CreateGradeDto,
            UpdateGradeDto,
            GradeEntryDto,
            GradeBatchDto,
            Attendance,
            AttendanceEntryDto,
            AttendanceBatchDto,
            Announcement,
            CreateAnnouncementDto,
            CalendarEvent,
            CreateEventDto,
            UpdateEventDto,
            Document,
            DocumentStatus,
            CreateDocumentDto,
            Material,
            AbsenceJustification,
            SubmitJustificationDto,
            StudentDashboard,
            ReportCard,
            ReportCardRow,
            AttendanceReport,
            AttendanceRow,
            StudentSchedule,
            TeacherDashboard,
            RegistrarDashboard,
            CoordinatorDashboard,
            ClassPerformanceRow,
            GradeStanding,
            AttendanceStanding,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and role resolution"),
        (name = "Dashboards", description = "Role-specific dashboard views"),
        (name = "Exports", description = "PDF and Excel report exports"),
        (name = "Students", description = "Student record management"),
        (name = "Teachers", description = "Teacher record management"),
        (name = "Academics", description = "Courses, subjects and classes"),
        (name = "Enrollments", description = "Class enrollment management"),
        (name = "Grades", description = "Grade recording and the JSON grade resource"),
        (name = "Attendance", description = "Attendance sheets"),
        (name = "Announcements", description = "School announcements"),
        (name = "Calendar", description = "School calendar events"),
        (name = "Documents", description = "Student document lifecycle"),
        (name = "Materials", description = "Course material uploads"),
        (name = "Justifications", description = "Absence justification workflow"),
        (name = "Admin", description = "Account and group administration")
    ),
    info(
        title = "Nexus API",
        version = "0.1.0",
        description = "School management API: role-routed dashboards, grades, attendance, documents and report exports.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

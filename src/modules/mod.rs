pub mod academics;
pub mod announcements;
pub mod attendance;
pub mod auth;
pub mod dashboards;
pub mod documents;
pub mod enrollments;
pub mod events;
pub mod grades;
pub mod justifications;
pub mod materials;
pub mod students;
pub mod teachers;
pub mod users;

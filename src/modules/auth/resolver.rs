//! Role resolution for dashboard routing.
//!
//! Runs exactly once per login over a snapshot of the principal's linked
//! records and group memberships. The resolved role is embedded in the
//! JWT so request handling never re-probes the database for it.

use super::model::{Landing, Role};

/// Everything the resolver needs to know about a principal, loaded in one
/// pass by the auth service.
#[derive(Debug, Clone, Default)]
pub struct PrincipalSnapshot {
    pub is_superuser: bool,
    pub has_student_profile: bool,
    pub has_teacher_profile: bool,
    /// An unlinked student record shares this principal's email.
    pub unlinked_student_email_match: bool,
    /// An unlinked teacher record shares this principal's email.
    pub unlinked_teacher_email_match: bool,
    pub in_registrar_group: bool,
    pub in_coordination_group: bool,
}

/// Legacy-data linkage the caller must perform before issuing the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    LinkStudentByEmail,
    LinkTeacherByEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub role: Option<Role>,
    pub landing: Landing,
    pub link: Option<LinkAction>,
}

/// Resolve which dashboard a principal lands on.
///
/// Precedence: superuser, linked student, linked teacher, email-match
/// link-up, registrar group, coordination group, generic home. A
/// principal linked to both a student and a teacher record resolves to
/// Student; the ordering is deliberate and covered by tests.
pub fn resolve(snapshot: &PrincipalSnapshot) -> Resolution {
    if snapshot.is_superuser {
        return Resolution {
            role: Some(Role::Administrator),
            landing: Landing::AdminDashboard,
            link: None,
        };
    }

    if snapshot.has_student_profile {
        return Resolution {
            role: Some(Role::Student),
            landing: Landing::StudentDashboard,
            link: None,
        };
    }

    if snapshot.has_teacher_profile {
        return Resolution {
            role: Some(Role::Teacher),
            landing: Landing::TeacherDashboard,
            link: None,
        };
    }

    if snapshot.unlinked_student_email_match {
        return Resolution {
            role: Some(Role::Student),
            landing: Landing::StudentDashboard,
            link: Some(LinkAction::LinkStudentByEmail),
        };
    }

    if snapshot.unlinked_teacher_email_match {
        return Resolution {
            role: Some(Role::Teacher),
            landing: Landing::TeacherDashboard,
            link: Some(LinkAction::LinkTeacherByEmail),
        };
    }

    if snapshot.in_registrar_group {
        return Resolution {
            role: Some(Role::Registrar),
            landing: Landing::RegistrarDashboard,
            link: None,
        };
    }

    if snapshot.in_coordination_group {
        return Resolution {
            role: Some(Role::Coordinator),
            landing: Landing::CoordinatorDashboard,
            link: None,
        };
    }

    Resolution {
        role: None,
        landing: Landing::Home,
        link: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superuser_wins_over_everything() {
        let snapshot = PrincipalSnapshot {
            is_superuser: true,
            has_student_profile: true,
            has_teacher_profile: true,
            in_registrar_group: true,
            ..Default::default()
        };
        let resolution = resolve(&snapshot);
        assert_eq!(resolution.role, Some(Role::Administrator));
        assert_eq!(resolution.landing, Landing::AdminDashboard);
        assert_eq!(resolution.link, None);
    }

    #[test]
    fn student_precedes_teacher_on_double_link() {
        // Data anomaly: both profiles linked. The student check runs
        // first, so Student wins.
        let snapshot = PrincipalSnapshot {
            has_student_profile: true,
            has_teacher_profile: true,
            ..Default::default()
        };
        let resolution = resolve(&snapshot);
        assert_eq!(resolution.role, Some(Role::Student));
        assert_eq!(resolution.landing, Landing::StudentDashboard);
    }

    #[test]
    fn linked_teacher_routes_to_teacher_dashboard() {
        let snapshot = PrincipalSnapshot {
            has_teacher_profile: true,
            ..Default::default()
        };
        let resolution = resolve(&snapshot);
        assert_eq!(resolution.role, Some(Role::Teacher));
        assert_eq!(resolution.link, None);
    }

    #[test]
    fn email_match_requests_linkage() {
        let snapshot = PrincipalSnapshot {
            unlinked_student_email_match: true,
            ..Default::default()
        };
        let resolution = resolve(&snapshot);
        assert_eq!(resolution.role, Some(Role::Student));
        assert_eq!(resolution.link, Some(LinkAction::LinkStudentByEmail));

        let snapshot = PrincipalSnapshot {
            unlinked_teacher_email_match: true,
            ..Default::default()
        };
        let resolution = resolve(&snapshot);
        assert_eq!(resolution.role, Some(Role::Teacher));
        assert_eq!(resolution.link, Some(LinkAction::LinkTeacherByEmail));
    }

    #[test]
    fn existing_link_suppresses_email_match_linkage() {
        let snapshot = PrincipalSnapshot {
            has_student_profile: true,
            unlinked_teacher_email_match: true,
            ..Default::default()
        };
        let resolution = resolve(&snapshot);
        assert_eq!(resolution.role, Some(Role::Student));
        assert_eq!(resolution.link, None);
    }

    #[test]
    fn group_fallbacks_in_order() {
        let snapshot = PrincipalSnapshot {
            in_registrar_group: true,
            in_coordination_group: true,
            ..Default::default()
        };
        assert_eq!(resolve(&snapshot).role, Some(Role::Registrar));

        let snapshot = PrincipalSnapshot {
            in_coordination_group: true,
            ..Default::default()
        };
        let resolution = resolve(&snapshot);
        assert_eq!(resolution.role, Some(Role::Coordinator));
        assert_eq!(resolution.landing, Landing::CoordinatorDashboard);
    }

    #[test]
    fn nobody_home() {
        let resolution = resolve(&PrincipalSnapshot::default());
        assert_eq!(resolution.role, None);
        assert_eq!(resolution.landing, Landing::Home);
        assert_eq!(resolution.link, None);
    }
}

//! Role-resolution precedence, exercised through the public API.

use nexus::modules::auth::model::{Landing, Role};
use nexus::modules::auth::resolver::{LinkAction, PrincipalSnapshot, resolve};

#[test]
fn superuser_routes_to_admin_regardless_of_profile_links() {
    // A superuser who also has a student profile still lands on the
    // administrator dashboard.
    let snapshot = PrincipalSnapshot {
        is_superuser: true,
        has_student_profile: true,
        ..Default::default()
    };
    let resolution = resolve(&snapshot);
    assert_eq!(resolution.role, Some(Role::Administrator));
    assert_eq!(resolution.landing.as_path(), "/admin/");
}

#[test]
fn double_profile_anomaly_resolves_to_student() {
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
fn each_single_source_routes_to_its_dashboard() {
    let cases: Vec<(PrincipalSnapshot, Role, &str)> = vec![
        (
            PrincipalSnapshot {
                has_student_profile: true,
                ..Default::default()
            },
            Role::Student,
            "/dashboard/aluno/",
        ),
        (
            PrincipalSnapshot {
                has_teacher_profile: true,
                ..Default::default()
            },
            Role::Teacher,
            "/dashboard/professor/",
        ),
        (
            PrincipalSnapshot {
                in_registrar_group: true,
                ..Default::default()
            },
            Role::Registrar,
            "/dashboard/secretaria/",
        ),
        (
            PrincipalSnapshot {
                in_coordination_group: true,
                ..Default::default()
            },
            Role::Coordinator,
            "/dashboard/coordenacao/",
        ),
    ];

    for (snapshot, role, path) in cases {
        let resolution = resolve(&snapshot);
        assert_eq!(resolution.role, Some(role));
        assert_eq!(resolution.landing.as_path(), path);
        assert_eq!(resolution.link, None);
    }
}

#[test]
fn email_match_precedes_group_membership_and_links_up() {
    // An unlinked student record matching the email wins over a group.
    let snapshot = PrincipalSnapshot {
        unlinked_student_email_match: true,
        in_registrar_group: true,
        ..Default::default()
    };
    let resolution = resolve(&snapshot);
    assert_eq!(resolution.role, Some(Role::Student));
    assert_eq!(resolution.link, Some(LinkAction::LinkStudentByEmail));
}

#[test]
fn unresolvable_principal_lands_on_home() {
    let resolution = resolve(&PrincipalSnapshot::default());
    assert_eq!(resolution.role, None);
    assert_eq!(resolution.landing, Landing::Home);
}

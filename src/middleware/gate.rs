//! The permission gate.
//!
//! One declarative table maps URL namespaces to the roles allowed in
//! them; a single middleware consults it for every request. Keeping the
//! table in one place (instead of per-view checks) is what prevents the
//! per-handler predicates from drifting apart.
//!
//! A failed check is not an error response: the caller is redirected to
//! the home view with a transient flash cookie, whatever the cause
//! (wrong role, no role, missing or invalid token).

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::model::Role;
use crate::state::AppState;
use crate::utils::flash;

pub struct RoutePolicy {
    pub prefix: &'static str,
    pub allowed: &'static [Role],
}

/// Namespace access table. Prefix matching; first hit wins.
/// Administrators pass every gate, so they are not repeated per row.
pub const ROUTE_POLICIES: &[RoutePolicy] = &[
    RoutePolicy {
        prefix: "/dashboard/aluno",
        allowed: &[Role::Student],
    },
    RoutePolicy {
        prefix: "/dashboard/professor",
        allowed: &[Role::Teacher],
    },
    RoutePolicy {
        prefix: "/dashboard/secretaria",
        allowed: &[Role::Registrar],
    },
    RoutePolicy {
        prefix: "/dashboard/coordenacao",
        allowed: &[Role::Coordinator],
    },
    RoutePolicy {
        prefix: "/admin",
        allowed: &[Role::Administrator],
    },
    RoutePolicy {
        prefix: "/api",
        allowed: &[Role::Registrar, Role::Administrator],
    },
];

/// Look up the roles required for a path, if it is gated at all.
pub fn policy_for(path: &str) -> Option<&'static RoutePolicy> {
    ROUTE_POLICIES.iter().find(|policy| {
        path == policy.prefix
            || path
                .strip_prefix(policy.prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Whether a principal with `role` may enter a namespace.
pub fn is_allowed(role: Option<Role>, policy: &RoutePolicy) -> bool {
    match role {
        Some(Role::Administrator) => true,
        Some(role) => policy.allowed.contains(&role),
        None => false,
    }
}

/// Gate middleware applied to the whole protected subtree.
pub async fn permission_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    let Some(policy) = policy_for(&path) else {
        return next.run(req).await;
    };

    let (mut parts, body) = req.into_parts();
    match AuthUser::from_request_parts(&mut parts, &state).await {
        Ok(user) if is_allowed(user.role(), policy) => {
            next.run(Request::from_parts(parts, body)).await
        }
        Ok(user) => {
            warn!(
                path = %path,
                role = user.role().map(|r| r.as_str()).unwrap_or("none"),
                "Denied access; redirecting home"
            );
            flash::redirect_home(flash::PERMISSION_DENIED)
        }
        Err(_) => {
            warn!(path = %path, "Unauthenticated access; redirecting home");
            flash::redirect_home(flash::PERMISSION_DENIED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_lookup_matches_namespaces() {
        assert!(policy_for("/dashboard/aluno/").is_some());
        assert!(policy_for("/dashboard/aluno/boletim/pdf").is_some());
        assert!(policy_for("/dashboard/secretaria/alunos").is_some());
        assert!(policy_for("/api/students").is_some());
        assert!(policy_for("/admin/users").is_some());

        assert!(policy_for("/").is_none());
        assert!(policy_for("/auth/login").is_none());
        assert!(policy_for("/health").is_none());
        // Prefixes must match on segment boundaries.
        assert!(policy_for("/apiary").is_none());
        assert!(policy_for("/administrator-blog").is_none());
    }

    #[test]
    fn administrator_passes_every_gate() {
        for policy in ROUTE_POLICIES {
            assert!(is_allowed(Some(Role::Administrator), policy));
        }
    }

    #[test]
    fn roles_stay_inside_their_namespace() {
        let student_ns = policy_for("/dashboard/aluno/").unwrap();
        assert!(is_allowed(Some(Role::Student), student_ns));
        assert!(!is_allowed(Some(Role::Teacher), student_ns));
        assert!(!is_allowed(Some(Role::Registrar), student_ns));

        let registrar_ns = policy_for("/dashboard/secretaria/").unwrap();
        assert!(is_allowed(Some(Role::Registrar), registrar_ns));
        assert!(!is_allowed(Some(Role::Student), registrar_ns));

        let api_ns = policy_for("/api/grades").unwrap();
        assert!(is_allowed(Some(Role::Registrar), api_ns));
        assert!(!is_allowed(Some(Role::Teacher), api_ns));
    }

    #[test]
    fn no_role_is_denied_everywhere() {
        for policy in ROUTE_POLICIES {
            assert!(!is_allowed(None, policy));
        }
    }
}

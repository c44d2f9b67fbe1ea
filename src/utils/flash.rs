//! Transient flash messages carried across the soft-redirect that every
//! denied or broken dashboard request produces.
//!
//! Denials never surface as 401/403; the browser is bounced to the home
//! view with a short-lived cookie naming the reason, which the home view
//! reports once and clears.

use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Redirect, Response};

pub const FLASH_COOKIE: &str = "nexus_flash";

/// Reason slugs kept cookie-safe on purpose: no spaces, no encoding.
pub const PERMISSION_DENIED: &str = "permission-denied";
pub const PROFILE_MISSING: &str = "profile-missing";

/// Human-readable text for a flash slug, used by the home view.
pub fn describe(slug: &str) -> Option<&'static str> {
    match slug {
        PERMISSION_DENIED => Some("You do not have permission to access that area."),
        PROFILE_MISSING => Some("No profile is linked to your account. Contact the registrar."),
        _ => None,
    }
}

/// Redirect to the home view carrying a flash reason.
pub fn redirect_home(slug: &'static str) -> Response {
    let mut response = Redirect::to("/").into_response();
    let cookie = format!("{}={}; Path=/; Max-Age=60", FLASH_COOKIE, slug);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    response
}

/// Header value that clears the flash cookie.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("nexus_flash=; Path=/; Max-Age=0")
}

/// Extract the flash slug from a Cookie request header, if present.
pub fn read_from_cookie_header(raw: &str) -> Option<String> {
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_carries_flash_cookie() {
        let response = redirect_home(PERMISSION_DENIED);
        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(
            cookie
                .to_str()
                .unwrap()
                .starts_with("nexus_flash=permission-denied")
        );
    }

    #[test]
    fn cookie_header_parsing() {
        assert_eq!(
            read_from_cookie_header("a=b; nexus_flash=profile-missing; c=d"),
            Some("profile-missing".to_string())
        );
        assert_eq!(read_from_cookie_header("a=b; c=d"), None);
    }

    #[test]
    fn known_slugs_have_text() {
        assert!(describe(PERMISSION_DENIED).is_some());
        assert!(describe(PROFILE_MISSING).is_some());
        assert!(describe("something-else").is_none());
    }
}

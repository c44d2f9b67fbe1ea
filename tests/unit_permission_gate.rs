//! Every role-restricted namespace must answer a principal lacking the
//! role with a soft redirect to the home view, never an error status.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{lazy_test_state, token_for};
use nexus::modules::auth::model::Role;
use nexus::router::init_router;

async fn request_with_role(path: &str, role: Option<Role>) -> axum::response::Response {
    let app = init_router(lazy_test_state());
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", token_for(role)),
        )
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

fn assert_redirects_home(response: &axum::response::Response) {
    assert!(
        response.status().is_redirection(),
        "expected redirect, got {}",
        response.status()
    );
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("flash cookie")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("nexus_flash=permission-denied"));
}

#[tokio::test]
async fn student_cannot_enter_registrar_namespace() {
    let response = request_with_role("/dashboard/secretaria/", Some(Role::Student)).await;
    assert_redirects_home(&response);
}

#[tokio::test]
async fn teacher_cannot_enter_student_namespace() {
    let response = request_with_role("/dashboard/aluno/boletim", Some(Role::Teacher)).await;
    assert_redirects_home(&response);
}

#[tokio::test]
async fn registrar_cannot_enter_admin_namespace() {
    let response = request_with_role("/admin/users", Some(Role::Registrar)).await;
    assert_redirects_home(&response);
}

#[tokio::test]
async fn coordinator_cannot_enter_api_namespace() {
    let response = request_with_role("/api/students", Some(Role::Coordinator)).await;
    assert_redirects_home(&response);
}

#[tokio::test]
async fn principal_without_role_is_redirected_everywhere() {
    for path in [
        "/dashboard/aluno/",
        "/dashboard/professor/",
        "/dashboard/secretaria/",
        "/dashboard/coordenacao/",
        "/admin/",
        "/api/grades",
    ] {
        let response = request_with_role(path, None).await;
        assert_redirects_home(&response);
    }
}

#[tokio::test]
async fn missing_token_redirects_instead_of_401() {
    let app = init_router(lazy_test_state());
    let request = Request::builder()
        .method("GET")
        .uri("/dashboard/professor/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_redirects_home(&response);
}

#[tokio::test]
async fn garbage_token_redirects_instead_of_401() {
    let app = init_router(lazy_test_state());
    let request = Request::builder()
        .method("GET")
        .uri("/dashboard/coordenacao/")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_redirects_home(&response);
}

#[tokio::test]
async fn home_reports_and_clears_the_flash() {
    let app = init_router(lazy_test_state());
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header(header::COOKIE, "nexus_flash=permission-denied")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let clears = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("clearing cookie")
        .to_str()
        .unwrap();
    assert!(clears.contains("Max-Age=0"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("permission")
    );
}

#[tokio::test]
async fn home_without_flash_has_no_message() {
    let app = init_router(lazy_test_state());
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body["message"].is_null());
}

#[tokio::test]
async fn public_routes_are_not_gated() {
    let app = init_router(lazy_test_state());
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

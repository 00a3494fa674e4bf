//! Response-policy tests against an in-process service.
//!
//! A real axum listener serves canned responses so the client's
//! 200/404/other handling is exercised over actual HTTP.

use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use idp_api_client::{ApiError, IdentityApiClient};
use idp_api_types::UserModel;
use idp_model::User;
use uuid::Uuid;

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

fn sample_user() -> UserModel {
    UserModel::from(User::new("alice").with_email("alice@example.com"))
}

#[tokio::test]
async fn ok_with_body_deserializes() {
    let user = sample_user();
    let expected = user.clone();
    let router = Router::new().route(
        "/api/identity/user/{id}",
        get(move || async move { Json(Some(user.clone())) }),
    );
    let base = spawn(router).await;

    let client = IdentityApiClient::new(base).unwrap();
    let found = client.find_user_by_id(expected.id).await.unwrap();
    assert_eq!(found, Some(expected));
}

#[tokio::test]
async fn ok_with_null_body_is_none() {
    let router = Router::new().route(
        "/api/identity/user/{id}",
        get(|| async { Json(None::<UserModel>) }),
    );
    let base = spawn(router).await;

    let client = IdentityApiClient::new(base).unwrap();
    let found = client.find_user_by_id(Uuid::now_v7()).await.unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn not_found_is_default_not_an_error() {
    let router = Router::new()
        .route(
            "/api/identity/user/{id}",
            get(|| async { StatusCode::NOT_FOUND }),
        )
        .route(
            "/api/identity/user/{id}/claims",
            get(|| async { StatusCode::NOT_FOUND }),
        );
    let base = spawn(router).await;

    let client = IdentityApiClient::new(base).unwrap();
    let user_id = Uuid::now_v7();

    assert_eq!(client.find_user_by_id(user_id).await.unwrap(), None);
    assert!(client.get_user_claims(user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn other_status_raises_with_request_context() {
    let router = Router::new().route(
        "/api/identity/user/{id}",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn(router).await;

    let client = IdentityApiClient::new(base).unwrap();
    let user_id = Uuid::now_v7();
    let err = client.find_user_by_id(user_id).await.unwrap_err();

    match err {
        ApiError::Status {
            method,
            url,
            status,
            response_body,
            ..
        } => {
            assert_eq!(method, reqwest::Method::GET);
            assert!(url.contains(&format!("/api/identity/user/{user_id}")));
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(response_body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn void_operation_carries_request_body_on_failure() {
    let router = Router::new().route(
        "/api/identity/user",
        put(|| async { (StatusCode::CONFLICT, "stamp mismatch") }),
    );
    let base = spawn(router).await;

    let client = IdentityApiClient::new(base).unwrap();
    let user = sample_user();
    let err = client.update_user(&user).await.unwrap_err();

    match err {
        ApiError::Status {
            method,
            status,
            request_body,
            ..
        } => {
            assert_eq!(method, reqwest::Method::PUT);
            assert_eq!(status, StatusCode::CONFLICT);
            let body = request_body.expect("request body captured");
            assert!(body.contains("alice"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn void_operation_ok_succeeds() {
    let router = Router::new().route("/api/identity/user", post(|| async { StatusCode::OK }));
    let base = spawn(router).await;

    let client = IdentityApiClient::new(base).unwrap();
    client.create_user(&sample_user()).await.unwrap();
}

#[tokio::test]
async fn is_user_in_role_compares_case_insensitively() {
    let router = Router::new().route(
        "/api/identity/user/{id}/roles",
        get(|| async { Json(vec!["Admin".to_string()]) }),
    );
    let base = spawn(router).await;

    let client = IdentityApiClient::new(base).unwrap();
    let user_id = Uuid::now_v7();

    assert!(client.is_user_in_role(user_id, "admin").await.unwrap());
    assert!(client.is_user_in_role(user_id, "ADMIN").await.unwrap());
    assert!(!client.is_user_in_role(user_id, "auditor").await.unwrap());
}

//! API-backed store tests against an in-process service.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use idp_api_client::IdentityApiClient;
use idp_api_types::{TokenModel, UserModel};
use idp_model::User;
use idp_stores::{ApiUserStore, StoreError, UserStore, UserTokenStore};
use tokio_util::sync::CancellationToken;

async fn spawn(router: Router) -> Arc<IdentityApiClient> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    Arc::new(IdentityApiClient::new(format!("http://{addr}")).expect("client"))
}

fn dead_client() -> Arc<IdentityApiClient> {
    // Never reached: the guards fire before any request is sent.
    Arc::new(IdentityApiClient::new("http://127.0.0.1:1").expect("client"))
}

#[tokio::test]
async fn cancelled_token_fails_fast_without_io() {
    let mut store = ApiUserStore::new(dead_client());
    let token = CancellationToken::new();
    token.cancel();

    let err = store.find_by_name("ALICE", &token).await.unwrap_err();
    assert!(matches!(err, StoreError::Cancelled));
}

#[tokio::test]
async fn blank_argument_is_rejected_before_io() {
    let mut store = ApiUserStore::new(dead_client());
    let token = CancellationToken::new();

    let err = store.find_by_name("   ", &token).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidArgument(_)));
}

#[tokio::test]
async fn malformed_user_id_is_rejected_before_io() {
    let mut store = ApiUserStore::new(dead_client());
    let token = CancellationToken::new();

    let err = store.find_by_id("not-a-uuid", &token).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidUserId(_)));
}

#[tokio::test]
async fn find_by_name_maps_the_wire_model() {
    let user = User::new("alice").with_email("alice@example.com");
    let model = UserModel::from(user.clone());
    let router = Router::new().route(
        "/api/identity/user/name",
        get(move || async move { Json(Some(model.clone())) }),
    );
    let client = spawn(router).await;

    let mut store = ApiUserStore::new(client);
    let token = CancellationToken::new();
    let found = store
        .find_by_name("ALICE", &token)
        .await
        .expect("find")
        .expect("present");

    assert_eq!(found.id, user.id.to_string());
    assert_eq!(found.user_name, "alice");
    assert_eq!(found.normalized_email.as_deref(), Some("ALICE@EXAMPLE.COM"));
}

#[tokio::test]
async fn get_token_picks_the_matching_entry() {
    let tokens = vec![
        TokenModel {
            login_provider: "authenticator".to_string(),
            name: "recovery".to_string(),
            value: Some("xyz".to_string()),
        },
        TokenModel {
            login_provider: "google".to_string(),
            name: "refresh".to_string(),
            value: Some("abc".to_string()),
        },
    ];
    let router = Router::new().route(
        "/api/identity/user/{id}/tokens",
        get(move || async move { Json(tokens.clone()) }),
    );
    let client = spawn(router).await;

    let mut store = ApiUserStore::new(client);
    let token = CancellationToken::new();
    let user = idp_stores::IdentityUser::new("alice");

    let value = store
        .get_token(&user, "google", "refresh", &token)
        .await
        .expect("get token");
    assert_eq!(value.as_deref(), Some("abc"));

    let missing = store
        .get_token(&user, "google", "access", &token)
        .await
        .expect("get token");
    assert!(missing.is_none());
}

//! Full-stack tests: the real client driving the real service.
//!
//! These run against a live `PostgreSQL` instance addressed by
//! `DATABASE_URL` and are ignored by default:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/identity_test cargo test -- --ignored
//! ```

use idp_api::{identity_router, ServiceState};
use idp_api_client::{ApiError, IdentityApiClient};
use idp_api_types::{RoleModel, UserModel};
use idp_model::{Role, User};
use sqlx::PgPool;
use uuid::Uuid;

async fn spawn_service() -> IdentityApiClient {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for ignored tests");
    let pool = PgPool::connect(&url).await.expect("connect");
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let app = identity_router().with_state(ServiceState::new(pool));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    IdentityApiClient::new(format!("http://{addr}")).expect("client")
}

fn unique_user() -> UserModel {
    let suffix = Uuid::now_v7().simple().to_string();
    UserModel::from(User::new(format!("user-{suffix}")).with_email(format!("{suffix}@example.com")))
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn user_round_trip_through_the_wire() {
    let client = spawn_service().await;
    let user = unique_user();

    client.create_user(&user).await.expect("create");

    let found = client
        .find_user_by_id(user.id)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(found, user);

    let by_name = client
        .find_user_by_name(&user.normalized_user_name)
        .await
        .expect("find by name");
    assert_eq!(by_name.map(|u| u.id), Some(user.id));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn missing_user_is_none_on_the_wire() {
    let client = spawn_service().await;

    let found = client.find_user_by_id(Uuid::now_v7()).await.expect("find");
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn claims_attach_and_list() {
    let client = spawn_service().await;
    let user = unique_user();

    client.create_user(&user).await.expect("create");
    client
        .add_user_claim(user.id, "dept", "eng")
        .await
        .expect("add claim");

    let claims = client.get_user_claims(user.id).await.expect("claims");
    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].claim_type, "dept");
    assert_eq!(claims[0].claim_value, "eng");

    let holders = client
        .get_users_for_claim("dept", "eng")
        .await
        .expect("holders");
    assert!(holders.iter().any(|u| u.id == user.id));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn adding_user_to_missing_role_is_a_status_error() {
    let client = spawn_service().await;
    let user = unique_user();

    client.create_user(&user).await.expect("create");

    let err = client
        .add_user_to_role(user.id, "NO-SUCH-ROLE")
        .await
        .expect_err("must fail");
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn role_membership_through_the_wire() {
    let client = spawn_service().await;
    let user = unique_user();
    let role = RoleModel::from(Role::new(format!("role-{}", Uuid::now_v7().simple())));

    client.create_user(&user).await.expect("create user");
    client.create_role(&role).await.expect("create role");
    client
        .add_user_to_role(user.id, &role.normalized_name)
        .await
        .expect("add to role");

    let names = client.get_user_roles(user.id).await.expect("roles");
    assert_eq!(names, vec![role.name.clone()]);
    assert!(client
        .is_user_in_role(user.id, &role.name)
        .await
        .expect("in role"));

    let members = client
        .get_users_in_role(&role.normalized_name)
        .await
        .expect("members");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, user.id);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn duplicate_user_name_is_a_conflict() {
    let client = spawn_service().await;
    let user = unique_user();
    let mut twin = unique_user();
    twin.user_name = user.user_name.clone();
    twin.normalized_user_name = user.normalized_user_name.clone();

    client.create_user(&user).await.expect("create");
    let err = client.create_user(&twin).await.expect_err("must fail");

    match err {
        ApiError::Status { status, .. } => {
            assert_eq!(status, reqwest::StatusCode::CONFLICT);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn set_token_is_an_upsert() {
    let client = spawn_service().await;
    let user = unique_user();

    client.create_user(&user).await.expect("create");
    client
        .set_user_token(user.id, "authenticator", "recovery", "first")
        .await
        .expect("set");
    client
        .set_user_token(user.id, "authenticator", "recovery", "second")
        .await
        .expect("overwrite");

    let tokens = client.get_user_tokens(user.id).await.expect("tokens");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value.as_deref(), Some("second"));
}

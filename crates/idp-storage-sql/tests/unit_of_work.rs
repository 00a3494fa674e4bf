//! Unit-of-work integration tests.
//!
//! These run against a live `PostgreSQL` instance addressed by
//! `DATABASE_URL` and are ignored by default:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/identity_test cargo test -- --ignored
//! ```

use idp_model::{Role, User, UserClaim};
use idp_storage::{
    RoleRepository, StorageError, UserClaimRepository, UserRepository,
};
use idp_storage_sql::SqlUnitOfWork;
use sqlx::PgPool;
use uuid::Uuid;

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for ignored tests");
    let pool = PgPool::connect(&url).await.expect("connect");
    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

fn unique_user() -> User {
    let suffix = Uuid::now_v7().simple().to_string();
    User::new(format!("user-{suffix}")).with_email(format!("{suffix}@example.com"))
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn commit_makes_writes_visible_to_later_units_of_work() {
    let pool = test_pool().await;
    let user = unique_user();

    let mut uow = SqlUnitOfWork::begin(&pool).await.expect("begin");
    uow.users().add(&user).await.expect("add");
    uow.commit().await.expect("commit");

    let mut verify = SqlUnitOfWork::begin(&pool).await.expect("begin");
    let found = verify.users().get_by_id(user.id).await.expect("get");
    assert_eq!(found.map(|u| u.user_name), Some(user.user_name));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn access_after_commit_runs_on_a_fresh_transaction() {
    let pool = test_pool().await;
    let committed = unique_user();
    let abandoned = unique_user();

    let mut uow = SqlUnitOfWork::begin(&pool).await.expect("begin");
    uow.users().add(&committed).await.expect("add");
    uow.commit().await.expect("commit");

    // This write lands on the replacement transaction; rolling it back must
    // not disturb the committed one.
    uow.users().add(&abandoned).await.expect("add");
    uow.rollback().await.expect("rollback");

    let mut verify = SqlUnitOfWork::begin(&pool).await.expect("begin");
    assert!(verify
        .users()
        .get_by_id(committed.id)
        .await
        .expect("get")
        .is_some());
    assert!(verify
        .users()
        .get_by_id(abandoned.id)
        .await
        .expect("get")
        .is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn dropping_the_unit_of_work_rolls_back() {
    let pool = test_pool().await;
    let user = unique_user();

    {
        let mut uow = SqlUnitOfWork::begin(&pool).await.expect("begin");
        uow.users().add(&user).await.expect("add");
        // No commit.
    }

    let mut verify = SqlUnitOfWork::begin(&pool).await.expect("begin");
    assert!(verify.users().get_by_id(user.id).await.expect("get").is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn get_missing_user_returns_none() {
    let pool = test_pool().await;

    let mut uow = SqlUnitOfWork::begin(&pool).await.expect("begin");
    let found = uow.users().get_by_id(Uuid::now_v7()).await.expect("get");
    assert!(found.is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn user_claims_round_trip() {
    let pool = test_pool().await;
    let user = unique_user();

    let mut uow = SqlUnitOfWork::begin(&pool).await.expect("begin");
    uow.users().add(&user).await.expect("add user");
    let claim = UserClaim::new(user.id, "dept", "eng");
    uow.user_claims().add(&claim).await.expect("add claim");
    uow.commit().await.expect("commit");

    let mut verify = SqlUnitOfWork::begin(&pool).await.expect("begin");
    let claims = verify
        .user_claims()
        .get_by_user(user.id)
        .await
        .expect("claims");
    assert_eq!(claims.len(), 1);
    assert!(claims[0].matches("dept", "eng"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn add_to_missing_role_is_an_error() {
    let pool = test_pool().await;
    let user = unique_user();

    let mut uow = SqlUnitOfWork::begin(&pool).await.expect("begin");
    uow.users().add(&user).await.expect("add user");

    let err = uow
        .users()
        .add_to_role(user.id, "NO-SUCH-ROLE")
        .await
        .expect_err("must fail");
    assert!(matches!(err, StorageError::NotFoundByName { .. }));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
async fn role_membership_round_trip() {
    let pool = test_pool().await;
    let user = unique_user();
    let role = Role::new(format!("role-{}", Uuid::now_v7().simple()));

    let mut uow = SqlUnitOfWork::begin(&pool).await.expect("begin");
    uow.users().add(&user).await.expect("add user");
    uow.roles().add(&role).await.expect("add role");
    uow.users()
        .add_to_role(user.id, &role.normalized_name)
        .await
        .expect("add to role");
    uow.commit().await.expect("commit");

    let mut verify = SqlUnitOfWork::begin(&pool).await.expect("begin");
    let names = verify
        .roles()
        .names_for_user(user.id)
        .await
        .expect("names");
    assert_eq!(names, vec![role.name.clone()]);

    let members = verify
        .users()
        .get_by_normalized_role_name(&role.normalized_name)
        .await
        .expect("members");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, user.id);
}

//! Database row types for `SQLx`.
//!
//! These map directly to database rows and are converted to domain models
//! in [`crate::convert`].

#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for users.
#[derive(Debug, Clone, FromRow)]
#[allow(clippy::struct_excessive_bools)]
pub struct UserRow {
    pub id: Uuid,
    pub user_name: String,
    pub normalized_user_name: String,
    pub email: Option<String>,
    pub normalized_email: Option<String>,
    pub email_confirmed: bool,
    pub password_hash: Option<String>,
    pub security_stamp: Option<String>,
    pub concurrency_stamp: Option<String>,
    pub phone_number: Option<String>,
    pub phone_number_confirmed: bool,
    pub two_factor_enabled: bool,
    pub lockout_end: Option<DateTime<Utc>>,
    pub lockout_enabled: bool,
    pub access_failed_count: i32,
}

/// Database row for roles.
#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub normalized_name: String,
    pub concurrency_stamp: Option<String>,
}

/// Database row for user claims (claims joined with their owner link).
#[derive(Debug, Clone, FromRow)]
pub struct UserClaimRow {
    pub id: i64,
    pub claim_type: String,
    pub claim_value: String,
    pub user_id: Uuid,
}

/// Database row for role claims (claims joined with their owner link).
#[derive(Debug, Clone, FromRow)]
pub struct RoleClaimRow {
    pub id: i64,
    pub claim_type: String,
    pub claim_value: String,
    pub role_id: Uuid,
}

/// Database row for external logins.
#[derive(Debug, Clone, FromRow)]
pub struct UserLoginRow {
    pub login_provider: String,
    pub provider_key: String,
    pub provider_display_name: Option<String>,
    pub user_id: Uuid,
}

/// Database row for user tokens.
#[derive(Debug, Clone, FromRow)]
pub struct UserTokenRow {
    pub user_id: Uuid,
    pub login_provider: String,
    pub name: String,
    pub value: Option<String>,
}

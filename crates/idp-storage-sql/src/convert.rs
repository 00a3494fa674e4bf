//! Conversion between database rows and domain models.

use idp_model::{Role, RoleClaim, User, UserClaim, UserLogin, UserToken};

use crate::entities::{RoleClaimRow, RoleRow, UserClaimRow, UserLoginRow, UserRow, UserTokenRow};

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            user_name: row.user_name,
            normalized_user_name: row.normalized_user_name,
            email: row.email,
            normalized_email: row.normalized_email,
            email_confirmed: row.email_confirmed,
            password_hash: row.password_hash,
            security_stamp: row.security_stamp,
            concurrency_stamp: row.concurrency_stamp,
            phone_number: row.phone_number,
            phone_number_confirmed: row.phone_number_confirmed,
            two_factor_enabled: row.two_factor_enabled,
            lockout_end: row.lockout_end,
            lockout_enabled: row.lockout_enabled,
            access_failed_count: row.access_failed_count,
        }
    }
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            normalized_name: row.normalized_name,
            concurrency_stamp: row.concurrency_stamp,
        }
    }
}

impl From<UserClaimRow> for UserClaim {
    fn from(row: UserClaimRow) -> Self {
        Self {
            id: row.id,
            claim_type: row.claim_type,
            claim_value: row.claim_value,
            user_id: row.user_id,
        }
    }
}

impl From<RoleClaimRow> for RoleClaim {
    fn from(row: RoleClaimRow) -> Self {
        Self {
            id: row.id,
            claim_type: row.claim_type,
            claim_value: row.claim_value,
            role_id: row.role_id,
        }
    }
}

impl From<UserLoginRow> for UserLogin {
    fn from(row: UserLoginRow) -> Self {
        Self {
            login_provider: row.login_provider,
            provider_key: row.provider_key,
            provider_display_name: row.provider_display_name,
            user_id: row.user_id,
        }
    }
}

impl From<UserTokenRow> for UserToken {
    fn from(row: UserTokenRow) -> Self {
        Self {
            user_id: row.user_id,
            login_provider: row.login_provider,
            name: row.name,
            value: row.value,
        }
    }
}

//! # idp-model
//!
//! Domain entities for the identity demo backend (users, roles, claims,
//! logins, tokens).
//!
//! These are plain data holders: all creation, mutation and deletion goes
//! through the repository or API-client adapters in the sibling crates.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod claim;
pub mod login;
pub mod role;
pub mod token;
pub mod user;

pub use claim::{RoleClaim, UserClaim};
pub use login::{UserLogin, UserLoginKey};
pub use role::Role;
pub use token::{UserToken, UserTokenKey};
pub use user::User;

/// Produces a fresh opaque stamp value.
///
/// Used for both security stamps (rotated on credential changes) and
/// concurrency stamps (rotated on every update).
#[must_use]
pub(crate) fn new_stamp() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}

//! # idp-stores
//!
//! Store adapters bridging a host authentication framework to the identity
//! backends.
//!
//! The framework-facing record shapes ([`IdentityUser`], [`IdentityRole`])
//! are mapped field-for-field onto the domain entities; narrow capability
//! traits cover the backend-touching operations and are implemented twice,
//! once over the `PostgreSQL` unit of work and once over the HTTP API
//! client. Every trait method checks its cancellation token before doing
//! anything else and validates required string arguments before any I/O.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod api;
pub mod error;
mod guard;
pub mod identity;
pub mod role;
pub mod sql;
pub mod user;

pub use api::{ApiRoleStore, ApiUserStore};
pub use error::{StoreError, StoreResult};
pub use identity::{IdentityRole, IdentityUser};
pub use role::{RoleClaimStore, RoleStore};
pub use sql::{SqlRoleStore, SqlUserStore};
pub use user::{
    UserClaimStore, UserEmailStore, UserLoginStore, UserRoleStore, UserStore, UserTokenStore,
};

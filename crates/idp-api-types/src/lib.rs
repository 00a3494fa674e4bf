//! # idp-api-types
//!
//! Wire models for the `/api/identity` HTTP surface, shared by the service
//! and the client so both ends agree on one set of JSON shapes.
//!
//! Every model is a field-for-field record of its domain counterpart;
//! conversions copy each field one-to-one and must round-trip unchanged.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod claim;
pub mod login;
pub mod role;
pub mod token;
pub mod user;

pub use claim::{ClaimModel, ReplaceUserClaimModel};
pub use login::LoginModel;
pub use role::{AddRoleModel, RoleModel};
pub use token::TokenModel;
pub use user::UserModel;

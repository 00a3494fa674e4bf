//! # idp-storage
//!
//! Repository traits for the identity demo backend.
//!
//! One trait per entity family; each operation issues a single statement
//! (claims: two, against the shared claims table and the owning join
//! table) inside the transaction owned by the caller's unit of work.
//! Point reads model "not found" as `Ok(None)`, never as an error.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod claim;
pub mod error;
pub mod login;
pub mod role;
pub mod token;
pub mod user;

pub use claim::{RoleClaimRepository, UserClaimRepository};
pub use error::{StorageError, StorageResult};
pub use login::UserLoginRepository;
pub use role::RoleRepository;
pub use token::UserTokenRepository;
pub use user::UserRepository;

//! # idp-storage-sql
//!
//! `PostgreSQL` storage backend for the identity demo backend.
//!
//! [`SqlUnitOfWork`] owns one transaction per logical request; the
//! repository adapters it hands out borrow that transaction and issue one
//! parameterized statement per operation (claims: two, one against the
//! shared claims table and one against the owning join table).

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod claim;
pub mod convert;
pub mod entities;
pub mod error;
pub mod login;
pub mod pool;
pub mod role;
pub mod token;
pub mod uow;
pub mod user;

pub use claim::{SqlRoleClaimRepository, SqlUserClaimRepository};
pub use login::SqlUserLoginRepository;
pub use pool::{PoolConfig, create_pool};
pub use role::SqlRoleRepository;
pub use token::SqlUserTokenRepository;
pub use uow::SqlUnitOfWork;
pub use user::SqlUserRepository;

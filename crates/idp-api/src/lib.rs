//! # idp-api
//!
//! HTTP service exposing the `/api/identity` surface consumed by
//! `idp-api-client`, backed by the `PostgreSQL` unit of work.
//!
//! Point lookups answer 200 with a JSON `null` body when the entity does
//! not exist; storage errors map onto status codes (not-found 404,
//! duplicate 409, everything else 500) with a JSON error body.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
mod role;
pub mod router;
pub mod state;
mod user;

pub use error::{ErrorResponse, ServiceError, ServiceResult};
pub use router::identity_router;
pub use state::ServiceState;

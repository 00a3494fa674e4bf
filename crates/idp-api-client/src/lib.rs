//! # idp-api-client
//!
//! Typed HTTP client for the identity API service.
//!
//! Each identity operation is one HTTP call against a fixed route,
//! serialized as JSON. The response policy is uniform: 200 deserializes
//! the body, 404 yields the type's default/empty value, and any other
//! status raises [`ApiError::Status`] carrying the full request and
//! response context for diagnostics.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod client;
pub mod error;
mod role;
mod user;

pub use client::IdentityApiClient;
pub use error::{ApiError, ApiResult};

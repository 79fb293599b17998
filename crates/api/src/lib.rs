//! HTTP API layer for farmtrack.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: one router per entity plus auth and reports
//! - **Extractors**: authenticated-claims extraction
//! - **Middleware**: bearer-token decoding
//! - **Guard**: explicit route-to-roles policy table
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod guard;
pub mod middleware;
pub mod response;

pub use endpoints::router;

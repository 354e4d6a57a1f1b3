//! HTTP gateway for the snip URL shortener.
//!
//! Exposes the allocation engine over axum: a public redirect route
//! plus a `/v1/links` API for create, resolve, list, delete, the bulk
//! operations, and cache diagnostics. The gateway owns boundary
//! concerns the engine deliberately does not: input validation and the
//! mapping from engine outcomes to HTTP status codes.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

//! Application layer orchestrating domain operations.
//!
//! - [`create_request`] - Validation of untrusted creation request bodies
//! - [`services`] - Business logic consuming repository traits

pub mod create_request;
pub mod services;

pub use create_request::CreationRequest;

//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_strip`] - Destination scheme stripping
//! - [`client_ip`] - Proxy-aware client IP resolution

pub mod client_ip;
pub mod code_generator;
pub mod url_strip;

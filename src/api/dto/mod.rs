//! Data Transfer Objects for response serialization.

pub mod create;
pub mod health;

//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation uses a
//! separate `NewLink` struct holding the candidate insert record.

pub mod link;

pub use link::{NewLink, ShortLink};

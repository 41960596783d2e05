//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`insert_context`] - Immutable alphabets and limits for link creation
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; repository traits define contracts implemented by the
//! infrastructure layer, and business logic lives in
//! [`crate::application::services`].

pub mod entities;
pub mod insert_context;
pub mod repositories;

pub use insert_context::InsertContext;

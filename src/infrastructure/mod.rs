//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer and wraps third-party
//! services.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory repository implementations
//! - [`recaptcha`] - Bot-verification collaborator (feature-switched)

pub mod persistence;
pub mod recaptcha;

//! Repository trait for short link data access.

use crate::domain::entities::{NewLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the link store.
///
/// The store owns the uniqueness of the `code` column; `try_insert` is the
/// single atomic operation the creation flow depends on. Callers never
/// pre-check existence before inserting.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Attempts to insert the record under its candidate code.
    ///
    /// Atomic with respect to concurrent inserts of the same code: of two
    /// racing callers, at most one receives `Some`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(code))` when the row was stored
    /// - `Ok(None)` when the code already exists (uniqueness conflict)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on any store failure other than a code
    /// uniqueness conflict. Such failures are never retried by callers.
    async fn try_insert(&self, link: &NewLink) -> Result<Option<String>, AppError>;

    /// Looks up a link by its code for the redirect path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Returns true when the store answers a trivial round-trip.
    async fn ping(&self) -> bool;
}

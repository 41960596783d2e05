//! Link creation and retrieval service.

use std::sync::Arc;

use crate::application::create_request::CreationRequest;
use crate::domain::InsertContext;
use crate::domain::entities::{NewLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Orchestrates link creation against the uniqueness-enforcing store.
///
/// Uniqueness is arbitrated solely by the store: the service never pre-checks
/// whether a code exists, it always attempts the conditional insert and
/// interprets the outcome. A user-requested code gets exactly one attempt;
/// a generated code gets a bounded number of fresh attempts.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    ctx: Arc<InsertContext>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn LinkRepository>, ctx: Arc<InsertContext>) -> Self {
        Self { repository, ctx }
    }

    /// Creates a short link and returns its code.
    ///
    /// # Errors
    ///
    /// - [`AppError::Conflict`] when an explicitly requested code is taken
    ///   (never retried; the caller asked for that specific code)
    /// - [`AppError::PoolExhausted`] when every generation attempt collided
    /// - [`AppError::Internal`] on store failures, which are not retried
    pub async fn create_link(
        &self,
        request: CreationRequest,
        client_ip: u32,
    ) -> Result<String, AppError> {
        let record = NewLink {
            code: String::new(),
            protocol: request.protocol,
            destination: request.destination,
            status_code: request.status_code,
            creator_ip: i64::from(client_ip),
        };

        match request.requested_code {
            Some(code) => self.insert_requested(record, code).await,
            None => self.insert_generating(record).await,
        }
    }

    /// Explicit-code path: a single conditional insert.
    async fn insert_requested(
        &self,
        mut record: NewLink,
        code: String,
    ) -> Result<String, AppError> {
        record.code = code;

        match self.repository.try_insert(&record).await? {
            Some(stored) => Ok(stored),
            None => Err(AppError::Conflict),
        }
    }

    /// Generated-code path: bounded retry with a fresh random code per attempt.
    async fn insert_generating(&self, mut record: NewLink) -> Result<String, AppError> {
        for attempt in 1..=self.ctx.tries {
            record.code = generate_code(&self.ctx.link_alphabet_seq, self.ctx.link_length);

            if let Some(stored) = self.repository.try_insert(&record).await? {
                return Ok(stored);
            }

            tracing::debug!(attempt, tries = self.ctx.tries, "generated code collided");
        }

        Err(AppError::PoolExhausted)
    }

    /// Resolves a code to its stored link for the redirect path.
    ///
    /// Codes containing characters outside the allowed alphabet cannot exist
    /// in the store and are rejected without a lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown or malformed codes.
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        if !self.ctx.is_allowed_code(code) {
            return Err(AppError::NotFound);
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Store connectivity check for the health endpoint.
    pub async fn store_healthy(&self) -> bool {
        self.repository.ping().await
    }
}

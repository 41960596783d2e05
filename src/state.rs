//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::InsertContext;
use crate::infrastructure::recaptcha::BotVerifier;

/// Process-wide state, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub insert_ctx: Arc<InsertContext>,
    pub verifier: Arc<dyn BotVerifier>,
    /// Credential gating the explicit-code path; `None` means no credential
    /// is configured and only requests carrying none are authorized.
    pub admin_pass: Option<Arc<str>>,
    /// When true, the client IP comes from reverse-proxy headers.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        insert_ctx: Arc<InsertContext>,
        verifier: Arc<dyn BotVerifier>,
        admin_pass: Option<String>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service,
            insert_ctx,
            verifier,
            admin_pass: admin_pass.map(Into::into),
            behind_proxy,
        }
    }
}

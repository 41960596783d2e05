#![allow(dead_code)]

use std::sync::Arc;

use shortlink::application::services::LinkService;
use shortlink::domain::InsertContext;
use shortlink::domain::entities::NewLink;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::infrastructure::recaptcha::NullVerifier;
use shortlink::state::AppState;

pub const TEST_ADMIN: &str = "test-admin-pass";

/// Context mirroring the default configuration.
pub fn default_ctx() -> InsertContext {
    InsertContext::new(
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
        "_-",
        5,
        50,
        10,
    )
    .unwrap()
}

/// Tiny code pool for exhaustion scenarios: single-character codes over the
/// given alphabet.
pub fn tiny_ctx(alphabet: &str, tries: u32) -> InsertContext {
    InsertContext::new(alphabet, "_-", 1, 50, tries).unwrap()
}

/// Builds application state over an in-memory store, with bot verification
/// disabled and the test admin credential configured.
pub fn create_test_state(ctx: InsertContext) -> (AppState, Arc<MemoryLinkRepository>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let ctx = Arc::new(ctx);
    let link_service = Arc::new(LinkService::new(repository.clone(), ctx.clone()));

    let state = AppState::new(
        link_service,
        ctx,
        Arc::new(NullVerifier),
        Some(TEST_ADMIN.to_string()),
        false,
    );

    (state, repository)
}

pub fn new_link(code: &str, protocol: &str, destination: &str, status_code: i32) -> NewLink {
    NewLink {
        code: code.to_string(),
        protocol: protocol.to_string(),
        destination: destination.to_string(),
        status_code,
        creator_ip: 0,
    }
}

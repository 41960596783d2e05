//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{code}` (a trailing slash is normalized away by the router)
///
/// Responds with the redirect status code stored at creation time (any code
/// in 300..=399) and a `Location` header carrying the reconstituted
/// destination URL.
///
/// # Errors
///
/// Returns 404 for unknown codes and for codes containing characters outside
/// the allowed alphabet; the two cases are indistinguishable to the caller.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&code).await?;

    // Stored status codes are pinned to 300..=399 at creation time.
    let status = StatusCode::from_u16(link.status_code as u16)
        .map_err(|_| AppError::internal(format!("stored status code {} invalid", link.status_code)))?;

    tracing::debug!(code, status = link.status_code, "redirecting");

    Ok((status, [(header::LOCATION, link.location())]).into_response())
}

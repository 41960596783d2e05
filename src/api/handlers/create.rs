//! Handler for the link creation endpoint.

use axum::{
    Json,
    extract::{ConnectInfo, State},
    extract::rejection::JsonRejection,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde_json::Value;
use std::net::SocketAddr;

use crate::api::dto::create::CreatedResponse;
use crate::application::CreationRequest;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::{ip_to_u32, resolve_client_ip};

/// Creates a short link for a destination URL.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// {
///   "destination": "https://example.com/a?b=1",
///   "redirect": 302,             // optional, default 301
///   "requested_link": "my_code", // optional, requires "admin"
///   "admin": "<credential>",     // required with "requested_link"
///   "recaptcha": "<token>"       // required when verification is enabled
/// }
/// ```
///
/// # Responses
///
/// - `201` `{"status": "created", "link": "<code>"}`
/// - `400` malformed body or field, `{"error": "<message>"}`
/// - `401` wrong or missing admin credential / missing recaptcha token
/// - `409` requested code already taken, `"type": "exists"`
/// - `503` generation pool exhausted (`"type": "not_enough_values"`) or
///   verification service unavailable
pub async fn create_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = match payload {
        Ok(Json(Value::Object(body))) => body,
        _ => {
            return Err(AppError::bad_request("Request is not in the correct format"));
        }
    };

    let client_ip = resolve_client_ip(&headers, peer, state.behind_proxy);

    state
        .verifier
        .verify(body.get("recaptcha"), &client_ip.to_string())
        .await?;

    let request =
        CreationRequest::from_body(&body, &state.insert_ctx, state.admin_pass.as_deref())?;

    let code = state
        .link_service
        .create_link(request, ip_to_u32(client_ip))
        .await?;

    tracing::info!(code, %client_ip, "link created");

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(code))))
}

//! Application error type and its HTTP mapping.
//!
//! Every error the service reports to a client is a variant here, serialized
//! as a JSON body of the form `{"error": "..."}`. Conflict and pool-exhaustion
//! responses additionally carry a machine-readable `type` field so callers can
//! distinguish a taken code from an exhausted code pool.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

#[derive(Serialize)]
struct MessageBody {
    error: String,
}

/// Error taxonomy of the service.
///
/// Input and authorization errors are produced before any store access.
/// `Conflict` and `PoolExhausted` are terminal outcomes of the creation flow,
/// not transient failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or out-of-range request field. 400.
    #[error("{message}")]
    Validation { message: String },
    /// Missing or wrong admin credential, or missing bot-verification token. 401.
    #[error("{message}")]
    Unauthorized { message: String },
    /// No link under the requested code. 404.
    #[error("link not found")]
    NotFound,
    /// Explicitly requested code is already claimed. 409.
    #[error("requested link was already taken")]
    Conflict,
    /// All generation attempts hit existing codes. 503.
    #[error("code pool exhausted")]
    PoolExhausted,
    /// Bot-verification service unreachable or erroring. 503.
    #[error("{message}")]
    Upstream { message: String },
    /// Unexpected store or internal failure. 500.
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::PoolExhausted | Self::Upstream { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            Self::Conflict => (
                status,
                Json(ErrorBody {
                    error: "Requested link was already taken",
                    kind: Some("exists"),
                }),
            )
                .into_response(),
            Self::PoolExhausted => (
                status,
                Json(ErrorBody {
                    error: "Cannot generate link, the whole pool is already taken",
                    kind: Some("not_enough_values"),
                }),
            )
                .into_response(),
            Self::NotFound => (
                status,
                Json(MessageBody {
                    error: "Link not found".to_string(),
                }),
            )
                .into_response(),
            Self::Internal { message } => {
                // Client gets a generic body; the cause stays in the logs.
                tracing::error!("internal error: {message}");
                (
                    status,
                    Json(MessageBody {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::Validation { message }
            | Self::Unauthorized { message }
            | Self::Upstream { message } => {
                (status, Json(MessageBody { error: message })).into_response()
            }
        }
    }
}

/// Maps a store failure to [`AppError::Internal`].
///
/// Uniqueness conflicts never reach this point; the repository resolves them
/// into `Ok(None)` before errors are surfaced.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    AppError::internal(format!("database error: {e}"))
}

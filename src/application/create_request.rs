//! Validation of untrusted link-creation request bodies.
//!
//! A [`CreationRequest`] is either fully valid or never constructed; every
//! failure is reported through [`AppError`] with the exact field-specific
//! message and status code the public API promises. Validation is pure and
//! happens before any store access.

use serde_json::{Map, Value};
use url::Url;

use crate::domain::InsertContext;
use crate::error::AppError;
use crate::utils::url_strip::strip_scheme;

/// Default redirect status code when the `redirect` field is absent.
const DEFAULT_STATUS_CODE: i32 = 301;

/// A fully validated link-creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationRequest {
    /// Destination scheme, `http` or `https`.
    pub protocol: String,
    /// Scheme-stripped destination, bounded by the configured maximum.
    pub destination: String,
    /// Redirect status code in 300..=399.
    pub status_code: i32,
    /// Caller-chosen code. `Some` whenever the `requested_link` field was
    /// present and non-null, even when it is the empty string; presence, not
    /// emptiness, selects the explicit-code path.
    pub requested_code: Option<String>,
}

impl CreationRequest {
    /// Validates a parsed JSON body into a `CreationRequest`.
    ///
    /// Checks run in order and short-circuit on the first failure:
    /// destination, status code, then the optional requested code (admin
    /// credential first, so a wrong credential never leaks code-format
    /// errors).
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] (400) for malformed fields,
    /// [`AppError::Unauthorized`] (401) for a credential mismatch.
    pub fn from_body(
        body: &Map<String, Value>,
        ctx: &InsertContext,
        admin_secret: Option<&str>,
    ) -> Result<Self, AppError> {
        let destination = check_destination(body.get("destination"), ctx.max_destination_length)?;

        let status_code = check_status_code(body.get("redirect"))?;

        // JSON null and an absent field are both "not requested".
        let requested = match body.get("requested_link") {
            None | Some(Value::Null) => None,
            Some(value) => Some(check_requested_link(body.get("admin"), value, ctx, admin_secret)?),
        };

        Ok(Self {
            protocol: destination.scheme().to_string(),
            destination: strip_scheme(&destination).to_string(),
            status_code,
            requested_code: requested,
        })
    }
}

/// Validates the destination field and returns the parsed URL.
fn check_destination(value: Option<&Value>, max_length: usize) -> Result<Url, AppError> {
    let Some(Value::String(raw)) = value else {
        return Err(AppError::bad_request(
            "Destination address must of a text type",
        ));
    };

    let url = match Url::parse(raw) {
        Ok(url) => url,
        // An http(s) prefix that still fails to parse means the authority
        // part is broken; anything else lacks a usable scheme.
        Err(_) if raw.starts_with("http://") || raw.starts_with("https://") => {
            return Err(AppError::bad_request(
                "Destination address must have a correct network location",
            ));
        }
        Err(_) => {
            return Err(AppError::bad_request(
                "Destination address must have a correct protocol",
            ));
        }
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AppError::bad_request(
            "Destination address must have a correct protocol",
        ));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::bad_request(
            "Destination address must have a correct network location",
        ));
    }

    if strip_scheme(&url).len() > max_length {
        return Err(AppError::bad_request("Destination address must be shorter"));
    }

    Ok(url)
}

/// Validates the redirect status code field, defaulting to 301 when absent.
fn check_status_code(value: Option<&Value>) -> Result<i32, AppError> {
    let Some(value) = value else {
        return Ok(DEFAULT_STATUS_CODE);
    };

    let Some(code) = value.as_i64() else {
        return Err(AppError::bad_request("Status code must be of a numeric type"));
    };

    if !(300..=399).contains(&code) {
        return Err(AppError::bad_request(
            "Status code must be of a redirection type",
        ));
    }

    Ok(code as i32)
}

/// Validates an explicitly requested code together with the admin credential.
///
/// The credential is checked first. Equality is over presence and value: an
/// absent credential matches only an unset server secret.
fn check_requested_link(
    admin: Option<&Value>,
    value: &Value,
    ctx: &InsertContext,
    admin_secret: Option<&str>,
) -> Result<String, AppError> {
    let authorized = match (admin, admin_secret) {
        (None | Some(Value::Null), None) => true,
        (Some(Value::String(given)), Some(secret)) => given == secret,
        _ => false,
    };
    if !authorized {
        return Err(AppError::unauthorized("Unauthorized"));
    }

    let Value::String(code) = value else {
        return Err(AppError::bad_request("Requested link must of a text type"));
    };

    if !ctx.is_allowed_code(code) {
        return Err(AppError::bad_request(
            "Requested link contains not allowed characters",
        ));
    }

    Ok(code.clone())
}

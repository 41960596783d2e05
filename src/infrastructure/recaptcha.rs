//! reCAPTCHA bot-verification collaborator.
//!
//! Verification sits in front of the creation flow behind a feature switch:
//! when disabled, [`NullVerifier`] passes every request and no network call is
//! made. When enabled, the caller-supplied token is checked locally for shape
//! and then sent to Google's `siteverify` endpoint.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

const SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Expected reCAPTCHA action for the create form.
const EXPECTED_ACTION: &str = "submit";

/// Bot-verification seam consumed by the create handler.
#[async_trait]
pub trait BotVerifier: Send + Sync {
    /// Verifies the raw `recaptcha` field of the request body.
    ///
    /// `token` is the field as it appeared in the JSON body, so missing and
    /// mistyped tokens produce distinct errors.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] when the token is missing
    /// - [`AppError::Validation`] when the token is mistyped, the challenge
    ///   failed, the action does not match, or the score is too low
    /// - [`AppError::Upstream`] when the verification service is unreachable
    async fn verify(&self, token: Option<&Value>, client_ip: &str) -> Result<(), AppError>;
}

/// Verifier used when the reCAPTCHA feature is disabled: always passes.
pub struct NullVerifier;

#[async_trait]
impl BotVerifier for NullVerifier {
    async fn verify(&self, _token: Option<&Value>, _client_ip: &str) -> Result<(), AppError> {
        Ok(())
    }
}

/// Verifier backed by Google's `siteverify` API.
pub struct RecaptchaVerifier {
    http: reqwest::Client,
    secret: String,
    minimal_score: f64,
    verify_ip: bool,
}

impl RecaptchaVerifier {
    pub fn new(secret: String, minimal_score: f64, verify_ip: bool) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret,
            minimal_score,
            verify_ip,
        }
    }
}

#[async_trait]
impl BotVerifier for RecaptchaVerifier {
    async fn verify(&self, token: Option<&Value>, client_ip: &str) -> Result<(), AppError> {
        let token = check_token(token)?;

        let mut form = vec![("secret", self.secret.as_str()), ("response", token)];
        if self.verify_ip {
            form.push(("remoteip", client_ip));
        }

        let response = self
            .http
            .post(SITEVERIFY_URL)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("recaptcha verification request failed: {e}");
                AppError::upstream("Recaptcha verification service is unavailable")
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "recaptcha verification rejected");
            return Err(AppError::upstream(
                "Recaptcha verification service is unavailable",
            ));
        }

        let body: Value = response.json().await.map_err(|e| {
            tracing::warn!("recaptcha verification returned malformed body: {e}");
            AppError::upstream("Recaptcha verification service is unavailable")
        })?;

        interpret_verify_response(&body, self.minimal_score)
    }
}

/// Checks the shape of the caller-supplied token field.
fn check_token(token: Option<&Value>) -> Result<&str, AppError> {
    match token {
        None | Some(Value::Null) => Err(AppError::unauthorized(
            "Recaptcha token was not provided",
        )),
        Some(Value::String(token)) => Ok(token),
        Some(_) => Err(AppError::bad_request(
            "Recaptcha token must be of a text type",
        )),
    }
}

/// Interprets a successful HTTP response from `siteverify`.
fn interpret_verify_response(body: &Value, minimal_score: f64) -> Result<(), AppError> {
    let success = body.get("success").and_then(Value::as_bool).unwrap_or(false);
    if !success {
        let duplicate = body
            .get("error-codes")
            .and_then(Value::as_array)
            .is_some_and(|codes| {
                codes.iter().any(|c| c.as_str() == Some("timeout-or-duplicate"))
            });

        return Err(if duplicate {
            AppError::bad_request("Recaptcha challenge failed, duplicate or timed out request")
        } else {
            AppError::bad_request("Recaptcha challenge failed, check the token parsed")
        });
    }

    let action = body.get("action").and_then(Value::as_str);
    if action != Some(EXPECTED_ACTION) {
        return Err(AppError::bad_request(
            "Recaptcha verification observed malformed request",
        ));
    }

    let score = body.get("score").and_then(Value::as_f64).unwrap_or(-1.0);
    if score < minimal_score {
        return Err(AppError::bad_request(
            "Recaptcha verification observed a non human behaviour. Try again.",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_null_verifier_always_passes() {
        let verifier = NullVerifier;
        assert!(verifier.verify(None, "1.2.3.4").await.is_ok());
        assert!(verifier.verify(Some(&json!(42)), "1.2.3.4").await.is_ok());
    }

    #[test]
    fn test_missing_token() {
        let err = check_token(None).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
        assert_eq!(err.to_string(), "Recaptcha token was not provided");
    }

    #[test]
    fn test_null_token_counts_as_missing() {
        let err = check_token(Some(&Value::Null)).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_mistyped_token() {
        let err = check_token(Some(&json!(7))).unwrap_err();
        assert_eq!(err.to_string(), "Recaptcha token must be of a text type");
    }

    #[test]
    fn test_valid_token_shape() {
        assert_eq!(check_token(Some(&json!("tok"))).unwrap(), "tok");
    }

    #[test]
    fn test_verify_pass() {
        let body = json!({"success": true, "action": "submit", "score": 0.9});
        assert!(interpret_verify_response(&body, 0.5).is_ok());
    }

    #[test]
    fn test_verify_challenge_failed() {
        let body = json!({"success": false, "error-codes": ["invalid-input-response"]});
        let err = interpret_verify_response(&body, 0.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Recaptcha challenge failed, check the token parsed"
        );
    }

    #[test]
    fn test_verify_duplicate_challenge() {
        let body = json!({"success": false, "error-codes": ["timeout-or-duplicate"]});
        let err = interpret_verify_response(&body, 0.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Recaptcha challenge failed, duplicate or timed out request"
        );
    }

    #[test]
    fn test_verify_action_mismatch() {
        let body = json!({"success": true, "action": "login", "score": 0.9});
        let err = interpret_verify_response(&body, 0.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Recaptcha verification observed malformed request"
        );
    }

    #[test]
    fn test_verify_low_score() {
        let body = json!({"success": true, "action": "submit", "score": 0.2});
        let err = interpret_verify_response(&body, 0.5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Recaptcha verification observed a non human behaviour. Try again."
        );
    }

    #[test]
    fn test_verify_missing_score_fails() {
        let body = json!({"success": true, "action": "submit"});
        assert!(interpret_verify_response(&body, 0.5).is_err());
    }
}

//! Classification of non-success responses

use crate::response::RawResponse;
use serde_json::Value as JsonValue;
use std::fmt;

/// Fallback code when the error body carries no machine-readable code.
pub const UNKNOWN_CODE: &str = "UNKNOWN";

/// Structured failure derived from a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// HTTP status of the response.
    pub status: u16,
    /// Machine-readable error code, `UNKNOWN` when the body carried none.
    pub code: String,
    /// Human-readable message, falling back to the raw body text.
    pub message: String,
    /// Raw body text, kept for caller-side logging.
    pub body: String,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service returned {} ({}): {}", self.status, self.code, self.message)
    }
}

/// Derives an [`ApiFailure`] from a non-success response.
///
/// Tries the conventional error body first (`error`, `message` or
/// `error_message` for the text, `code` for the code); a body that is not
/// such an object becomes the message verbatim with code `UNKNOWN`; an
/// empty body falls back to the canonical status reason. Never fails.
pub fn classify(response: &RawResponse) -> ApiFailure {
    let status = response.status();
    let body_text = String::from_utf8_lossy(response.body()).to_string();

    let parsed = serde_json::from_slice::<JsonValue>(response.body()).ok();
    let (code, message) = match parsed.as_ref().and_then(JsonValue::as_object) {
        Some(object) => {
            let code = object
                .get("code")
                .map(|c| match c {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_else(|| UNKNOWN_CODE.to_string());
            let message = ["error", "message", "error_message"]
                .iter()
                .find_map(|key| object.get(*key).and_then(JsonValue::as_str))
                .map(str::to_string);
            (code, message)
        }
        None => (UNKNOWN_CODE.to_string(), None),
    };

    let message = message.unwrap_or_else(|| {
        if body_text.is_empty() {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("unexpected status")
                .to_string()
        } else {
            body_text.clone()
        }
    });

    ApiFailure { status, code, message, body: body_text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse::new(status, HashMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn parses_error_field() {
        let failure = classify(&response(401, r#"{"error":"invalid api key"}"#));
        assert_eq!(failure.status, 401);
        assert_eq!(failure.code, UNKNOWN_CODE);
        assert_eq!(failure.message, "invalid api key");
    }

    #[test]
    fn parses_code_and_message_fields() {
        let failure =
            classify(&response(400, r#"{"code":400,"message":"text must not be empty"}"#));
        assert_eq!(failure.code, "400");
        assert_eq!(failure.message, "text must not be empty");
    }

    #[test]
    fn string_code_is_kept_verbatim() {
        let failure =
            classify(&response(403, r#"{"code":"forbidden","error_message":"no access"}"#));
        assert_eq!(failure.code, "forbidden");
        assert_eq!(failure.message, "no access");
    }

    #[test]
    fn non_json_body_becomes_the_message() {
        let failure = classify(&response(502, "Bad Gateway from upstream"));
        assert_eq!(failure.code, UNKNOWN_CODE);
        assert_eq!(failure.message, "Bad Gateway from upstream");
        assert_eq!(failure.body, "Bad Gateway from upstream");
    }

    #[test]
    fn empty_body_falls_back_to_status_reason() {
        let failure = classify(&response(503, ""));
        assert_eq!(failure.code, UNKNOWN_CODE);
        assert_eq!(failure.message, "Service Unavailable");
    }

    #[test]
    fn json_array_body_is_not_treated_as_error_object() {
        let failure = classify(&response(500, r#"["oops"]"#));
        assert_eq!(failure.code, UNKNOWN_CODE);
        assert_eq!(failure.message, r#"["oops"]"#);
    }
}

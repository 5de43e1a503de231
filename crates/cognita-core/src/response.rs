//! Raw responses and typed decoding
//!
//! A [`RawResponse`] is produced once per call and consumed exactly once:
//! decoded into a typed result on success, or classified into a failure.
//! Decoding is strict about the declared shape and lenient about unknown
//! fields; absent optional fields decode to `None`, never to a default.

use crate::error::{CoreResult, Error};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

const EXCERPT_LEN: usize = 200;

/// Status, headers, and raw body bytes of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self { status, headers, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Success is any 2xx status; everything else routes to the classifier.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Decodes the body as UTF-8 text.
    pub fn text(&self) -> CoreResult<String> {
        String::from_utf8(self.body.clone()).map_err(|e| Error::Decode {
            detail: format!("body is not valid UTF-8: {}", e),
            excerpt: excerpt(&self.body),
        })
    }

    /// Decodes the body as a JSON document of the declared type.
    ///
    /// Unknown keys are ignored; a body that is not JSON at all, or whose
    /// shape does not match `T`, is a `Decode` error — never a partially
    /// populated value.
    pub fn json<T: DeserializeOwned>(&self) -> CoreResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::Decode {
            detail: e.to_string(),
            excerpt: excerpt(&self.body),
        })
    }

    /// Decodes one field of a JSON object envelope, e.g. the `languages`
    /// array of `{"languages": [...]}`.
    pub fn json_field<T: DeserializeOwned>(&self, field: &str) -> CoreResult<T> {
        let document: serde_json::Value = self.json()?;
        let value = match &document {
            serde_json::Value::Object(object) => object.get(field),
            _ => None,
        };
        let value = value.ok_or_else(|| Error::Decode {
            detail: format!("response object has no '{}' field", field),
            excerpt: excerpt(&self.body),
        })?;
        serde_json::from_value(value.clone()).map_err(|e| Error::Decode {
            detail: format!("'{}' field: {}", field, e),
            excerpt: excerpt(&self.body),
        })
    }
}

/// Short body excerpt carried in decode errors for caller-side logging.
fn excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let mut end = text.len().min(EXCERPT_LEN);
    while end < text.len() && !text.is_char_boundary(end) {
        end += 1;
    }
    text[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Language {
        language: String,
        confidence: f64,
    }

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse::new(status, HashMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn decodes_json_object_ignoring_unknown_fields() {
        let raw = response(200, r#"{"language":"es","confidence":0.9,"extra":"ignored"}"#);
        let decoded: Language = raw.json().unwrap();
        assert_eq!(decoded, Language { language: "es".to_string(), confidence: 0.9 });
    }

    #[test]
    fn decodes_envelope_field() {
        let raw = response(200, r#"{"languages":[{"language":"es","confidence":0.9}]}"#);
        let decoded: Vec<Language> = raw.json_field("languages").unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].language, "es");
    }

    #[test]
    fn missing_envelope_field_is_decode_error() {
        let raw = response(200, r#"{"models":[]}"#);
        let result: CoreResult<Vec<Language>> = raw.json_field("languages");
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[test]
    fn malformed_json_is_decode_error_with_excerpt() {
        let raw = response(200, "not json");
        let result: CoreResult<Language> = raw.json();
        match result {
            Err(Error::Decode { excerpt, .. }) => assert_eq!(excerpt, "not json"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn decoding_twice_yields_equal_results() {
        let raw = response(200, r#"{"language":"es","confidence":0.9}"#);
        let first: Language = raw.json().unwrap();
        let second: Language = raw.json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn text_decodes_utf8_body() {
        let raw = response(200, "Hola");
        assert_eq!(raw.text().unwrap(), "Hola");
    }

    #[test]
    fn invalid_utf8_text_is_decode_error() {
        let raw = RawResponse::new(200, HashMap::new(), vec![0xff, 0xfe]);
        assert!(matches!(raw.text(), Err(Error::Decode { .. })));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let raw = RawResponse::new(200, headers, Vec::new());
        assert_eq!(raw.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn success_range_is_2xx_inclusive() {
        assert!(response(200, "").is_success());
        assert!(response(299, "").is_success());
        assert!(!response(199, "").is_success());
        assert!(!response(300, "").is_success());
        assert!(!response(404, "").is_success());
    }
}

//! Request descriptor assembly
//!
//! A call is composed incrementally through [`RequestBuilder`] and frozen
//! into an immutable [`RequestDescriptor`] by `build()`. The builder moves
//! by value through the chain, so a descriptor cannot be mutated after it
//! has been built.

use crate::error::{CoreResult, Error};
use std::fmt;

/// HTTP methods recognized by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One part of a multipart form body.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    pub name: String,
    pub data: Vec<u8>,
    pub filename: Option<String>,
    pub mime_type: Option<String>,
}

impl MultipartPart {
    /// A plain text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: value.into().into_bytes(),
            filename: None,
            mime_type: None,
        }
    }

    /// A file field with a filename and MIME type.
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            data,
            filename: Some(filename.into()),
            mime_type: Some(mime_type.into()),
        }
    }
}

/// Request body with its declared content kind.
///
/// Callers pre-normalize scalar-vs-collection payloads into the documented
/// shape before constructing a body; the builder does not guess.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Plain text, sent as `text/plain`.
    Text(String),
    /// JSON document, sent as `application/json`.
    Json(serde_json::Value),
    /// Multipart form, boundary and content type set by the transport.
    Multipart(Vec<MultipartPart>),
}

/// The immutable, fully-assembled representation of one outgoing call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Body>,
}

impl RequestDescriptor {
    pub fn method(&self) -> Method {
        self.method
    }

    /// Path relative to the service endpoint.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters in insertion order, one entry per key.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Headers in insertion order, one entry per (case-insensitive) key.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// True when a header with this name is present, ignoring case.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    pub(crate) fn into_body(self) -> Option<Body> {
        self.body
    }
}

/// Incremental builder for a [`RequestDescriptor`].
#[derive(Debug)]
pub struct RequestBuilder {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Body>,
    body_conflict: bool,
}

impl RequestBuilder {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            body_conflict: false,
        }
    }

    /// Adds a query parameter. A later call for the same key overwrites the
    /// earlier value, keeping the key's original position.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Adds a header. Keys are matched case-insensitively; last write wins.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&key)) {
            Some(entry) => entry.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets a plain-text body.
    pub fn text_body(self, content: impl Into<String>) -> Self {
        self.set_body(Body::Text(content.into()))
    }

    /// Sets a JSON body.
    pub fn json_body(self, document: serde_json::Value) -> Self {
        self.set_body(Body::Json(document))
    }

    /// Sets a multipart form body.
    pub fn multipart_body(self, parts: Vec<MultipartPart>) -> Self {
        self.set_body(Body::Multipart(parts))
    }

    fn set_body(mut self, body: Body) -> Self {
        if self.body.is_some() {
            // Reported from build(), not silently overwritten.
            self.body_conflict = true;
        }
        self.body = Some(body);
        self
    }

    /// Freezes the descriptor. Consumes the builder, so no mutation is
    /// possible once the descriptor exists.
    pub fn build(self) -> CoreResult<RequestDescriptor> {
        if self.body_conflict {
            return Err(Error::Usage("request body set more than once".to_string()));
        }
        Ok(RequestDescriptor {
            method: self.method,
            path: self.path,
            query: self.query,
            headers: self.headers,
            body: self.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_descriptor_with_query_and_headers() {
        let descriptor = RequestBuilder::new(Method::Post, "/v2/translate")
            .query("source", "en")
            .query("target", "es")
            .header("Accept", "application/json")
            .json_body(json!({"text": ["hello"]}))
            .build()
            .unwrap();

        assert_eq!(descriptor.method(), Method::Post);
        assert_eq!(descriptor.path(), "/v2/translate");
        assert_eq!(
            descriptor.query(),
            &[
                ("source".to_string(), "en".to_string()),
                ("target".to_string(), "es".to_string())
            ]
        );
        assert!(descriptor.has_header("accept"));
        assert_eq!(descriptor.body(), Some(&Body::Json(json!({"text": ["hello"]}))));
    }

    #[test]
    fn duplicate_query_key_keeps_last_value() {
        let descriptor = RequestBuilder::new(Method::Get, "/v2/models")
            .query("source", "en")
            .query("default", "true")
            .query("source", "fr")
            .build()
            .unwrap();

        assert_eq!(
            descriptor.query(),
            &[
                ("source".to_string(), "fr".to_string()),
                ("default".to_string(), "true".to_string())
            ]
        );
    }

    #[test]
    fn duplicate_header_key_is_case_insensitive() {
        let descriptor = RequestBuilder::new(Method::Get, "/v2/models")
            .header("Accept", "text/plain")
            .header("accept", "application/json")
            .build()
            .unwrap();

        assert_eq!(
            descriptor.headers(),
            &[("Accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn second_body_is_a_usage_error() {
        let result = RequestBuilder::new(Method::Post, "/v2/identify")
            .text_body("Hola")
            .json_body(json!({"text": "Hola"}))
            .build();

        match result {
            Err(Error::Usage(message)) => assert!(message.contains("body")),
            other => panic!("expected usage error, got {:?}", other),
        }
    }

    #[test]
    fn descriptor_without_body_builds() {
        let descriptor =
            RequestBuilder::new(Method::Get, "/v2/identifiable_languages").build().unwrap();
        assert!(descriptor.body().is_none());
    }
}

//! Transport invoker
//!
//! The only component that touches the network. A descriptor goes in, one
//! raw response or one transport error comes out; no retries. Connection
//! reuse is the underlying client's concern.

use crate::credentials::Credentials;
use crate::error::{CoreResult, Error};
use crate::request::{Body, MultipartPart, RequestDescriptor};
use crate::response::RawResponse;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// Total time allowed for one exchange when the caller does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin wrapper over the HTTP client, configured once per service instance.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
}

impl Transport {
    /// Builds a transport with a finite per-exchange timeout.
    pub fn new(timeout: Duration) -> CoreResult<Self> {
        if timeout.is_zero() {
            return Err(Error::Configuration("timeout must be non-zero".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Transport)?;
        Ok(Self { http })
    }

    /// Sends a frozen descriptor and collects the raw response.
    ///
    /// The descriptor is consumed: it maps to exactly one exchange.
    /// Credentials, when present, are attached as the `Authorization`
    /// header at dispatch; the frozen descriptor itself stays free of
    /// secret material.
    pub async fn send(
        &self,
        url: Url,
        descriptor: RequestDescriptor,
        credentials: Option<&Credentials>,
    ) -> CoreResult<RawResponse> {
        let mut request = self.http.request(descriptor.method().as_reqwest(), url);

        for (key, value) in descriptor.headers() {
            request = request.header(key, value);
        }
        if let Some(credentials) = credentials {
            request = request.header(AUTHORIZATION, credentials.authorization_header());
        }

        let content_type_set = descriptor.has_header("content-type");
        match descriptor.into_body() {
            Some(Body::Text(content)) => {
                if !content_type_set {
                    request = request.header(CONTENT_TYPE, "text/plain");
                }
                request = request.body(content);
            }
            Some(Body::Json(document)) => {
                request = request.json(&document);
            }
            Some(Body::Multipart(parts)) => {
                request = request.multipart(build_form(parts)?);
            }
            None => {}
        }

        let response = request.send().await.map_err(Error::Transport)?;

        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.to_string(), value.to_string());
            }
        }
        let body = response.bytes().await.map_err(Error::Transport)?.to_vec();

        tracing::debug!(status, bytes = body.len(), "received response");
        Ok(RawResponse::new(status, headers, body))
    }
}

fn build_form(parts: Vec<MultipartPart>) -> CoreResult<Form> {
    let mut form = Form::new();
    for part in parts {
        let piece = match (part.filename, part.mime_type) {
            (Some(filename), Some(mime_type)) => Part::bytes(part.data)
                .file_name(filename)
                .mime_str(&mime_type)
                .map_err(|e| Error::Usage(format!("invalid MIME type: {}", e)))?,
            (Some(filename), None) => Part::bytes(part.data).file_name(filename),
            (None, _) => Part::bytes(part.data),
        };
        form = form.part(part.name, piece);
    }
    Ok(form)
}

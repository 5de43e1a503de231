//! Service client: one endpoint, one credential set, one transport
//!
//! A `ServiceClient` is the configured, immutable handle the service
//! façades call through. It is safe to share across tasks: credentials and
//! endpoint never change after construction, and every call builds its own
//! descriptor and receives its own response.

use crate::credentials::Credentials;
use crate::endpoint::Endpoint;
use crate::error::{CoreResult, Error};
use crate::failure::classify;
use crate::request::{Method, RequestBuilder, RequestDescriptor};
use crate::response::RawResponse;
use crate::transport::{Transport, DEFAULT_TIMEOUT};
use std::time::Duration;

/// Configured client bound to one endpoint and one credential set.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    endpoint: Endpoint,
    credentials: Credentials,
    transport: Transport,
}

impl ServiceClient {
    /// Client with the default timeout. See [`ServiceClient::builder`] for
    /// the full set of construction options.
    pub fn new(endpoint: &str, credentials: Credentials) -> CoreResult<Self> {
        Self::builder().endpoint(endpoint).credentials(credentials).build()
    }

    pub fn builder() -> ServiceClientBuilder {
        ServiceClientBuilder::default()
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Starts a request descriptor for one operation.
    pub fn request(&self, method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, path)
    }

    /// Executes a descriptor and returns the raw response, whatever its
    /// status. Only transport failures are errors here.
    pub async fn execute(&self, descriptor: RequestDescriptor) -> CoreResult<RawResponse> {
        let url = self.endpoint.url_for(descriptor.path(), descriptor.query())?;
        tracing::debug!(method = %descriptor.method(), url = %url, "dispatching request");
        self.transport.send(url, descriptor, Some(&self.credentials)).await
    }

    /// Executes a descriptor and routes any non-2xx response through the
    /// error classifier. Success responses come back for decoding.
    pub async fn send(&self, descriptor: RequestDescriptor) -> CoreResult<RawResponse> {
        let response = self.execute(descriptor).await?;
        if response.is_success() {
            Ok(response)
        } else {
            let failure = classify(&response);
            tracing::warn!(status = failure.status, code = %failure.code, "request failed");
            Err(Error::Api(failure))
        }
    }
}

/// Construction options for a [`ServiceClient`].
///
/// Endpoint and credentials are required; configuration problems surface
/// here, at construction, never at call time.
#[derive(Debug, Default)]
pub struct ServiceClientBuilder {
    endpoint: Option<String>,
    credentials: Option<Credentials>,
    timeout: Option<Duration>,
}

impl ServiceClientBuilder {
    /// Base URL of the service instance.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Total time allowed per exchange. Defaults to
    /// [`DEFAULT_TIMEOUT`](crate::transport::DEFAULT_TIMEOUT) (60 seconds);
    /// must be non-zero.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> CoreResult<ServiceClient> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| Error::Configuration("endpoint is required".to_string()))?;
        let endpoint = Endpoint::parse(&endpoint)?;

        let credentials = self
            .credentials
            .ok_or_else(|| Error::Configuration("credentials are required".to_string()))?;
        credentials.validate().map_err(Error::Configuration)?;

        let transport = Transport::new(self.timeout.unwrap_or(DEFAULT_TIMEOUT))?;

        Ok(ServiceClient { endpoint, credentials, transport })
    }
}

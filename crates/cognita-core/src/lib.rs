//! Typed request/response core for the Cognita service clients.
//!
//! Every service façade reuses the same thin pipeline: a [`RequestBuilder`]
//! composes an immutable [`RequestDescriptor`]; the [`ServiceClient`]
//! attaches the instance's [`Credentials`] and hands the descriptor to the
//! transport; the resulting [`RawResponse`] is decoded into a typed result,
//! or classified into an [`ApiFailure`] when the status is outside 2xx.
//!
//! The core holds no state between calls beyond the immutable
//! endpoint/credential pair, so one client can serve any number of
//! concurrent calls.

pub mod client;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod failure;
pub mod request;
pub mod response;
pub mod transport;

// Re-export commonly used types
pub use client::{ServiceClient, ServiceClientBuilder};
pub use credentials::Credentials;
pub use endpoint::Endpoint;
pub use error::{CoreResult, Error};
pub use failure::{classify, ApiFailure};
pub use request::{Body, Method, MultipartPart, RequestBuilder, RequestDescriptor};
pub use response::RawResponse;
pub use transport::{Transport, DEFAULT_TIMEOUT};

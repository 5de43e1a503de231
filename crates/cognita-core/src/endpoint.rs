//! Service endpoint handling
//!
//! An [`Endpoint`] is the validated base URL of one service instance. Paths
//! are appended to the endpoint's own path (the platform mounts every
//! service under a base path such as `/translation/api`, so a leading `/`
//! on an operation path never discards that base).

use crate::error::{CoreResult, Error};
use url::Url;

/// Validated base URL for a service instance.
///
/// Supplied once at client construction; overridable per instance (for
/// test doubles), never per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
}

impl Endpoint {
    /// Parses and validates a base URL.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        if raw.is_empty() {
            return Err(Error::Configuration("endpoint must not be empty".to_string()));
        }
        let base = Url::parse(raw).map_err(|e| {
            Error::Configuration(format!("invalid endpoint '{}': {}", raw, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "endpoint '{}' must use http or https",
                raw
            )));
        }
        Ok(Self { base })
    }

    pub fn as_str(&self) -> &str {
        self.base.as_str()
    }

    /// Full URL for one call: endpoint path + operation path + query pairs.
    pub fn url_for(&self, path: &str, query: &[(String, String)]) -> CoreResult<Url> {
        let mut url = self.base.clone();

        let suffix = path.trim_start_matches('/');
        if !suffix.is_empty() {
            let joined = format!("{}/{}", url.path().trim_end_matches('/'), suffix);
            url.set_path(&joined);
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_invalid_endpoints() {
        assert!(Endpoint::parse("").is_err());
        assert!(Endpoint::parse("not-a-url").is_err());
        assert!(Endpoint::parse("ftp://example.com").is_err());
    }

    #[test]
    fn appends_operation_path_to_base_path() {
        let endpoint = Endpoint::parse("https://gateway.example.com/translation/api").unwrap();
        let url = endpoint.url_for("/v2/identify", &[]).unwrap();
        assert_eq!(url.as_str(), "https://gateway.example.com/translation/api/v2/identify");
    }

    #[test]
    fn trailing_and_leading_slashes_collapse() {
        let endpoint = Endpoint::parse("https://gateway.example.com/translation/api/").unwrap();
        let url = endpoint.url_for("v2/models", &[]).unwrap();
        assert_eq!(url.as_str(), "https://gateway.example.com/translation/api/v2/models");
    }

    #[test]
    fn bare_host_endpoint_keeps_path() {
        let endpoint = Endpoint::parse("http://127.0.0.1:8080").unwrap();
        let url = endpoint.url_for("/v2/translate", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/v2/translate");
    }

    #[test]
    fn query_pairs_are_encoded() {
        let endpoint = Endpoint::parse("https://gateway.example.com").unwrap();
        let query = vec![
            ("source".to_string(), "en".to_string()),
            ("q".to_string(), "a b".to_string()),
        ];
        let url = endpoint.url_for("/v2/models", &query).unwrap();
        assert_eq!(url.as_str(), "https://gateway.example.com/v2/models?source=en&q=a+b");
    }
}

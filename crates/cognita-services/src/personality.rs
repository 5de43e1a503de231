//! Personality insights service (`/v2`)
//!
//! Derives a personality portrait from a body of text. The profile comes
//! back as a tree of characteristics; sampling-error fields are optional on
//! the wire and stay `None` when the service omits them, so callers can
//! tell "not reported" apart from a zero score.

use cognita_core::{CoreResult, Error, Method, ServiceClient};
use serde::{Deserialize, Serialize};

/// Public endpoint of the hosted personality insights service.
pub const DEFAULT_ENDPOINT: &str = "https://gateway.cognita.cloud/personality-insights/api";

/// One characteristic in the profile tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characteristic {
    /// Globally unique identifier of the characteristic.
    pub id: String,
    /// User-displayable name.
    pub name: Option<String>,
    /// Model category, e.g. "personality", "needs" or "values".
    pub category: Option<String>,
    /// Normalized percentile, 0 to 1.
    pub percentage: Option<f64>,
    /// 95% confidence interval around the percentage.
    pub sampling_error: Option<f64>,
    pub raw_score: Option<f64>,
    pub raw_sampling_error: Option<f64>,
    pub children: Option<Vec<Characteristic>>,
}

/// A personality profile for one author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Option<String>,
    pub source: Option<String>,
    pub word_count: Option<u64>,
    pub word_count_message: Option<String>,
    #[serde(rename = "processed_lang")]
    pub processed_language: Option<String>,
    pub tree: Characteristic,
}

/// Named, typed options for a profile call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileOptions {
    /// Text to analyze; the service wants at least a few thousand words for
    /// a stable portrait, but any non-empty text is accepted.
    pub text: String,
    /// Language of the submitted text, sent as `Content-Language`.
    pub content_language: Option<String>,
    /// Language for characteristic names, sent as `Accept-Language`.
    pub accept_language: Option<String>,
    /// Include raw scores and raw sampling errors in the profile.
    pub include_raw: Option<bool>,
}

impl ProfileOptions {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    fn validate(&self) -> CoreResult<()> {
        if self.text.is_empty() {
            return Err(Error::Usage("text must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Client for the personality insights service.
pub struct PersonalityInsightsService {
    client: ServiceClient,
}

impl PersonalityInsightsService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Analyzes the submitted text into a personality profile.
    pub async fn profile(&self, options: &ProfileOptions) -> CoreResult<Profile> {
        options.validate()?;
        tracing::debug!(chars = options.text.len(), "requesting personality profile");
        let mut builder = self
            .client
            .request(Method::Post, "/v2/profile")
            .header("Accept", "application/json")
            .text_body(options.text.clone());
        if let Some(content_language) = &options.content_language {
            builder = builder.header("Content-Language", content_language);
        }
        if let Some(accept_language) = &options.accept_language {
            builder = builder.header("Accept-Language", accept_language);
        }
        if let Some(include_raw) = options.include_raw {
            builder = builder.query("include_raw", include_raw.to_string());
        }
        let response = self.client.send(builder.build()?).await?;
        response.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_requires_text() {
        assert!(ProfileOptions::default().validate().is_err());
        assert!(ProfileOptions::text("enough words").validate().is_ok());
    }

    #[test]
    fn characteristic_distinguishes_absent_from_zero() {
        let with_raw: Characteristic = serde_json::from_str(
            r#"{"id":"Openness","percentage":0.25,"sampling_error":0.04,"raw_score":0.0}"#,
        )
        .unwrap();
        assert_eq!(with_raw.raw_score, Some(0.0));
        assert_eq!(with_raw.raw_sampling_error, None);

        let without_raw: Characteristic =
            serde_json::from_str(r#"{"id":"Openness","percentage":0.25}"#).unwrap();
        assert_eq!(without_raw.raw_score, None);
    }

    #[test]
    fn profile_tree_decodes_recursively() {
        let profile: Profile = serde_json::from_str(
            r#"{
                "id": "abc",
                "source": "cli",
                "word_count": 4500,
                "processed_lang": "en",
                "tree": {
                    "id": "r",
                    "name": "root",
                    "children": [
                        {"id": "personality", "category": "personality", "children": [
                            {"id": "Openness", "name": "Openness", "percentage": 0.8}
                        ]}
                    ]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(profile.processed_language.as_deref(), Some("en"));
        let children = profile.tree.children.as_ref().unwrap();
        assert_eq!(children[0].children.as_ref().unwrap()[0].percentage, Some(0.8));
    }
}

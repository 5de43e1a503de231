//! Language translation service (`/v2`)
//!
//! Translates text between languages and identifies the language a text is
//! written in. Wire payloads use lower-snake-case field names; the models
//! below spell out every mapping that differs from the programmatic name.

use cognita_core::{CoreResult, Error, Method, ServiceClient};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Public endpoint of the hosted translation service.
pub const DEFAULT_ENDPOINT: &str = "https://gateway.cognita.cloud/translation/api";

/// A language the service can identify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiableLanguage {
    pub language: String,
    pub name: Option<String>,
}

/// A language identified in submitted text, with the service's confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedLanguage {
    pub language: String,
    pub confidence: f64,
}

/// One translated paragraph, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub translation: String,
}

/// Result of a translate call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub word_count: Option<u64>,
    pub character_count: Option<u64>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// A translation model known to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationModel {
    pub model_id: String,
    pub source: Option<String>,
    pub target: Option<String>,
    pub base_model_id: Option<String>,
    pub domain: Option<String>,
    pub customizable: Option<bool>,
    pub default_model: Option<bool>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub name: Option<String>,
}

/// Filters for the model listing. Each filter is applied independently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelFilter {
    /// Only models translating from this source language.
    pub source: Option<String>,
    /// Only models translating into this target language.
    pub target: Option<String>,
    /// Only default (or only non-default) models.
    pub default_model: Option<bool>,
}

/// Named, typed options for a translate call.
///
/// `model_id`, or both `source` and `target`, must be specified; when both
/// forms are present the service resolves by `model_id`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslateOptions {
    /// Paragraphs to translate, in order.
    pub text: Vec<String>,
    pub source: Option<String>,
    pub target: Option<String>,
    pub model_id: Option<String>,
}

impl TranslateOptions {
    /// Translate a single paragraph with an explicit model. The paragraph
    /// is normalized into the one-element list the wire format expects.
    pub fn with_model(text: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self { text: vec![text.into()], model_id: Some(model_id.into()), ..Self::default() }
    }

    /// Translate a single paragraph between a source and target language.
    pub fn between(
        text: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            text: vec![text.into()],
            source: Some(source.into()),
            target: Some(target.into()),
            ..Self::default()
        }
    }

    fn validate(&self) -> CoreResult<()> {
        if self.text.is_empty() || self.text.iter().all(String::is_empty) {
            return Err(Error::Usage("text must not be empty".to_string()));
        }
        let has_model = self.model_id.as_deref().is_some_and(|m| !m.is_empty());
        let has_languages = self.source.as_deref().is_some_and(|s| !s.is_empty())
            && self.target.as_deref().is_some_and(|t| !t.is_empty());
        if !has_model && !has_languages {
            return Err(Error::Usage(
                "model_id or source and target must be specified".to_string(),
            ));
        }
        Ok(())
    }
}

/// Client for the translation service.
pub struct TranslationService {
    client: ServiceClient,
}

impl TranslationService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// Lists the languages the service can identify.
    pub async fn identifiable_languages(&self) -> CoreResult<Vec<IdentifiableLanguage>> {
        let descriptor = self
            .client
            .request(Method::Get, "/v2/identifiable_languages")
            .header("Accept", "application/json")
            .build()?;
        let response = self.client.send(descriptor).await?;
        response.json_field("languages")
    }

    /// Lists translation models, optionally filtered. The `source` and
    /// `target` filters are independent of one another.
    pub async fn models(&self, filter: &ModelFilter) -> CoreResult<Vec<TranslationModel>> {
        let mut builder = self
            .client
            .request(Method::Get, "/v2/models")
            .header("Accept", "application/json");
        if let Some(source) = &filter.source {
            builder = builder.query("source", source);
        }
        if let Some(target) = &filter.target {
            builder = builder.query("target", target);
        }
        if let Some(default_model) = filter.default_model {
            builder = builder.query("default", default_model.to_string());
        }
        let response = self.client.send(builder.build()?).await?;
        response.json_field("models")
    }

    /// Identifies the language the text is written in. Candidates come back
    /// ordered by confidence.
    pub async fn identify(&self, text: &str) -> CoreResult<Vec<IdentifiedLanguage>> {
        if text.is_empty() {
            return Err(Error::Usage("text must not be empty".to_string()));
        }
        let descriptor = self
            .client
            .request(Method::Post, "/v2/identify")
            .header("Accept", "application/json")
            .text_body(text)
            .build()?;
        let response = self.client.send(descriptor).await?;
        response.json_field("languages")
    }

    /// Translates paragraphs of text. Validation happens here, at the call
    /// boundary, before anything touches the network.
    pub async fn translate(&self, options: &TranslateOptions) -> CoreResult<TranslationResult> {
        options.validate()?;
        tracing::debug!(paragraphs = options.text.len(), "translating text");
        let mut builder = self
            .client
            .request(Method::Post, "/v2/translate")
            .header("Accept", "application/json")
            .json_body(json!({ "text": options.text }));
        if let Some(source) = &options.source {
            builder = builder.query("source", source);
        }
        if let Some(target) = &options.target {
            builder = builder.query("target", target);
        }
        if let Some(model_id) = &options.model_id {
            builder = builder.query("model_id", model_id);
        }
        let response = self.client.send(builder.build()?).await?;
        response.json()
    }
}

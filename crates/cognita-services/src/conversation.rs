//! Conversational messaging service (`/v1`)
//!
//! Sends a user message to a workspace and returns the assistant's reply
//! with recognized intents and entities. The service is versioned by a
//! date query parameter fixed at construction time.

use cognita_core::{CoreResult, Error, Method, ServiceClient};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Public endpoint of the hosted conversation service.
pub const DEFAULT_ENDPOINT: &str = "https://gateway.cognita.cloud/conversation/api";

/// API version understood by this client.
pub const VERSION_DATE_2016_07_11: &str = "2016-07-11";

/// User input carried by a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageInput {
    pub text: String,
}

/// An intent with the service's confidence in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub confidence: f64,
    pub intent: String,
}

impl Intent {
    pub fn new(intent: impl Into<String>, confidence: f64) -> Self {
        Self { confidence, intent: intent.into() }
    }
}

/// An entity recognized in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<u32>>,
    pub value: String,
}

impl Entity {
    pub fn new(
        entity: impl Into<String>,
        value: impl Into<String>,
        location: Option<Vec<u32>>,
    ) -> Self {
        Self { entity: entity.into(), location, value: value.into() }
    }
}

/// Output the assistant produced for a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputData {
    #[serde(default)]
    pub text: Vec<String>,
}

/// A message to send to a workspace.
///
/// Optional fields are omitted from the wire payload entirely, never
/// serialized as null. Field declaration order matches the wire layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_intents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<JsonValue>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub entities: Vec<Entity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<MessageInput>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub intents: Vec<Intent>,
}

impl MessageRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user's input text.
    pub fn input_text(mut self, text: impl Into<String>) -> Self {
        self.input = Some(MessageInput { text: text.into() });
        self
    }

    /// Adds an intent the caller has already recognized.
    pub fn intent(mut self, intent: Intent) -> Self {
        self.intents.push(intent);
        self
    }

    /// Adds an entity the caller has already recognized.
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Asks the service to return all matching intents, not just the best.
    pub fn alternate_intents(mut self, alternate_intents: bool) -> Self {
        self.alternate_intents = Some(alternate_intents);
        self
    }

    /// Carries dialog state from the previous turn.
    pub fn context(mut self, context: JsonValue) -> Self {
        self.context = Some(context);
        self
    }
}

/// The assistant's reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub alternate_intents: Option<bool>,
    pub context: Option<JsonValue>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    pub input: Option<MessageInput>,
    #[serde(default)]
    pub intents: Vec<Intent>,
    pub output: Option<OutputData>,
}

impl MessageResponse {
    /// The reply text lines, empty when the assistant produced none.
    pub fn text(&self) -> &[String] {
        self.output.as_ref().map(|o| o.text.as_slice()).unwrap_or(&[])
    }

    /// The reply text joined with a separator.
    pub fn text_concatenated(&self, separator: &str) -> String {
        self.text().join(separator)
    }
}

/// Client for the conversation service.
pub struct ConversationService {
    client: ServiceClient,
    version: String,
}

impl ConversationService {
    /// Service speaking the current API version.
    pub fn new(client: ServiceClient) -> Self {
        Self::with_version(client, VERSION_DATE_2016_07_11)
    }

    /// Service pinned to an explicit API version date.
    pub fn with_version(client: ServiceClient, version: impl Into<String>) -> Self {
        Self { client, version: version.into() }
    }

    /// Sends a message to a workspace and returns the assistant's reply.
    pub async fn message(
        &self,
        workspace_id: &str,
        request: &MessageRequest,
    ) -> CoreResult<MessageResponse> {
        if workspace_id.is_empty() {
            return Err(Error::Usage("workspace_id must not be empty".to_string()));
        }
        tracing::debug!(workspace_id, version = %self.version, "sending message");
        let body = serde_json::to_value(request)
            .map_err(|e| Error::Usage(format!("message request is not serializable: {}", e)))?;
        let descriptor = self
            .client
            .request(Method::Post, format!("/v1/workspaces/{}/message", workspace_id))
            .query("version", &self.version)
            .header("Accept", "application/json")
            .json_body(body)
            .build()?;
        let response = self.client.send(descriptor).await?;
        response.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_request_serializes_only_set_fields() {
        let request = MessageRequest::new()
            .input_text("I'd like to get insurance to for my home")
            .intent(Intent::new("turn_off", 0.0))
            .entity(Entity::new("car", "ford", None))
            .alternate_intents(true);

        let wire = serde_json::to_string(&request).unwrap();
        assert_eq!(
            wire,
            "{\"alternate_intents\":true,\"entities\":[{\"entity\":\"car\",\"value\":\"ford\"}],\
             \"input\":{\"text\":\"I'd like to get insurance to for my home\"},\
             \"intents\":[{\"confidence\":0.0,\"intent\":\"turn_off\"}]}"
        );
    }

    #[test]
    fn empty_message_serializes_to_empty_object() {
        let wire = serde_json::to_string(&MessageRequest::new()).unwrap();
        assert_eq!(wire, "{}");
    }

    #[test]
    fn response_text_helpers_handle_missing_output() {
        let response = MessageResponse::default();
        assert!(response.text().is_empty());
        assert_eq!(response.text_concatenated(" "), "");

        let response = MessageResponse {
            output: Some(OutputData {
                text: vec!["Do you want".to_string(), "a quote?".to_string()],
            }),
            ..Default::default()
        };
        assert_eq!(response.text_concatenated(" "), "Do you want a quote?");
    }
}

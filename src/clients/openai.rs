//! Client for the OpenAI Responses and Images endpoints.
//!
//! Responses calls are chained server-side: every reply carries an id that a
//! later call can supply as `previous_response_id` to resume the same
//! conversation without resending any transcript.

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ClientError;
use crate::config::OpenAiConfig;

/// Opaque forward-reference to a stored response. Treated as a capability
/// token: never inspected, only threaded into the next call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasoningEffort {
    Low,
    Medium,
}

impl ReasoningEffort {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResponseRequest {
    pub input: String,
    pub previous: Option<ResponseId>,
    pub effort: ReasoningEffort,
    pub web_search: bool,
}

#[derive(Debug, Clone)]
pub struct ResponseReply {
    pub id: ResponseId,
    pub output_text: String,
}

#[async_trait]
pub trait ResponsesApi: Send + Sync {
    async fn create_response(&self, req: ResponseRequest) -> Result<ResponseReply, ClientError>;
}

#[async_trait]
pub trait ImagesApi: Send + Sync {
    /// Generates one image for the prompt and returns the decoded payload.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, ClientError>;
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    image_model: String,
    image_size: String,
    image_quality: String,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(client: Client, api_key: String, config: &OpenAiConfig) -> Self {
        Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            chat_model: config.chat_model.clone(),
            image_model: config.image_model.clone(),
            image_size: config.image_size.clone(),
            image_quality: config.image_quality.clone(),
        }
    }

    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                service: "OpenAI",
                status,
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Deserialize)]
struct ResponsePayload {
    id: String,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl ResponsePayload {
    /// Concatenates the user-facing text parts, skipping reasoning items.
    fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| &item.content)
            .filter(|part| part.kind == "output_text")
            .map(|part| part.text.as_str())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ImagePayload {
    data: Vec<ImageDatum>,
}

#[derive(Debug, Deserialize)]
struct ImageDatum {
    b64_json: String,
}

#[async_trait]
impl ResponsesApi for OpenAiClient {
    async fn create_response(&self, req: ResponseRequest) -> Result<ResponseReply, ClientError> {
        let mut body = json!({
            "model": self.chat_model,
            "input": req.input,
            "reasoning": { "effort": req.effort.as_str() },
            "store": true,
        });
        if let Some(previous) = &req.previous {
            body["previous_response_id"] = json!(previous.0);
        }
        if req.web_search {
            body["tools"] = json!([{ "type": "web_search" }]);
        }

        let raw = self.post_json("/responses", &body).await?;
        let payload: ResponsePayload = serde_json::from_value(raw)
            .map_err(|e| ClientError::Decode(format!("responses payload: {e}")))?;

        Ok(ResponseReply {
            output_text: payload.output_text(),
            id: ResponseId(payload.id),
        })
    }
}

#[async_trait]
impl ImagesApi for OpenAiClient {
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, ClientError> {
        let body = json!({
            "model": self.image_model,
            "prompt": prompt,
            "size": self.image_size,
            "quality": self.image_quality,
            "n": 1,
        });

        let raw = self.post_json("/images/generations", &body).await?;
        let payload: ImagePayload = serde_json::from_value(raw)
            .map_err(|e| ClientError::Decode(format!("image payload: {e}")))?;

        let datum = payload
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Decode("image payload has no data".to_string()))?;

        base64::engine::general_purpose::STANDARD
            .decode(datum.b64_json)
            .map_err(|e| ClientError::Decode(format!("image base64: {e}")))
    }
}

//! Client for the Anthropic Messages endpoint.
//!
//! Unlike the Responses API there is no server-side conversation state, so
//! callers carry the transcript themselves and replay it on follow-up calls.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ClientError;
use crate::config::AnthropicConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const WEB_SEARCH_TOOL: &str = "web_search_20250305";

/// One transcript entry. Content is kept as raw JSON so assistant replies
/// (which may interleave thinking and tool-use blocks) round-trip untouched.
#[derive(Debug, Clone, Serialize)]
pub struct MessageParam {
    pub role: String,
    pub content: serde_json::Value,
}

impl MessageParam {
    #[must_use]
    pub fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: json!([{ "type": "text", "text": text }]),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageRequest {
    pub system: Option<String>,
    pub messages: Vec<MessageParam>,
    pub web_search: bool,
    pub thinking_budget: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub content: Vec<serde_json::Value>,
}

impl MessageReply {
    /// Joins the text blocks of the reply, dropping thinking and tool-use
    /// blocks.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
            .filter_map(|block| block.get("text").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Repackages the full reply, thinking blocks included, as an assistant
    /// transcript entry for a follow-up call.
    #[must_use]
    pub fn into_assistant_param(self) -> MessageParam {
        MessageParam {
            role: "assistant".to_string(),
            content: serde_json::Value::Array(self.content),
        }
    }
}

#[async_trait]
pub trait MessagesApi: Send + Sync {
    async fn create_message(&self, req: MessageRequest) -> Result<MessageReply, ClientError>;
}

#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    #[must_use]
    pub fn new(client: Client, api_key: String, config: &AnthropicConfig) -> Self {
        Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }
}

#[async_trait]
impl MessagesApi for AnthropicClient {
    async fn create_message(&self, req: MessageRequest) -> Result<MessageReply, ClientError> {
        let mut body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": 1,
            "messages": req.messages,
        });
        if let Some(system) = &req.system {
            body["system"] = json!(system);
        }
        if req.web_search {
            body["tools"] = json!([{ "type": WEB_SEARCH_TOOL, "name": "web_search" }]);
        }
        if let Some(budget) = req.thinking_budget {
            body["thinking"] = json!({ "type": "enabled", "budget_tokens": budget });
        }

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                service: "Anthropic",
                status,
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_text_skips_thinking_blocks() {
        let reply = MessageReply {
            content: vec![
                json!({ "type": "thinking", "thinking": "internal" }),
                json!({ "type": "text", "text": "first" }),
                json!({ "type": "web_search_tool_result", "content": [] }),
                json!({ "type": "text", "text": "second" }),
            ],
        };
        assert_eq!(reply.text(), "first\n\nsecond");
    }

    #[test]
    fn test_reply_text_empty_content() {
        let reply = MessageReply { content: vec![] };
        assert_eq!(reply.text(), "");
    }

    #[test]
    fn test_assistant_param_keeps_all_blocks() {
        let reply = MessageReply {
            content: vec![
                json!({ "type": "thinking", "thinking": "internal" }),
                json!({ "type": "text", "text": "answer" }),
            ],
        };
        let param = reply.into_assistant_param();
        assert_eq!(param.role, "assistant");
        assert_eq!(param.content.as_array().map(Vec::len), Some(2));
    }
}

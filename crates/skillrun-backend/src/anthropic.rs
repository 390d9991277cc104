use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use skillrun_core::{Result, SkillError};

use crate::backend::InferenceBackend;

/// Anthropic messages API backend.
pub struct AnthropicBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicBackend {
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.anthropic.com/v1".into(),
            model,
            max_tokens,
        }
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }
}

/// Join the text blocks of a messages-API response body.
fn text_from_response(data: &serde_json::Value) -> String {
    data["content"]
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|b| {
                    if b["type"] == "text" {
                        b["text"].as_str()
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[async_trait]
impl InferenceBackend for AnthropicBackend {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn infer(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{ "role": "user", "content": prompt }],
        });
        debug!(model = %self.model, prompt_len = prompt.len(), "sending inference request");

        let resp = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SkillError::Backend(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(SkillError::Backend(format!("HTTP {status}: {text}")));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| SkillError::Backend(e.to_string()))?;

        Ok(text_from_response(&data).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_text_blocks_and_skips_others() {
        let data = serde_json::json!({
            "content": [
                { "type": "text", "text": "Hello" },
                { "type": "tool_use", "name": "nope" },
                { "type": "text", "text": ", world" },
            ]
        });
        assert_eq!(text_from_response(&data), "Hello, world");
    }

    #[test]
    fn empty_content_yields_empty_string() {
        assert_eq!(text_from_response(&serde_json::json!({})), "");
        assert_eq!(
            text_from_response(&serde_json::json!({ "content": [] })),
            ""
        );
    }
}

use anyhow::{Context, Result};
use futures_util::{Stream, StreamExt};
use reqwest::Client;
use serde::Serialize;
use std::borrow::Cow;
use std::pin::Pin;

use super::sse_parser::sse_to_text_stream;

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

/// Streaming client for an OpenAI-compatible `/v1/chat/completions` endpoint.
///
/// Every capability request is a system prompt plus the user's text.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl CompletionClient {
    pub fn new(client: Client, endpoint: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            model,
            api_key,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }

    pub async fn complete_stream(
        &self,
        system_prompt: String,
        user_text: &str,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<String>> + Send>>> {
        let url = self.url();

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: Cow::Owned(system_prompt),
                },
                ChatMessage {
                    role: "user",
                    content: Cow::Borrowed(user_text),
                },
            ],
            stream: true,
        };

        let mut http_request = self.client.post(&url).json(&body);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        tracing::debug!(%url, model = %self.model, "sending completion request");

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed with status {status}: {body}");
        }

        Ok(Box::pin(sse_to_text_stream(response.bytes_stream())))
    }

    /// Runs a completion and collects the streamed fragments into one string.
    pub async fn complete(&self, system_prompt: String, user_text: &str) -> Result<String> {
        let mut stream = self.complete_stream(system_prompt, user_text).await?;
        let mut output = String::new();

        while let Some(fragment) = stream.next().await {
            output.push_str(&fragment?);
        }

        let output = output.trim();
        if output.is_empty() {
            anyhow::bail!("API returned an empty response");
        }
        Ok(output.to_string())
    }
}

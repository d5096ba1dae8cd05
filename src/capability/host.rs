use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::client::CompletionClient;
use super::detection::parse_candidates;
use super::prompt::{DETECTOR_PROMPT, build_summarizer_prompt, build_translator_prompt};
use super::{
    CapabilityHost, CapabilityKind, LanguageCandidate, LanguageDetector, Summarizer,
    SummarizerOptions, Translator, TranslatorOptions,
};
use crate::config::{CapabilityBinding, CapabilityBindings};

/// Capability host backed by OpenAI-compatible chat completion endpoints.
///
/// A capability is available when the configuration binds it to a provider.
pub struct OpenAiHost {
    client: Client,
    bindings: CapabilityBindings,
}

impl OpenAiHost {
    pub fn new(bindings: CapabilityBindings) -> Self {
        Self {
            client: Client::new(),
            bindings,
        }
    }

    fn completion_client(&self, kind: CapabilityKind) -> Result<CompletionClient> {
        let CapabilityBinding {
            endpoint,
            model,
            api_key,
            ..
        } = self
            .bindings
            .get(kind)
            .with_context(|| format!("No provider is configured for the {kind}"))?;

        Ok(CompletionClient::new(
            self.client.clone(),
            endpoint.clone(),
            model.clone(),
            api_key.clone(),
        ))
    }
}

#[async_trait]
impl CapabilityHost for OpenAiHost {
    fn is_available(&self, kind: CapabilityKind) -> bool {
        self.bindings.get(kind).is_some()
    }

    async fn create_detector(&self) -> Result<Box<dyn LanguageDetector>> {
        let client = self.completion_client(CapabilityKind::Detector)?;
        Ok(Box::new(ChatDetector { client }))
    }

    async fn create_summarizer(&self, options: &SummarizerOptions) -> Result<Box<dyn Summarizer>> {
        let client = self.completion_client(CapabilityKind::Summarizer)?;
        tracing::debug!(
            format = options.format.as_str(),
            length = options.length.as_str(),
            "creating summarizer"
        );
        Ok(Box::new(ChatSummarizer {
            client,
            system_prompt: build_summarizer_prompt(options),
        }))
    }

    async fn create_translator(&self, options: &TranslatorOptions) -> Result<Box<dyn Translator>> {
        let client = self.completion_client(CapabilityKind::Translator)?;
        Ok(Box::new(ChatTranslator {
            client,
            system_prompt: build_translator_prompt(
                &options.source_language,
                &options.target_language,
            ),
        }))
    }
}

struct ChatDetector {
    client: CompletionClient,
}

#[async_trait]
impl LanguageDetector for ChatDetector {
    async fn detect(&self, text: &str) -> Result<Vec<LanguageCandidate>> {
        let reply = self.client.complete(DETECTOR_PROMPT.to_string(), text).await?;
        parse_candidates(&reply)
    }
}

struct ChatSummarizer {
    client: CompletionClient,
    system_prompt: String,
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        self.client.complete(self.system_prompt.clone(), text).await
    }
}

struct ChatTranslator {
    client: CompletionClient,
    system_prompt: String,
}

#[async_trait]
impl Translator for ChatTranslator {
    async fn translate(&self, text: &str) -> Result<String> {
        self.client.complete(self.system_prompt.clone(), text).await
    }
}

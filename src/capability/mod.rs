//! AI capabilities consumed by the chat store.
//!
//! A [`CapabilityHost`] exposes up to three capabilities (language detection,
//! summarization, translation). Each one is probed for availability before use
//! and created on demand with its configuration, mirroring a `create()` then
//! call flow. [`OpenAiHost`] backs them with OpenAI-compatible endpoints.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

mod client;
mod detection;
mod host;
mod language;
mod prompt;
mod sse_parser;

pub use client::CompletionClient;
pub use detection::parse_candidates;
pub use host::OpenAiHost;
pub use language::{
    DEFAULT_TARGET_LANGUAGE, TARGET_LANGUAGES, UNKNOWN_LANGUAGE, language_name, print_languages,
    validate_target_language,
};

/// The capabilities a host may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Detector,
    Summarizer,
    Translator,
}

impl CapabilityKind {
    pub const ALL: [Self; 3] = [Self::Detector, Self::Summarizer, Self::Translator];

    /// Short name used in configuration sections.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Detector => "detector",
            Self::Summarizer => "summarizer",
            Self::Translator => "translator",
        }
    }

    /// Human-readable name of the action the capability performs.
    pub const fn action(self) -> &'static str {
        match self {
            Self::Detector => "Language detection",
            Self::Summarizer => "Summarization",
            Self::Translator => "Translation",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One ranked guess returned by a [`LanguageDetector`].
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageCandidate {
    pub detected_language: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryTask {
    #[default]
    Summarization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryFormat {
    #[default]
    PlainText,
    Markdown,
}

impl SummaryFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlainText => "plain-text",
            Self::Markdown => "markdown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLength {
    #[default]
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

/// Options passed when creating a summarizer.
///
/// The default is the fixed configuration the chat uses: a short,
/// plain-text summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummarizerOptions {
    pub task: SummaryTask,
    pub format: SummaryFormat,
    pub length: SummaryLength,
}

/// Options passed when creating a translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorOptions {
    pub source_language: String,
    pub target_language: String,
}

#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Returns candidates ordered by confidence, most likely first.
    async fn detect(&self, text: &str) -> Result<Vec<LanguageCandidate>>;
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String>;
}

/// Something that exposes capabilities by name.
#[async_trait]
pub trait CapabilityHost: Send + Sync {
    /// Returns `true` if the host exposes the capability at all.
    fn is_available(&self, kind: CapabilityKind) -> bool;

    async fn create_detector(&self) -> Result<Box<dyn LanguageDetector>>;

    async fn create_summarizer(&self, options: &SummarizerOptions) -> Result<Box<dyn Summarizer>>;

    async fn create_translator(&self, options: &TranslatorOptions) -> Result<Box<dyn Translator>>;
}

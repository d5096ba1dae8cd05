//! Message store and the actions that fill in derived fields.
//!
//! The message list is never mutated in place. Every update re-reads the
//! current list, copies it, changes one field of one record and swaps the
//! copy in, so actions that finish in any order each keep their own field
//! (last write wins per field).

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::capability::{
    CapabilityHost, CapabilityKind, SummarizerOptions, TranslatorOptions, UNKNOWN_LANGUAGE,
    validate_target_language,
};
use crate::error::ChatError;

/// Messages must be longer than this (in characters) to offer a summary.
pub const SUMMARY_MIN_CHARS: usize = 150;

/// Only messages detected as this language offer a summary.
pub const SUMMARY_LANGUAGE: &str = "en";

/// A translation and the language it was produced for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub language: String,
    pub text: String,
}

/// One submitted text and what the capabilities derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    detected_language: String,
    summary: Option<String>,
    translation: Option<Translation>,
}

impl Message {
    pub fn new(text: impl Into<String>, detected_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detected_language: detected_language.into(),
            summary: None,
            translation: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Language code, or `"unknown"` if detection gave nothing.
    pub fn detected_language(&self) -> &str {
        &self.detected_language
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub const fn translation(&self) -> Option<&Translation> {
        self.translation.as_ref()
    }

    /// Whether the summarize action should be offered for this message.
    pub fn offers_summary(&self) -> bool {
        self.detected_language == SUMMARY_LANGUAGE
            && self.text.chars().count() > SUMMARY_MIN_CHARS
    }
}

#[derive(Debug)]
struct UiState {
    draft: String,
    target_language: String,
    error: Option<String>,
}

/// Ordered messages plus the draft, selected target language and last error.
pub struct MessageStore {
    host: Arc<dyn CapabilityHost>,
    messages: RwLock<Arc<Vec<Message>>>,
    ui: Mutex<UiState>,
}

impl MessageStore {
    pub fn new(host: Arc<dyn CapabilityHost>, target_language: impl Into<String>) -> Self {
        Self {
            host,
            messages: RwLock::new(Arc::new(Vec::new())),
            ui: Mutex::new(UiState {
                draft: String::new(),
                target_language: target_language.into(),
                error: None,
            }),
        }
    }

    /// A snapshot of the message list.
    pub fn messages(&self) -> Arc<Vec<Message>> {
        Arc::clone(&self.messages.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn message(&self, index: usize) -> Option<Message> {
        self.messages().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.messages().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }

    pub fn draft(&self) -> String {
        self.with_ui(|ui| ui.draft.clone())
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        let text = text.into();
        self.with_ui(|ui| ui.draft = text);
    }

    pub fn target_language(&self) -> String {
        self.with_ui(|ui| ui.target_language.clone())
    }

    /// The last reported error, if no submission has succeeded since.
    pub fn error(&self) -> Option<String> {
        self.with_ui(|ui| ui.error.clone())
    }

    /// Selects the language later translations are produced in.
    pub fn select_target_language(&self, code: &str) -> Result<(), ChatError> {
        let result = validate_target_language(code)
            .map_err(|e| ChatError::validation(e.to_string()))
            .map(|()| self.with_ui(|ui| ui.target_language = code.to_string()));
        self.report(result)
    }

    /// Appends the current draft as a new message and returns its index.
    ///
    /// The draft's language is detected first; when detection is unavailable,
    /// fails or returns nothing the message is stored as `"unknown"`. On
    /// success the draft and the error slot are cleared.
    pub async fn submit(&self) -> Result<usize, ChatError> {
        let text = self.draft();

        if text.trim().is_empty() {
            return self.report(Err(ChatError::validation(
                "Please enter some text before sending",
            )));
        }

        let detected_language = self.detect(&text).await;
        tracing::debug!(%detected_language, chars = text.chars().count(), "message submitted");

        let index = {
            let mut guard = self.messages.write().unwrap_or_else(PoisonError::into_inner);
            let mut next = Vec::clone(&guard);
            next.push(Message::new(text, detected_language));
            let index = next.len() - 1;
            *guard = Arc::new(next);
            index
        };

        self.with_ui(|ui| {
            ui.draft.clear();
            ui.error = None;
        });

        Ok(index)
    }

    /// Summarizes the message at `index` into its `summary` field.
    ///
    /// Does nothing for a message with empty text.
    pub async fn summarize(&self, index: usize) -> Result<(), ChatError> {
        let result = self.run_summarize(index).await;
        self.report(result)
    }

    /// Checks that the summarize action is offered for the message at `index`,
    /// reporting a refusal like any other action error.
    pub fn require_summary_offer(&self, index: usize) -> Result<(), ChatError> {
        let result = self.require(index).and_then(|message| {
            if message.offers_summary() {
                Ok(())
            } else {
                Err(ChatError::validation(format!(
                    "Summaries are offered for English messages longer than {SUMMARY_MIN_CHARS} characters"
                )))
            }
        });
        self.report(result)
    }

    /// Translates the message at `index` into the selected target language,
    /// replacing any previous translation.
    pub async fn translate(&self, index: usize) -> Result<(), ChatError> {
        let result = self.run_translate(index).await;
        self.report(result)
    }

    async fn detect(&self, text: &str) -> String {
        if !self.host.is_available(CapabilityKind::Detector) {
            tracing::debug!("language detector unavailable");
            return UNKNOWN_LANGUAGE.to_string();
        }

        let detected = async {
            let detector = self.host.create_detector().await?;
            detector.detect(text).await
        }
        .await;

        match detected {
            Ok(candidates) => candidates
                .into_iter()
                .next()
                .map_or_else(|| UNKNOWN_LANGUAGE.to_string(), |c| c.detected_language),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "language detection failed");
                UNKNOWN_LANGUAGE.to_string()
            }
        }
    }

    async fn run_summarize(&self, index: usize) -> Result<(), ChatError> {
        let message = self.require(index)?;

        if message.text.is_empty() {
            return Ok(());
        }

        let kind = CapabilityKind::Summarizer;
        if !self.host.is_available(kind) {
            return Err(ChatError::unavailable(kind));
        }

        tracing::debug!(index, "summarizing message");
        let summary = async {
            let summarizer = self
                .host
                .create_summarizer(&SummarizerOptions::default())
                .await?;
            summarizer.summarize(&message.text).await
        }
        .await
        .map_err(|e| ChatError::failure(kind, e))?;

        self.update(index, |m| m.summary = Some(summary));
        Ok(())
    }

    async fn run_translate(&self, index: usize) -> Result<(), ChatError> {
        let message = self.require(index)?;

        let kind = CapabilityKind::Translator;
        if !self.host.is_available(kind) {
            return Err(ChatError::unavailable(kind));
        }

        let options = TranslatorOptions {
            source_language: message.detected_language.clone(),
            target_language: self.target_language(),
        };

        tracing::debug!(
            index,
            source = %options.source_language,
            target = %options.target_language,
            "translating message"
        );
        let text = async {
            let translator = self.host.create_translator(&options).await?;
            translator.translate(&message.text).await
        }
        .await
        .map_err(|e| ChatError::failure(kind, e))?;

        let translation = Translation {
            language: options.target_language,
            text,
        };
        self.update(index, |m| m.translation = Some(translation));
        Ok(())
    }

    fn require(&self, index: usize) -> Result<Message, ChatError> {
        self.message(index).ok_or_else(|| {
            ChatError::validation(format!("There is no message number {}", index + 1))
        })
    }

    /// Copy-on-write update of one message.
    fn update(&self, index: usize, apply: impl FnOnce(&mut Message)) {
        let mut guard = self.messages.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::clone(&guard);
        if let Some(message) = next.get_mut(index) {
            apply(message);
            *guard = Arc::new(next);
        }
    }

    fn report<T>(&self, result: Result<T, ChatError>) -> Result<T, ChatError> {
        if let Err(e) = &result {
            tracing::debug!(error = %e, "action failed");
            let message = e.to_string();
            self.with_ui(|ui| ui.error = Some(message));
        }
        result
    }

    fn with_ui<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        let mut ui = self.ui.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ui)
    }
}

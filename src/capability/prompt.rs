use super::language::{UNKNOWN_LANGUAGE, language_name};
use super::{SummarizerOptions, SummaryFormat, SummaryLength, SummaryTask};

pub const DETECTOR_PROMPT: &str = "You are a language identifier. Identify the language of the user's text. \
     Respond only with a JSON array of objects with the keys \"detectedLanguage\" \
     (a lowercase two-letter ISO 639-1 code such as en, pt or zh) and \"confidence\" (a number from 0 to 1), \
     most likely language first. Do not add any explanations.";

pub const SUMMARIZER_PROMPT_TEMPLATE: &str = "You are a summarizer. Write a {length} {task} of the user's text. \
     Format the summary as {format}. Output only the summary without any explanations.";

pub const TRANSLATOR_PROMPT_TEMPLATE: &str = "You are a translator. Translate the following text from {source_language} to {target_language}. \
     Output only the translated text without any explanations. \
     Preserve the original formatting including blank lines and whitespace.";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_summarizer_prompt(options: &SummarizerOptions) -> String {
    let task = match options.task {
        SummaryTask::Summarization => "summary",
    };
    let length = match options.length {
        SummaryLength::Short => "short (one to three sentences)",
        SummaryLength::Medium => "medium length (one paragraph)",
        SummaryLength::Long => "long (several paragraphs)",
    };
    let format = match options.format {
        SummaryFormat::PlainText => "plain text without any markdown",
        SummaryFormat::Markdown => "markdown",
    };
    SUMMARIZER_PROMPT_TEMPLATE
        .replace("{task}", task)
        .replace("{length}", length)
        .replace("{format}", format)
}

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_translator_prompt(source_language: &str, target_language: &str) -> String {
    let source = if source_language == UNKNOWN_LANGUAGE {
        "its original language"
    } else {
        language_name(source_language).unwrap_or(source_language)
    };
    let target = language_name(target_language).unwrap_or(target_language);
    TRANSLATOR_PROMPT_TEMPLATE
        .replace("{source_language}", source)
        .replace("{target_language}", target)
}

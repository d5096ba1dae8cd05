//! Target language codes offered by the chat.

use anyhow::Result;

use crate::ui::Style;

/// Sentinel stored when a message's language could not be detected.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Target language selected when nothing else is configured.
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// Languages a message can be translated into, with their names.
pub const TARGET_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("pt", "Portuguese"),
    ("es", "Spanish"),
    ("ru", "Russian"),
    ("tr", "Turkish"),
    ("fr", "French"),
];

/// Looks up the display name of a target language code.
pub fn language_name(code: &str) -> Option<&'static str> {
    TARGET_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Prints all target language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Target languages"));
    for (code, name) in TARGET_LANGUAGES {
        println!("  {:3} {}", Style::code(code), Style::secondary(name));
    }
}

/// Validates that the given code is one of the target languages.
///
/// # Errors
///
/// Returns an error if the language code is not in the list.
pub fn validate_target_language(lang: &str) -> Result<()> {
    if language_name(lang).is_some() {
        Ok(())
    } else {
        let codes: Vec<_> = TARGET_LANGUAGES.iter().map(|(code, _)| *code).collect();
        anyhow::bail!(
            "Invalid language code: '{lang}'\n\n\
             Valid target languages: {}\n\
             Run 'babel languages' to see their names.",
            codes.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_target_language_valid() {
        for (code, _) in TARGET_LANGUAGES {
            assert!(validate_target_language(code).is_ok());
        }
    }

    #[test]
    fn test_validate_target_language_invalid() {
        assert!(validate_target_language("ja").is_err());
        assert!(validate_target_language("").is_err());
        assert!(validate_target_language("EN").is_err()); // Case sensitive
        assert!(validate_target_language(UNKNOWN_LANGUAGE).is_err());
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name("pt"), Some("Portuguese"));
        assert_eq!(language_name("de"), None);
    }

    #[test]
    fn test_default_target_is_offered() {
        assert!(language_name(DEFAULT_TARGET_LANGUAGE).is_some());
    }
}

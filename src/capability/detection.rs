//! Parsing of language detector replies.

use anyhow::{Context, Result};
use serde::Deserialize;

use super::LanguageCandidate;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCandidate {
    detected_language: String,
    #[serde(default)]
    confidence: f32,
}

/// Extracts ranked candidates from a detector reply.
///
/// Models sometimes wrap the JSON array in prose or code fences, so the
/// outermost `[...]` in the reply is parsed. Codes are reduced to their
/// lowercase primary subtag (`en-US` and `EN` both become `en`). Candidates
/// with an empty code are dropped and the rest are sorted by confidence,
/// highest first.
pub fn parse_candidates(reply: &str) -> Result<Vec<LanguageCandidate>> {
    let start = reply
        .find('[')
        .context("Detector reply does not contain a JSON array")?;
    let end = reply
        .rfind(']')
        .filter(|end| *end > start)
        .context("Detector reply does not contain a JSON array")?;

    let raw: Vec<RawCandidate> = serde_json::from_str(&reply[start..=end])
        .context("Detector reply is not a list of language candidates")?;

    let mut candidates: Vec<LanguageCandidate> = raw
        .into_iter()
        .filter_map(|c| {
            let code = normalize_language_code(&c.detected_language);
            (!code.is_empty()).then_some(LanguageCandidate {
                detected_language: code,
                confidence: c.confidence,
            })
        })
        .collect();

    candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    Ok(candidates)
}

fn normalize_language_code(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let reply = r#"[{"detectedLanguage":"en","confidence":0.97}]"#;
        let candidates = parse_candidates(reply).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].detected_language, "en");
    }

    #[test]
    fn test_parse_sorts_by_confidence_descending() {
        let reply = r#"[
            {"detectedLanguage":"es","confidence":0.2},
            {"detectedLanguage":"pt","confidence":0.7},
            {"detectedLanguage":"gl","confidence":0.1}
        ]"#;
        let codes: Vec<_> = parse_candidates(reply)
            .unwrap()
            .into_iter()
            .map(|c| c.detected_language)
            .collect();
        assert_eq!(codes, ["pt", "es", "gl"]);
    }

    #[test]
    fn test_parse_array_inside_code_fence() {
        let reply = "```json\n[{\"detectedLanguage\":\"ru\",\"confidence\":0.9}]\n```";
        let candidates = parse_candidates(reply).unwrap();
        assert_eq!(candidates[0].detected_language, "ru");
    }

    #[test]
    fn test_parse_normalizes_region_and_case() {
        let reply = r#"[
            {"detectedLanguage":"en-US","confidence":0.8},
            {"detectedLanguage":"EN","confidence":0.1},
            {"detectedLanguage":"pt_BR","confidence":0.05},
            {"detectedLanguage":" zh-Hant-TW ","confidence":0.05}
        ]"#;
        let codes: Vec<_> = parse_candidates(reply)
            .unwrap()
            .into_iter()
            .map(|c| c.detected_language)
            .collect();
        assert_eq!(codes, ["en", "en", "pt", "zh"]);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_candidates("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_drops_blank_codes_and_defaults_confidence() {
        let reply = r#"[{"detectedLanguage":"  "},{"detectedLanguage":"tr"}]"#;
        let candidates = parse_candidates(reply).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].detected_language, "tr");
        assert!(candidates[0].confidence.abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(parse_candidates("The text is in English.").is_err());
        assert!(parse_candidates("] backwards [").is_err());
        assert!(parse_candidates(r#"[{"language":"en"}]"#).is_err());
    }
}

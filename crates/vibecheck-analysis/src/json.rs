//! Tolerant extraction of a JSON value from free-form model text.

use serde::de::DeserializeOwned;

use crate::error::AnalysisError;

/// Parses `raw` as `T`, tolerating the wrappers models tend to add.
///
/// Tries, in order: the trimmed text as-is; the body of the first Markdown
/// code fence; the span from the first `{`/`[` to the last matching closer.
///
/// # Errors
///
/// Returns [`AnalysisError::ModelOutput`] carrying the error from the direct
/// parse when no candidate deserializes.
pub fn parse_model_json<T: DeserializeOwned>(raw: &str) -> Result<T, AnalysisError> {
    let trimmed = raw.trim();
    let first_error = match serde_json::from_str(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let candidates = [strip_code_fence(trimmed), outermost_value(trimmed)];
    for candidate in candidates.into_iter().flatten() {
        if let Ok(value) = serde_json::from_str(candidate) {
            return Ok(value);
        }
    }

    Err(AnalysisError::ModelOutput {
        source: first_error,
    })
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let rest = &text[start + 3..];
    // Skip an optional language tag such as `json`.
    let rest = match rest.find('\n') {
        Some(newline) if !rest[..newline].trim().contains(['{', '[']) => &rest[newline + 1..],
        _ => rest,
    };
    let end = rest.find("```").unwrap_or(rest.len());
    Some(rest[..end].trim())
}

fn outermost_value(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let close = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        summary: String,
    }

    #[test]
    fn parses_plain_json() {
        let reply: Reply = parse_model_json(r#" {"summary": "hi"} "#).unwrap();
        assert_eq!(reply.summary, "hi");
    }

    #[test]
    fn parses_json_fence() {
        let raw = "Here you go:\n```json\n{\"summary\": \"fenced\"}\n```\nEnjoy!";
        let reply: Reply = parse_model_json(raw).unwrap();
        assert_eq!(reply.summary, "fenced");
    }

    #[test]
    fn parses_bare_fence() {
        let raw = "```\n[{\"summary\": \"a\"}, {\"summary\": \"b\"}]\n```";
        let replies: Vec<Reply> = parse_model_json(raw).unwrap();
        assert_eq!(replies.len(), 2);
    }

    #[test]
    fn parses_value_embedded_in_prose() {
        let raw = "Sure! {\"summary\": \"embedded\"} Hope that helps.";
        let reply: Reply = parse_model_json(raw).unwrap();
        assert_eq!(reply.summary, "embedded");
    }

    #[test]
    fn parses_array_embedded_in_prose() {
        let raw = "Memes: [{\"summary\": \"x\"}] done";
        let replies: Vec<Reply> = parse_model_json(raw).unwrap();
        assert_eq!(replies[0].summary, "x");
    }

    #[test]
    fn rejects_text_without_json() {
        let err = parse_model_json::<Reply>("I cannot help with that.").unwrap_err();
        assert!(matches!(err, AnalysisError::ModelOutput { .. }));
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(parse_model_json::<Reply>(r#"{"tagline": "x"}"#).is_err());
    }
}

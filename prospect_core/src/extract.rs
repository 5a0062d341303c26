//! Best-effort extraction of a JSON object from conversational text.
//!
//! The upstream service is prompted to emit pure JSON but routinely wraps
//! it in prose. The match is greedy, first `{` to last `}`, so an object
//! containing nested braces survives extraction.

use regex::Regex;

/// Find the first brace-delimited substring of `text`.
///
/// Returns `None` when no such substring exists; the caller degrades to a
/// null-filled record in that case.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let re = Regex::new(r"(?s)\{.*\}").ok()?;
    re.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object_is_returned_whole() {
        assert_eq!(
            extract_json_object(r#"{"email": "a@b.edu"}"#),
            Some(r#"{"email": "a@b.edu"}"#)
        );
    }

    #[test]
    fn surrounding_prose_is_stripped() {
        let text = r#"Sure! {"email": "a@b.edu"} Hope that helps!"#;
        assert_eq!(extract_json_object(text), Some(r#"{"email": "a@b.edu"}"#));
    }

    #[test]
    fn match_spans_newlines() {
        let text = "Here you go:\n{\n  \"email\": \"a@b.edu\"\n}\nanything else?";
        assert_eq!(
            extract_json_object(text),
            Some("{\n  \"email\": \"a@b.edu\"\n}")
        );
    }

    #[test]
    fn greedy_match_covers_nested_braces() {
        let text = r#"{"outer": {"inner": 1}}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"outer": {"inner": 1}}"#));
    }

    #[test]
    fn greedy_match_spans_multiple_fragments() {
        // Two objects in one response collapse into a single (unparsable)
        // fragment. The resolver treats that as a decode failure.
        let text = r#"{"a": 1} and {"b": 2}"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": 1} and {"b": 2}"#));
    }

    #[test]
    fn no_braces_yields_none() {
        assert_eq!(extract_json_object("I could not find any contact info."), None);
        assert_eq!(extract_json_object(""), None);
    }

    #[test]
    fn unpaired_brace_yields_none() {
        assert_eq!(extract_json_object(r#"{"email": "a@b.edu""#), None);
    }
}

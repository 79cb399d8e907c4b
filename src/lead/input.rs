//! Classification of raw user input during lead collection.
//!
//! Pure string checks, no I/O.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

/// Inputs that abandon lead collection.
pub const CANCEL_TOKENS: [&str; 4] = ["cancel", "nevermind", "skip", "back"];

/// At skippable steps this leaves the field blank instead of cancelling.
pub const SKIP_TOKEN: &str = "skip";

/// Substrings that mark an input as a question rather than a name.
const QUESTION_INDICATORS: [&str; 10] = [
    "what", "how", "when", "where", "why", "who", "can", "do you", "tell me", "?",
];

/// `local@domain.tld` with no whitespace and a dot in the domain.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Finds an address embedded in free text.
static EMBEDDED_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("valid embedded email regex")
});

/// Trim and lowercase for comparisons. Stored values keep their casing.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn is_cancel_token(normalized: &str) -> bool {
    CANCEL_TOKENS.contains(&normalized)
}

pub fn is_skip_token(normalized: &str) -> bool {
    normalized == SKIP_TOKEN
}

/// Substring match against the question indicators.
///
/// Deliberately loose: "Duncan" contains "can" and is treated as a question.
pub fn looks_like_question(normalized: &str) -> bool {
    QUESTION_INDICATORS
        .iter()
        .any(|indicator| normalized.contains(indicator))
}

pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate.trim())
}

pub fn validate_email(candidate: &str) -> Result<(), ValidationError> {
    if is_valid_email(candidate) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(candidate.trim().to_string()))
    }
}

/// First email address found anywhere in `text`.
pub fn extract_email(text: &str) -> Option<String> {
    EMBEDDED_EMAIL.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  CaNcEl \n"), "cancel");
    }

    #[test]
    fn cancel_tokens_are_exact() {
        for token in CANCEL_TOKENS {
            assert!(is_cancel_token(token));
        }
        assert!(!is_cancel_token("cancel please"));
        assert!(!is_cancel_token("go back"));
        assert!(is_skip_token("skip"));
        assert!(!is_skip_token("cancel"));
    }

    #[test]
    fn question_indicators() {
        assert!(looks_like_question("what are your hours?"));
        assert!(looks_like_question("do you ship abroad"));
        assert!(looks_like_question("tell me about pricing"));
        assert!(looks_like_question("hours?"));
        assert!(!looks_like_question("jane doe"));
        assert!(!looks_like_question("acme inc"));
    }

    #[test]
    fn valid_emails() {
        for email in ["jane@x.com", "a.b+c@sub.domain.org", "  spaced@trim.io  "] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn invalid_emails() {
        for email in [
            "not-an-email",
            "jane@",
            "@x.com",
            "jane@x",
            "jane doe@x.com",
            "jane@@x.com",
            "",
        ] {
            assert!(!is_valid_email(email), "{email:?} should be invalid");
            assert!(validate_email(email).is_err());
        }
    }

    #[test]
    fn extracts_embedded_email() {
        assert_eq!(
            extract_email("you can reach me at jane.doe@acme.io thanks").as_deref(),
            Some("jane.doe@acme.io")
        );
        assert!(extract_email("no address here").is_none());
    }
}

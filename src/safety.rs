//! Input sanitization for outbound payloads.
//!
//! Applies the same cleanup the service performs on its side (tag stripping,
//! length caps, whitespace collapsing) so the widget never sends something the
//! service would silently rewrite.

use std::sync::LazyLock;

use regex::Regex;

use crate::api::LeadSubmission;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Maximum lengths (in characters) accepted by the service.
pub mod limits {
    pub const CHAT_MESSAGE: usize = 500;
    pub const CLIENT_ID: usize = 50;
    pub const NAME: usize = 100;
    pub const EMAIL: usize = 200;
    pub const PHONE: usize = 50;
    pub const COMPANY: usize = 200;
    pub const MESSAGE: usize = 1000;
    pub const SNIPPET: usize = 1000;
    pub const SOURCE_URL: usize = 500;
}

/// Strip tags, cap at `max_len` characters, collapse whitespace and trim.
pub fn sanitize_input(text: &str, max_len: usize) -> String {
    let stripped = HTML_TAG.replace_all(text, "");
    let capped: String = stripped.chars().take(max_len).collect();
    capped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sanitize every field of a lead submission.
pub fn sanitize_submission(lead: LeadSubmission) -> LeadSubmission {
    LeadSubmission {
        client_id: sanitize_input(&lead.client_id, limits::CLIENT_ID),
        name: sanitize_input(&lead.name, limits::NAME),
        email: sanitize_input(&lead.email, limits::EMAIL),
        phone: sanitize_input(&lead.phone, limits::PHONE),
        company: sanitize_input(&lead.company, limits::COMPANY),
        message: sanitize_input(&lead.message, limits::MESSAGE),
        conversation_snippet: sanitize_input(&lead.conversation_snippet, limits::SNIPPET),
        source_url: sanitize_input(&lead.source_url, limits::SOURCE_URL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags() {
        assert_eq!(
            sanitize_input("<b>hello</b> <script>x</script>world", 500),
            "hello xworld"
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sanitize_input("  a \n\t b   c  ", 500), "a b c");
    }

    #[test]
    fn caps_length_in_characters() {
        assert_eq!(sanitize_input("ééééé", 3), "ééé");
        assert_eq!(sanitize_input("abcdef", 3), "abc");
    }

    #[test]
    fn empty_and_tag_only_inputs_become_empty() {
        assert_eq!(sanitize_input("", 10), "");
        assert_eq!(sanitize_input("<br/>", 10), "");
    }

    #[test]
    fn submission_fields_are_each_capped() {
        let lead = LeadSubmission {
            client_id: "c".repeat(80),
            name: format!("<i>{}</i>", "n".repeat(150)),
            email: "jane@x.com".into(),
            phone: "  555 0100 ".into(),
            company: String::new(),
            message: "m".repeat(2000),
            conversation_snippet: "user: hi".into(),
            source_url: "https://acme.test".into(),
        };
        let clean = sanitize_submission(lead);
        assert_eq!(clean.client_id.len(), limits::CLIENT_ID);
        assert_eq!(clean.name.len(), limits::NAME);
        assert_eq!(clean.phone, "555 0100");
        assert_eq!(clean.message.len(), limits::MESSAGE);
        assert_eq!(clean.email, "jane@x.com");
    }
}

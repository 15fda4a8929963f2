//! Log Redaction
//!
//! Scrubs provider keys, bearer tokens, and phone numbers from free text
//! (questions, provider error bodies) before it reaches a log sink.

use std::sync::LazyLock;

use regex::Regex;

static TELEPHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Groups must be separated, so bare digit runs in questions survive.
    Regex::new(r"(?:\+\d{1,3}[-.\s]?)?(?:\(\d{2,4}\)\s?|\d{2,4}[-.\s])\d{3,4}[-.\s]\d{4}").unwrap()
});

// OpenAI keys come as `sk-...` and `sk-proj-...`.
static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[A-Za-z0-9_\-]{20,})|(Bearer\s+[A-Za-z0-9\-\._~+/]+=*)").unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    // Keys first, so long digit runs inside a key are not mistaken for phones.
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    TELEPHONE_RE
        .replace_all(&redacted, "[REDACTED_PHONE]")
        .into_owned()
}

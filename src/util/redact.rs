use crate::{ApiKey, BodySnippetConfig};

pub(crate) fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes.min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

pub(crate) fn redact_text(text: String, key: &ApiKey) -> String {
    let secret = key.expose();
    if secret.is_empty() {
        return text;
    }
    text.replace(secret, "<redacted>")
}

/// Lossy, truncated and key-free copy of a response body for `Error::Decode`.
pub(crate) fn body_snippet(body: &[u8], config: BodySnippetConfig, key: &ApiKey) -> Option<Box<str>> {
    if !config.enabled {
        return None;
    }
    let text = redact_text(String::from_utf8_lossy(body).into_owned(), key);
    Some(truncate_utf8(&text, config.max_bytes).into())
}

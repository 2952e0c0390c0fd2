//! Secret sanitization utilities for redacting sensitive information.
//!
//! Provides regex-based secret redaction for:
//! - HTTP Basic credentials (`Basic ...`)
//! - Bearer tokens (`Bearer ...`)
//! - Generic secret assignments (`api_key=...`, `account_sid: ...`, etc.)
//!
//! Run anything that may carry credentials through [`redact_secrets`] before
//! it reaches a log line or the screen.

use regex::Regex;
use std::sync::LazyLock;

/// Basic auth pattern: "Basic " followed by a base64 payload
static BASIC_AUTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"\bBasic\s+[A-Za-z0-9+/]{2,}={0,2}"));

/// Bearer token pattern: "Bearer " followed by token characters
static BEARER_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"(?i)\bBearer\s+[A-Za-z0-9.\-_]{16,}"));

/// Generic secret assignment pattern: key=value or key: value format
static SECRET_ASSIGNMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(
        r#"(?i)\b(api[\-_]?key|account[\-_]?sid|jwt|token|secret|password)\b(\s*[:=]\s*)(["']?)[^\s"',]{4,}"#,
    )
});

/// Redact secrets and sensitive keys from a string.
///
/// Best effort: matches are replaced with `[REDACTED_SECRET]`.
///
/// # Examples
///
/// ```
/// use refwidget_commons::sanitizer::redact_secrets;
///
/// let output = redact_secrets("Authorization: Basic c2lkOmtleQ==");
/// assert_eq!(output, "Authorization: Basic [REDACTED_SECRET]");
/// ```
pub fn redact_secrets(input: &str) -> String {
    let redacted = BASIC_AUTH_REGEX.replace_all(input, "Basic [REDACTED_SECRET]");
    let redacted = BEARER_TOKEN_REGEX.replace_all(&redacted, "Bearer [REDACTED_SECRET]");
    let redacted = SECRET_ASSIGNMENT_REGEX.replace_all(&redacted, "$1$2$3[REDACTED_SECRET]");

    redacted.into_owned()
}

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        // Panic is acceptable thanks to the `load_regex` test
        Err(err) => panic!("invalid regex pattern `{pattern}`: {err}"),
    }
}

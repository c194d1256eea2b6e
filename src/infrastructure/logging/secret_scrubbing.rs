//! Regex-based redaction of secrets in log text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Bearer\s+[A-Za-z0-9\-_.~+/=]+").expect("bearer pattern is valid")
});

static PRIVATE_KEY_FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""private_key"\s*:\s*"(?:[^"\\]|\\.)*""#).expect("private key field pattern is valid")
});

static PEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)-----BEGIN [A-Z ]*PRIVATE KEY-----.*?-----END [A-Z ]*PRIVATE KEY-----")
        .expect("PEM pattern is valid")
});

static SECRET_FIELD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)["']?(token|secret|password|api_key|apikey)["']?\s*[:=]\s*["']?[^"'\s,}]+["']?"#)
        .expect("secret field pattern is valid")
});

/// Redacts secrets from operator-visible text.
///
/// Covers bearer tokens, service-account private keys (as a JSON field or a
/// bare PEM block) and `token=`/`secret:` style fields.
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    /// Create a new scrubber
    pub const fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = BEARER_PATTERN.replace_all(message, "Bearer [TOKEN_REDACTED]");
        let scrubbed =
            PRIVATE_KEY_FIELD_PATTERN.replace_all(&scrubbed, r#""private_key": "[REDACTED]""#);
        let scrubbed = PEM_PATTERN.replace_all(&scrubbed, "[PRIVATE_KEY_REDACTED]");
        let scrubbed = SECRET_FIELD_PATTERN.replace_all(&scrubbed, "$1=[REDACTED]");
        scrubbed.into_owned()
    }

    /// Scrub and cut `message` to at most `max_chars` characters.
    pub fn scrub_truncated(&self, message: &str, max_chars: usize) -> String {
        let scrubbed = self.scrub_message(message);
        if scrubbed.chars().count() <= max_chars {
            return scrubbed;
        }
        let mut truncated: String = scrubbed.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}

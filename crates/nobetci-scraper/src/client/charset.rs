//! Response body decoding.
//!
//! The extractors only ever see valid UTF-8. Detection order:
//! 1. `charset=` in the `Content-Type` header
//! 2. a `<meta ... charset=...>` declaration in the first 1024 bytes
//! 3. the body as-is when it is already valid UTF-8
//! 4. the configured fallback encoding (Turkish pages without a declaration
//!    are almost always windows-1254)

use std::sync::LazyLock;

use encoding_rs::Encoding;
use regex::bytes::Regex;

const META_SCAN_LEN: usize = 1024;

static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([a-z0-9_\-.:]+)"#).expect("valid charset regex")
});

static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\b[^>]*?charset\s*=\s*["']?([a-z0-9_\-.:]+)"#)
        .expect("valid meta charset regex")
});

pub(crate) fn decode_html(
    bytes: &[u8],
    content_type: Option<&str>,
    fallback: &'static Encoding,
) -> String {
    let declared = content_type
        .and_then(|ct| charset_label(&CONTENT_TYPE_CHARSET_RE, ct.as_bytes()))
        .or_else(|| charset_label(&META_CHARSET_RE, &bytes[..bytes.len().min(META_SCAN_LEN)]));

    if let Some(encoding) = declared {
        return decode_with(encoding, bytes);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_owned(),
        Err(e) => {
            tracing::debug!(
                encoding = fallback.name(),
                error = %e,
                "body is not UTF-8 and declares no charset; using fallback encoding"
            );
            decode_with(fallback, bytes)
        }
    }
}

fn charset_label(re: &Regex, haystack: &[u8]) -> Option<&'static Encoding> {
    let label = re.captures(haystack)?.get(1)?.as_bytes();
    Encoding::for_label(label)
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8]) -> String {
    // A byte-order mark overrides the declared encoding.
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(
            encoding = actual.name(),
            "malformed byte sequences replaced while decoding"
        );
    }
    text.into_owned()
}
